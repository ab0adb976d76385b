//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// REST API for a cat registry with geotagged records and owner accounts
#[derive(Parser, Debug)]
#[command(name = "catmap")]
#[command(about = "REST API server for a cat registry")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Directory holding the TOML configuration files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Runtime environment (development, production); defaults to APP_ENV
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured bind port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run pending database migrations
    Migrate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_with_overrides() {
        let cli = Cli::try_parse_from(["catmap", "serve", "--host", "0.0.0.0", "--port", "8080"])
            .unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("Expected Serve, got {:?}", other),
        }
    }

    #[test]
    fn test_migrate_with_global_env() {
        let cli = Cli::try_parse_from(["catmap", "migrate", "--env", "production"]).unwrap();
        assert_eq!(cli.env.as_deref(), Some("production"));
        assert!(matches!(cli.command, Commands::Migrate));
    }
}
