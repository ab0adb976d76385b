//! Command-line interface: argument parsing, configuration loading, and
//! command dispatch.

pub mod handlers;
pub mod parser;

pub use parser::{Cli, Commands};

use tracing_subscriber::EnvFilter;

use crate::config::{Environment, LoggerConfig, Settings};

/// Resolves the runtime environment from the `--env` flag or `APP_ENV`.
pub fn resolve_environment(cli: &Cli) -> Environment {
    cli.env
        .as_deref()
        .map(Environment::from_name)
        .unwrap_or_else(Environment::from_env)
}

/// Initializes the global tracing subscriber from logger settings.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(config: &LoggerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", config.level, e))?;

    if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    Ok(())
}

/// Loads settings and runs the selected command.
pub async fn execute_command(cli: Cli) -> anyhow::Result<()> {
    let environment = resolve_environment(&cli);

    let settings = Settings::load(cli.config.as_deref(), environment)
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;

    init_tracing(&settings.logger)?;

    tracing::info!(environment = %environment.as_str(), "Configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => handlers::serve::handle_serve(settings, host, port).await,
        Commands::Migrate => handlers::migrate::handle_migrate(&settings).await,
    }
}
