//! Layered application settings.
//!
//! Settings are read from `config/default.toml`, then the
//! environment-specific file (`config/production.toml`, ...), then
//! `CATMAP_*` environment variables (nested keys separated by `__`, e.g.
//! `CATMAP_DATABASE__URL`).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::config::Environment;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub logger: LoggerConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationConfig {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Bind address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token validity in hours.
    pub access_token_expiration: i64,
    /// Refresh token validity in hours.
    pub refresh_token_expiration: i64,
}

impl JwtConfig {
    /// Rejects configurations that would issue weak or unusable tokens.
    pub fn validate(&self) -> Result<(), String> {
        if self.secret.is_empty() {
            return Err("jwt.secret must be set".to_string());
        }
        if self.secret.len() < 32 {
            return Err("jwt.secret must be at least 32 characters".to_string());
        }
        if self.access_token_expiration <= 0 {
            return Err("jwt.access_token_expiration must be positive".to_string());
        }
        if self.refresh_token_expiration <= 0 {
            return Err("jwt.refresh_token_expiration must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggerConfig {
    pub level: String,
    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Directory cat images are stored in; created on demand.
    pub dir: PathBuf,
    /// Maximum accepted request body size in bytes.
    pub max_file_size: usize,
}

impl Settings {
    /// Loads layered settings for the given environment.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding the TOML files; defaults to `config`
    /// * `environment` - Which environment overlay to apply
    pub fn load(config_dir: Option<&Path>, environment: Environment) -> Result<Self, ConfigError> {
        let dir = config_dir.unwrap_or_else(|| Path::new("config"));

        Config::builder()
            .add_source(File::from(dir.join("default")))
            .add_source(File::from(dir.join(environment.as_str())).required(false))
            .add_source(config::Environment::with_prefix("CATMAP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_at_least_32_characters_long".to_string(),
            access_token_expiration: 1,
            refresh_token_expiration: 168,
        }
    }

    #[test]
    fn test_jwt_config_valid() {
        assert!(valid_jwt_config().validate().is_ok());
    }

    #[test]
    fn test_jwt_config_rejects_empty_secret() {
        let config = JwtConfig {
            secret: String::new(),
            ..valid_jwt_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_jwt_config_rejects_short_secret() {
        let config = JwtConfig {
            secret: "short".to_string(),
            ..valid_jwt_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_jwt_config_rejects_non_positive_expirations() {
        let config = JwtConfig {
            access_token_expiration: 0,
            ..valid_jwt_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[application]
name = "catmap"

[server]
host = "127.0.0.1"
port = 3000

[database]
url = "postgres://localhost/catmap_test"
max_connections = 4
min_connections = 1
connection_timeout = 5

[jwt]
secret = "test_secret_key_at_least_32_characters_long"
access_token_expiration = 1
refresh_token_expiration = 168

[logger]
level = "debug"
json = false

[uploads]
dir = "uploads"
max_file_size = 1048576
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(dir.path()), Environment::Development).unwrap();
        assert_eq!(settings.application.name, "catmap");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.max_connections, 4);
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_environment_overlay_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[application]
name = "catmap"

[server]
host = "127.0.0.1"
port = 3000

[database]
url = "postgres://localhost/catmap_test"
max_connections = 4
min_connections = 1
connection_timeout = 5

[jwt]
secret = "test_secret_key_at_least_32_characters_long"
access_token_expiration = 1
refresh_token_expiration = 168

[logger]
level = "debug"
json = false

[uploads]
dir = "uploads"
max_file_size = 1048576
"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("production.toml"),
            "[server]\nhost = \"0.0.0.0\"\n\n[logger]\njson = true\n",
        )
        .unwrap();

        let settings = Settings::load(Some(dir.path()), Environment::Production).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 3000);
        assert!(settings.logger.json);
    }
}
