//! Application configuration: environment detection and layered settings.

mod environment;
pub mod settings;

pub use environment::Environment;
pub use settings::{
    ApplicationConfig, DatabaseConfig, JwtConfig, LoggerConfig, ServerConfig, Settings,
    UploadConfig,
};
