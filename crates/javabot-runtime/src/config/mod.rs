//! Configuration for the javabot runtime.
//!
//! Layered loading (defaults, files, environment, overrides), the schema,
//! and validation.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    BotConfig, JavabotConfig, JavadocConfig, LogFormat, LogLevel, LogOutput, LogRotation,
    LoggingConfig, RuntimeConfig, SpanEventConfig,
};
pub use validation::validate_config;
