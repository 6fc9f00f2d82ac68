//! Runtime error types.

use thiserror::Error;

pub use crate::config::{ConfigError, ConfigResult};
use javabot_core::CatalogError;

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog could not be loaded or rebuilt.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A reload was requested but no catalog file is configured.
    #[error("No catalog path configured (javadoc.catalog_path)")]
    NoCatalogPath,

    /// The runtime was built without a transport.
    #[error("No transport configured")]
    MissingTransport,

    /// Sending a reply failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Delivering one message's replies took too long.
    #[error("Reply delivery timed out after {ms}ms")]
    Timeout { ms: u64 },
}

impl RuntimeError {
    /// Creates a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
