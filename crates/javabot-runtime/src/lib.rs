//! javabot runtime - configuration, logging and the message loop.
//!
//! This crate provides:
//! - Layered configuration (`JavabotConfig`, `ConfigLoader`)
//! - Logging setup (`LoggingBuilder`, `SpanEvents`)
//! - The outbound [`Transport`] seam and an in-memory [`RecordingTransport`]
//! - The concurrent message runtime ([`BotRuntime`]) with catalog reload
//!
//! ```ignore
//! use javabot_runtime::{BotRuntime, RecordingTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = BotRuntime::builder()
//!         .transport(RecordingTransport::new())
//!         .build()?;
//!
//!     let (tx, rx) = tokio::sync::mpsc::channel(64);
//!     // hand `tx` to whatever reads the chat connection
//!     runtime.shutdown_on_signal();
//!     runtime.run(rx).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod transport;

// Re-exports
pub use config::{ConfigError, ConfigLoader, ConfigResult, JavabotConfig, Profile};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use runtime::{BotRuntime, RuntimeBuilder};
pub use transport::{BoxedTransport, RecordingTransport, SentMessage, Transport, deliver};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides all the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
