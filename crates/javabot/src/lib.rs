//! # javabot
//!
//! A chat bot that answers `javadoc` lookups from an API catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────┐     ┌───────────────────┐     ┌───────────┐
//! │  BotRuntime │────▶│ Dispatcher │────▶│ JavadocOperation  │────▶│ Transport │
//! │ (mpsc loop) │     │            │────▶│ other operations  │     │           │
//! └─────────────┘     └────────────┘     └───────────────────┘     └───────────┘
//!                                             │ parse → resolve → plan
//!                                             ▼
//!                                        CatalogHandle (snapshot)
//! ```
//!
//! - **core**: catalog, reference parser, resolver, delivery planning
//! - **framework**: messages, operations, addressing, dispatcher
//! - **runtime**: config, logging, transport seam, message loop
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use javabot::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = RecordingTransport::new();
//!     let runtime = BotRuntime::builder().transport(transport.clone()).build()?;
//!     runtime
//!         .handle(IncomingMessage::public("#java", "alice", "~javadoc String.split(*)"))
//!         .await?;
//!     println!("{:?}", transport.sent());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use javabot_core as core;
pub use javabot_framework as framework;
pub use javabot_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use javabot::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use javabot_runtime::{
        BotRuntime, BoxedTransport, JavabotConfig, RecordingTransport, RuntimeError,
        RuntimeResult, SentMessage, Transport,
    };

    // Operations and messages
    pub use javabot_framework::{
        Addressing, Dispatcher, FnOperation, IncomingMessage, JavadocOperation, Operation, Reply,
        keyword,
    };

    // Catalog and lookup
    pub use javabot_core::{
        ApiCatalog, CatalogHandle, CatalogSource, DeliveryStrategy, JavadocError, parse, resolve,
    };

    // Logging macros
    pub use javabot_runtime::prelude::*;
}
