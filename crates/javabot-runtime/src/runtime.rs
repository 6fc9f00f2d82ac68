//! Message runtime.
//!
//! [`BotRuntime`] owns the dispatcher, the catalog handle and the outbound
//! [`Transport`]. Inbound messages arrive on an mpsc channel; each one is
//! handled in its own task, bounded by a semaphore.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use javabot_runtime::{BotRuntime, RecordingTransport};
//!
//! let runtime = BotRuntime::builder()
//!     .config_file("javabot.toml")
//!     .transport(RecordingTransport::new())
//!     .build()?;
//!
//! let (tx, rx) = tokio::sync::mpsc::channel(64);
//! runtime.shutdown_on_signal();
//! runtime.run(rx).await?;
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use javabot_core::{ApiCatalog, CatalogHandle, CatalogSource};
use javabot_framework::{BoxedOperation, Dispatcher, IncomingMessage, JavadocOperation, Operation};
use tokio::signal;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigLoader, JavabotConfig};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;
use crate::transport::{BoxedTransport, Transport, deliver};

/// The part of the runtime each message task needs.
struct RuntimeInner {
    dispatcher: Dispatcher,
    transport: BoxedTransport,
    timeout: Duration,
}

impl RuntimeInner {
    async fn handle(&self, message: IncomingMessage) -> RuntimeResult<usize> {
        let Some(replies) = self.dispatcher.dispatch(&message) else {
            return Ok(0);
        };

        let delivery = deliver(self.transport.as_ref(), &message, &replies);
        match tokio::time::timeout(self.timeout, delivery).await {
            Ok(sent) => sent.map(|()| replies.len()),
            Err(_) => Err(RuntimeError::Timeout {
                ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

/// The javabot message runtime.
///
/// Cloning is cheap; clones share the dispatcher, catalog, concurrency limit
/// and shutdown token.
#[derive(Clone)]
pub struct BotRuntime {
    config: JavabotConfig,
    catalog: CatalogHandle,
    inner: Arc<RuntimeInner>,
    limiter: Arc<Semaphore>,
    shutdown: CancellationToken,
}

impl BotRuntime {
    /// Creates a runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from an already loaded configuration.
    ///
    /// Initializes logging and loads `javadoc.catalog_path` if set.
    pub fn from_config(
        config: &JavabotConfig,
        transport: impl Transport + 'static,
    ) -> RuntimeResult<Self> {
        Self::builder()
            .config(config.clone())
            .transport(transport)
            .build()
    }

    pub fn config(&self) -> &JavabotConfig {
        &self.config
    }

    /// The catalog handle shared with the Javadoc operation.
    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    pub fn operation_count(&self) -> usize {
        self.inner.dispatcher.operation_count()
    }

    /// Handles one message: dispatch, then send the replies in order.
    ///
    /// Returns the number of replies sent; zero when no operation matched.
    pub async fn handle(&self, message: IncomingMessage) -> RuntimeResult<usize> {
        self.inner.handle(message).await
    }

    /// Consumes inbound messages until the channel closes or shutdown is
    /// requested, then waits for in-flight messages to finish.
    pub async fn run(&self, mut inbound: mpsc::Receiver<IncomingMessage>) -> RuntimeResult<()> {
        info!(
            nick = %self.config.bot.nick,
            operations = self.operation_count(),
            max_concurrent = self.config.runtime.max_concurrent_messages,
            "javabot runtime is running"
        );

        let mut tasks = JoinSet::new();

        loop {
            let message = tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown requested");
                    break;
                }
                message = inbound.recv() => match message {
                    Some(message) => message,
                    None => {
                        debug!("Inbound channel closed");
                        break;
                    }
                },
            };

            let permit = tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown requested");
                    break;
                }
                permit = Arc::clone(&self.limiter).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let inner = Arc::clone(&self.inner);
            tasks.spawn(async move {
                let _permit = permit;
                let sender = message.sender.clone();
                if let Err(e) = inner.handle(message).await {
                    warn!(sender = %sender, error = %e, "Failed to deliver replies");
                }
            });

            while let Some(result) = tasks.try_join_next() {
                Self::reap(result);
            }
        }

        if !tasks.is_empty() {
            debug!(in_flight = tasks.len(), "Waiting for in-flight messages");
        }
        while let Some(result) = tasks.join_next().await {
            Self::reap(result);
        }

        info!("Runtime stopped");
        Ok(())
    }

    fn reap(result: Result<(), JoinError>) {
        if let Err(e) = result
            && e.is_panic()
        {
            error!(error = %e, "Message task panicked");
        }
    }

    /// Requests shutdown; [`run`](Self::run) returns once in-flight work drains.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Cancels the runtime on Ctrl+C or SIGTERM.
    pub fn shutdown_on_signal(&self) -> JoinHandle<()> {
        let token = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = wait_for_signal() => token.cancel(),
                _ = token.cancelled() => {}
            }
        })
    }

    /// Re-reads `javadoc.catalog_path` and swaps in the new catalog.
    ///
    /// On failure the current catalog stays in place.
    pub fn reload_catalog(&self) -> RuntimeResult<Arc<ApiCatalog>> {
        let path = self
            .config
            .javadoc
            .catalog_path
            .as_deref()
            .ok_or(RuntimeError::NoCatalogPath)?;

        let source = CatalogSource::from_path(path)?;
        self.catalog.rebuild(source)?;

        let current = self.catalog.snapshot();
        info!(
            path = %path.display(),
            types = current.type_count(),
            "Catalog reloaded"
        );
        Ok(current)
    }
}

impl std::fmt::Debug for BotRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotRuntime")
            .field("nick", &self.config.bot.nick)
            .field("dispatcher", &self.inner.dispatcher)
            .field("timeout", &self.inner.timeout)
            .field("cancelled", &self.shutdown.is_cancelled())
            .finish()
    }
}

/// Waits for Ctrl+C or SIGTERM.
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = signal::ctrl_c() => {
                        info!("Received Ctrl+C, shutting down");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down");
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to register SIGTERM handler");
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

fn load_catalog(config: &JavabotConfig) -> RuntimeResult<CatalogHandle> {
    match config.javadoc.catalog_path.as_deref() {
        Some(path) => {
            let catalog = ApiCatalog::from_path(path)?;
            info!(
                path = %path.display(),
                types = catalog.type_count(),
                "Catalog loaded"
            );
            Ok(CatalogHandle::new(catalog))
        }
        None => {
            warn!("No javadoc.catalog_path configured, starting with an empty catalog");
            Ok(CatalogHandle::default())
        }
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for [`BotRuntime`].
///
/// Without an explicit [`config`](Self::config), configuration is loaded
/// through a [`ConfigLoader`] searching the current directory.
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
    config: Option<JavabotConfig>,
    transport: Option<BoxedTransport>,
    catalog: Option<CatalogHandle>,
    operations: Vec<BoxedOperation>,
    init_logging: bool,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new().with_current_dir(),
            config: None,
            transport: None,
            catalog: None,
            operations: Vec::new(),
            init_logging: true,
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile (e.g., "development", "production").
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Uses a pre-loaded configuration instead of the loader.
    pub fn config(mut self, config: JavabotConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn shared_transport(mut self, transport: BoxedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Uses an existing catalog handle instead of loading `catalog_path`.
    pub fn catalog(mut self, catalog: CatalogHandle) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Registers an extra operation, checked after `javadoc`.
    pub fn operation<O: Operation + 'static>(mut self, operation: O) -> Self {
        self.operations.push(Arc::new(operation));
        self
    }

    /// Whether `build` installs the global subscriber (default: yes).
    pub fn init_logging(mut self, enabled: bool) -> Self {
        self.init_logging = enabled;
        self
    }

    pub fn build(self) -> RuntimeResult<BotRuntime> {
        let config = match self.config {
            Some(config) => {
                crate::config::validate_config(&config)?;
                config
            }
            None => self.config_loader.load()?,
        };

        if self.init_logging {
            logging::init_from_config(&config.logging);
        }

        let transport = self.transport.ok_or(RuntimeError::MissingTransport)?;
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => load_catalog(&config)?,
        };

        let javadoc = JavadocOperation::new(catalog.clone())
            .strategy(config.javadoc.delivery_strategy());
        let mut dispatcher = Dispatcher::new()
            .addressing(config.bot.addressing())
            .with(javadoc);
        for operation in self.operations {
            dispatcher.add_boxed(operation);
        }

        info!(
            nick = %config.bot.nick,
            log_level = %config.logging.level,
            operations = dispatcher.operation_count(),
            "Runtime initialized from configuration"
        );

        Ok(BotRuntime {
            limiter: Arc::new(Semaphore::new(config.runtime.max_concurrent_messages)),
            inner: Arc::new(RuntimeInner {
                dispatcher,
                transport,
                timeout: config.runtime.handler_timeout(),
            }),
            catalog,
            config,
            shutdown: CancellationToken::new(),
        })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
