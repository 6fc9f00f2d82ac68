//! Configuration schema definitions.
//!
//! ```toml
//! [bot]
//! nick = "javabot"
//! command_prefixes = ["~"]
//!
//! [javadoc]
//! catalog_path = "fixtures/jdk-sample.json"
//! inline_limit = 6
//! max_message_len = 400
//!
//! [runtime]
//! max_concurrent_messages = 64
//! handler_timeout_ms = 5000
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! output = "stdout"
//!
//! [logging.filters]
//! javabot_core = "debug"
//! ```

use std::{collections::HashMap, fmt, path::PathBuf, time::Duration};

use javabot_core::DeliveryStrategy;
use javabot_framework::Addressing;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JavabotConfig {
    #[serde(default)]
    pub bot: BotConfig,

    #[serde(default)]
    pub javadoc: JavadocConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// =============================================================================
// Bot
// =============================================================================

/// Identity of the bot in the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Nick the bot answers to.
    #[serde(default = "default_nick")]
    pub nick: String,

    /// Prefixes that address the bot without naming it, e.g. `~javadoc`.
    #[serde(default = "default_command_prefixes")]
    pub command_prefixes: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            nick: default_nick(),
            command_prefixes: default_command_prefixes(),
        }
    }
}

impl BotConfig {
    pub fn addressing(&self) -> Addressing {
        Addressing::new(&self.nick).with_prefixes(self.command_prefixes.iter().cloned())
    }
}

fn default_nick() -> String {
    "javabot".to_string()
}

fn default_command_prefixes() -> Vec<String> {
    vec!["~".to_string()]
}

// =============================================================================
// Javadoc
// =============================================================================

/// Catalog location and delivery limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavadocConfig {
    /// JSON catalog to load at startup and on reload.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Largest result set answered inline in the channel.
    #[serde(default = "default_inline_limit")]
    pub inline_limit: usize,

    /// Upper bound for one private overflow message, in bytes.
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

impl Default for JavadocConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            inline_limit: default_inline_limit(),
            max_message_len: default_max_message_len(),
        }
    }
}

impl JavadocConfig {
    pub fn delivery_strategy(&self) -> DeliveryStrategy {
        DeliveryStrategy::new(self.inline_limit).with_max_message_len(self.max_message_len)
    }
}

fn default_inline_limit() -> usize {
    javabot_core::delivery::DEFAULT_INLINE_LIMIT
}

fn default_max_message_len() -> usize {
    javabot_core::delivery::DEFAULT_MAX_MESSAGE_LEN
}

// =============================================================================
// Runtime
// =============================================================================

/// Message processing limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Messages handled at the same time.
    #[serde(default = "default_max_concurrent_messages")]
    pub max_concurrent_messages: usize,

    /// Time allowed for delivering one message's replies.
    #[serde(default = "default_handler_timeout_ms")]
    pub handler_timeout_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_concurrent_messages: default_max_concurrent_messages(),
            handler_timeout_ms: default_handler_timeout_ms(),
        }
    }
}

impl RuntimeConfig {
    pub fn handler_timeout(&self) -> Duration {
        Duration::from_millis(self.handler_timeout_ms)
    }
}

fn default_max_concurrent_messages() -> usize {
    64
}

fn default_handler_timeout_ms() -> u64 {
    5000
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature.
    Json,
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// When a log file is rolled over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file, required when `output = "file"`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    #[serde(default)]
    pub rotation: LogRotation,

    #[serde(default)]
    pub thread_ids: bool,

    /// Include file and line of each event.
    #[serde(default)]
    pub file_location: bool,

    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Per-module levels, e.g. `javabot_core = "debug"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JavabotConfig::default();
        assert_eq!(config.bot.nick, "javabot");
        assert_eq!(config.bot.command_prefixes, ["~"]);
        assert_eq!(config.javadoc.inline_limit, 6);
        assert_eq!(config.javadoc.max_message_len, 400);
        assert_eq!(config.runtime.max_concurrent_messages, 64);
        assert_eq!(config.runtime.handler_timeout(), Duration::from_secs(5));
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_derived_components() {
        let config = JavabotConfig::default();
        let addressing = config.bot.addressing();
        assert_eq!(addressing.nick(), "javabot");
        assert_eq!(addressing.prefixes(), ["~"]);

        let strategy = config.javadoc.delivery_strategy();
        assert_eq!(strategy.inline_limit(), 6);
        assert_eq!(strategy.max_message_len(), 400);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Debug.as_str(), "debug");
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Error.to_string(), "error");
    }
}
