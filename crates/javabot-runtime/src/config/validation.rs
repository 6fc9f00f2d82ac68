//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{
    BotConfig, JavabotConfig, JavadocConfig, LogFormat, LogOutput, LoggingConfig, RuntimeConfig,
};

/// Smallest usable overflow message.
pub const MIN_MESSAGE_LEN: usize = 32;

/// Validates the entire configuration.
pub fn validate_config(config: &JavabotConfig) -> ConfigResult<()> {
    validate_bot_config(&config.bot)?;
    validate_javadoc_config(&config.javadoc)?;
    validate_runtime_config(&config.runtime)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_bot_config(bot: &BotConfig) -> ConfigResult<()> {
    if bot.nick.is_empty() {
        return Err(ConfigError::missing_field("bot.nick"));
    }

    if bot.nick.contains(char::is_whitespace) {
        return Err(ConfigError::validation("Bot nick cannot contain whitespace"));
    }

    if bot
        .command_prefixes
        .iter()
        .any(|p| p.is_empty() || p.contains(char::is_whitespace))
    {
        return Err(ConfigError::validation(
            "Command prefixes must be non-empty and contain no whitespace",
        ));
    }

    Ok(())
}

fn validate_javadoc_config(javadoc: &JavadocConfig) -> ConfigResult<()> {
    if javadoc.inline_limit == 0 {
        return Err(ConfigError::validation(
            "javadoc.inline_limit must be greater than 0",
        ));
    }

    if javadoc.max_message_len < MIN_MESSAGE_LEN {
        return Err(ConfigError::validation(format!(
            "javadoc.max_message_len must be at least {MIN_MESSAGE_LEN}"
        )));
    }

    Ok(())
}

fn validate_runtime_config(runtime: &RuntimeConfig) -> ConfigResult<()> {
    if runtime.max_concurrent_messages == 0 {
        return Err(ConfigError::validation(
            "runtime.max_concurrent_messages must be greater than 0",
        ));
    }

    if runtime.handler_timeout_ms == 0 {
        return Err(ConfigError::validation(
            "runtime.handler_timeout_ms must be greater than 0",
        ));
    }

    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if logging.format == LogFormat::Json && !cfg!(feature = "json-log") {
        return Err(ConfigError::validation(
            "JSON log format requires the json-log feature",
        ));
    }

    Ok(())
}
