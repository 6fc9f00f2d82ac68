//! Console Bot
//!
//! Runs javabot against the terminal. Every stdin line is a message in one
//! channel; replies are printed to stdout.
//!
//! ```text
//! ~javadoc String.split(*)          public message in the channel
//! javabot: javadoc Cipher.doFinal(*)
//! /msg javadoc Map.Entry            private message to the bot
//! :reload                           re-read the catalog file
//! :quit                             stop
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --package console-bot -- --catalog fixtures/jdk-sample.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use javabot::prelude::*;
use javabot::runtime::ConfigLoader;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "console-bot", about = "Talk to javabot from the terminal")]
struct Args {
    /// Configuration file (defaults to javabot.toml in the working directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON API catalog; overrides `javadoc.catalog_path`.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Bot nick; overrides `bot.nick`.
    #[arg(long)]
    nick: Option<String>,

    /// Channel the console pretends to be.
    #[arg(long, default_value = "#java")]
    channel: String,

    /// Nick used for your own lines.
    #[arg(long, default_value = "you")]
    sender: String,
}

// ============================================================================
// Transport
// ============================================================================

/// Prints replies instead of sending them anywhere.
struct ConsoleTransport {
    nick: String,
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send_public(&self, channel: &str, text: &str) -> RuntimeResult<()> {
        println!("[{channel}] <{}> {text}", self.nick);
        Ok(())
    }

    async fn send_private(&self, nick: &str, text: &str) -> RuntimeResult<()> {
        println!("[{} -> {nick}] {text}", self.nick);
        Ok(())
    }
}

// ============================================================================
// Input
// ============================================================================

async fn read_stdin(
    runtime: BotRuntime,
    tx: mpsc::Sender<IncomingMessage>,
    channel: String,
    sender: String,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let message = match line {
            "" => continue,
            ":quit" => {
                runtime.shutdown();
                break;
            }
            ":reload" => {
                match runtime.reload_catalog() {
                    Ok(catalog) => info!(types = catalog.type_count(), "Catalog reloaded"),
                    Err(e) => error!(error = %e, "Reload failed"),
                }
                continue;
            }
            _ => match line.strip_prefix("/msg ") {
                Some(text) => IncomingMessage::private(&sender, text),
                None => IncomingMessage::public(&channel, &sender, line),
            },
        };

        if tx.send(message).await.is_err() {
            break;
        }
    }

    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new().with_current_dir().with_user_config_dir();
    if let Some(path) = &args.config {
        loader = loader.file(path);
    }
    if let Some(path) = &args.catalog {
        loader = loader.set("javadoc.catalog_path", path);
    }
    if let Some(nick) = &args.nick {
        loader = loader.set("bot.nick", nick);
    }
    let config = loader.load().context("failed to load configuration")?;

    let runtime = BotRuntime::builder()
        .transport(ConsoleTransport {
            nick: config.bot.nick.clone(),
        })
        .config(config)
        .build()
        .context("failed to start javabot")?;

    let (tx, rx) = mpsc::channel(runtime.config().runtime.max_concurrent_messages);
    runtime.shutdown_on_signal();

    let input = tokio::spawn(read_stdin(
        runtime.clone(),
        tx,
        args.channel,
        args.sender,
    ));

    runtime.run(rx).await?;
    input.abort();

    Ok(())
}
