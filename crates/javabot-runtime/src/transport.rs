//! Outbound side of the chat connection.
//!
//! The network connection itself lives outside javabot; it implements
//! [`Transport`] and the runtime hands it every reply.

use std::sync::Arc;

use async_trait::async_trait;
use javabot_framework::{IncomingMessage, Reply};
use parking_lot::Mutex;
use tracing::trace;

use crate::error::RuntimeResult;

/// Sends text to the chat server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Says `text` in `channel`.
    async fn send_public(&self, channel: &str, text: &str) -> RuntimeResult<()>;

    /// Sends `text` privately to `nick`.
    async fn send_private(&self, nick: &str, text: &str) -> RuntimeResult<()>;
}

/// A shared, type-erased transport.
pub type BoxedTransport = Arc<dyn Transport>;

/// Sends a message's replies in order.
///
/// Public replies go back where the message came from: the channel, or the
/// sender for a private message.
pub async fn deliver(
    transport: &dyn Transport,
    message: &IncomingMessage,
    replies: &[Reply],
) -> RuntimeResult<()> {
    for reply in replies {
        match reply {
            Reply::Public(text) => transport.send_public(&message.channel, text).await?,
            Reply::Private { to, text } => transport.send_private(to, text).await?,
        }
        trace!(private = reply.is_private(), "Reply sent");
    }
    Ok(())
}

/// One message handed to a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Public { channel: String, text: String },
    Private { to: String, text: String },
}

impl SentMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Public { text, .. } | Self::Private { text, .. } => text,
        }
    }
}

/// Keeps every sent message in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<SentMessage>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Removes and returns everything sent so far.
    pub fn take(&self) -> Vec<SentMessage> {
        std::mem::take(&mut *self.sent.lock())
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_public(&self, channel: &str, text: &str) -> RuntimeResult<()> {
        self.sent.lock().push(SentMessage::Public {
            channel: channel.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_private(&self, nick: &str, text: &str) -> RuntimeResult<()> {
        self.sent.lock().push(SentMessage::Private {
            to: nick.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}
