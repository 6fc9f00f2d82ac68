//! Inbound messages and outbound replies.

/// A line of chat received by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Channel the message was said in. For private messages this is the
    /// sender's nick.
    pub channel: String,
    pub sender: String,
    pub text: String,
    /// Whether the message was sent to the bot directly.
    pub private: bool,
}

impl IncomingMessage {
    /// A message said in a channel.
    pub fn public(
        channel: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            sender: sender.into(),
            text: text.into(),
            private: false,
        }
    }

    /// A message sent privately to the bot.
    pub fn private(sender: impl Into<String>, text: impl Into<String>) -> Self {
        let sender = sender.into();
        Self {
            channel: sender.clone(),
            sender,
            text: text.into(),
            private: true,
        }
    }

    /// The same message with different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

/// One outbound message produced by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Said where the request came from.
    Public(String),
    /// Sent privately to `to`.
    Private { to: String, text: String },
}

impl Reply {
    pub fn public(text: impl Into<String>) -> Self {
        Self::Public(text.into())
    }

    pub fn private(to: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Private {
            to: to.into(),
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Public(text) | Self::Private { text, .. } => text,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private { .. })
    }
}
