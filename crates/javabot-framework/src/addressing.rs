//! Deciding whether a channel message is meant for the bot.
//!
//! In a channel the bot only answers text addressed to it:
//!
//! - `javabot: javadoc String`
//! - `javabot, javadoc String`
//! - `javabot javadoc String`
//! - `~javadoc String` (a command prefix)
//!
//! Private messages are always addressed.

use crate::message::IncomingMessage;

/// The bot's nick and command prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addressing {
    nick: String,
    prefixes: Vec<String>,
}

impl Addressing {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            prefixes: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            self.prefixes.push(prefix);
        }
        self
    }

    pub fn with_prefixes<I, S>(self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        prefixes.into_iter().fold(self, Self::with_prefix)
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns the message text with its address removed, or `None` when
    /// the message is not for the bot.
    pub fn strip<'a>(&self, message: &'a IncomingMessage) -> Option<&'a str> {
        let text = message.text.trim();

        if let Some(rest) = self.strip_nick(text) {
            return Some(rest);
        }
        if let Some(rest) = self
            .prefixes
            .iter()
            .find_map(|prefix| text.strip_prefix(prefix.as_str()))
        {
            return Some(rest.trim_start());
        }

        message.private.then_some(text)
    }

    fn strip_nick<'a>(&self, text: &'a str) -> Option<&'a str> {
        let head = text.get(..self.nick.len())?;
        if self.nick.is_empty() || !head.eq_ignore_ascii_case(&self.nick) {
            return None;
        }
        let rest = &text[self.nick.len()..];
        let rest = match rest.chars().next() {
            Some(':' | ',') => &rest[1..],
            Some(c) if c.is_whitespace() => rest,
            _ => return None,
        };
        Some(rest.trim_start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addressing() -> Addressing {
        Addressing::new("javabot").with_prefix("~")
    }

    fn channel(text: &str) -> IncomingMessage {
        IncomingMessage::public("#java", "alice", text)
    }

    #[test]
    fn test_nick_forms() {
        let a = addressing();
        for text in [
            "javabot: javadoc String",
            "javabot, javadoc String",
            "javabot javadoc String",
            "JavaBot:javadoc String",
            "  javabot:   javadoc String",
        ] {
            assert_eq!(a.strip(&channel(text)), Some("javadoc String"), "{text:?}");
        }
    }

    #[test]
    fn test_prefix() {
        let a = addressing();
        assert_eq!(a.strip(&channel("~javadoc Map.Entry")), Some("javadoc Map.Entry"));
        assert_eq!(a.strip(&channel("~ javadoc Map.Entry")), Some("javadoc Map.Entry"));
    }

    #[test]
    fn test_unaddressed_channel_text_is_ignored() {
        let a = addressing();
        assert_eq!(a.strip(&channel("javadoc String")), None);
        assert_eq!(a.strip(&channel("javabots are neat")), None);
        assert_eq!(a.strip(&channel("java")), None);
        assert_eq!(a.strip(&channel("")), None);
    }

    #[test]
    fn test_private_messages_are_always_addressed() {
        let a = addressing();
        let msg = IncomingMessage::private("alice", "javadoc String");
        assert_eq!(a.strip(&msg), Some("javadoc String"));
        let msg = IncomingMessage::private("alice", "~javadoc String");
        assert_eq!(a.strip(&msg), Some("javadoc String"));
    }

    #[test]
    fn test_multiple_prefixes() {
        let a = Addressing::new("javabot").with_prefixes(["~", "!", ""]);
        assert_eq!(a.prefixes(), ["~", "!"]);
        assert_eq!(a.strip(&channel("!javadoc String")), Some("javadoc String"));
    }
}
