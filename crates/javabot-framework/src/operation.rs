//! Operations: the unit of bot behaviour.
//!
//! An [`Operation`] pairs a trigger, which decides whether a message is meant
//! for it and extracts the argument text, with an execute step producing
//! replies. The Javadoc lookup is one operation; anything else (factoids,
//! karma, ...) registers the same way.
//!
//! # Example
//!
//! ```
//! use javabot_framework::{FnOperation, Reply, keyword};
//!
//! let ping = FnOperation::new("ping")
//!     .trigger(keyword("ping"))
//!     .execute(|_args, sender| vec![Reply::public(format!("{sender}: pong"))]);
//! ```

use std::{fmt, sync::Arc};

use crate::message::Reply;

/// Something the bot can do in response to a message.
pub trait Operation: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Returns the argument text when `text` is meant for this operation.
    fn trigger(&self, text: &str) -> Option<String>;

    /// Handles a triggered message.
    fn execute(&self, args: &str, sender: &str) -> Vec<Reply>;
}

/// A shared, type-erased operation.
pub type BoxedOperation = Arc<dyn Operation>;

/// A type-erased trigger function.
pub type TriggerFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A type-erased execute function.
pub type ExecuteFn = Arc<dyn Fn(&str, &str) -> Vec<Reply> + Send + Sync>;

/// Trigger matching a leading keyword, case-insensitively.
///
/// The argument text is whatever follows the keyword, trimmed.
pub fn keyword(word: impl Into<String>) -> impl Fn(&str) -> Option<String> + Send + Sync + 'static {
    let word = word.into();
    move |text: &str| {
        let text = text.trim_start();
        let (first, rest) = match text.find(char::is_whitespace) {
            Some(at) => text.split_at(at),
            None => (text, ""),
        };
        first
            .eq_ignore_ascii_case(&word)
            .then(|| rest.trim().to_string())
    }
}

#[derive(Clone)]
struct FnOperationInner {
    name: String,
    trigger: Option<TriggerFn>,
    execute: Option<ExecuteFn>,
}

/// An operation assembled from closures.
///
/// Without a trigger it never fires; without an execute step it fires and
/// replies with nothing, which still stops dispatch.
#[derive(Clone)]
pub struct FnOperation {
    inner: Arc<FnOperationInner>,
}

impl FnOperation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(FnOperationInner {
                name: name.into(),
                trigger: None,
                execute: None,
            }),
        }
    }

    fn inner_mut(&mut self) -> &mut FnOperationInner {
        Arc::make_mut(&mut self.inner)
    }

    pub fn trigger<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.inner_mut().trigger = Some(Arc::new(f));
        self
    }

    pub fn execute<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Vec<Reply> + Send + Sync + 'static,
    {
        self.inner_mut().execute = Some(Arc::new(f));
        self
    }
}

impl Operation for FnOperation {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn trigger(&self, text: &str) -> Option<String> {
        self.inner.trigger.as_ref().and_then(|f| f(text))
    }

    fn execute(&self, args: &str, sender: &str) -> Vec<Reply> {
        match &self.inner.execute {
            Some(f) => f(args, sender),
            None => Vec::new(),
        }
    }
}

impl fmt::Debug for FnOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperation")
            .field("name", &self.inner.name)
            .field("has_trigger", &self.inner.trigger.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_trigger() {
        let trigger = keyword("javadoc");
        assert_eq!(trigger("javadoc String").as_deref(), Some("String"));
        assert_eq!(trigger("  JavaDoc   Map.Entry  ").as_deref(), Some("Map.Entry"));
        assert_eq!(trigger("javadoc").as_deref(), Some(""));
        assert_eq!(trigger("javadocs String"), None);
        assert_eq!(trigger("see javadoc String"), None);
    }

    #[test]
    fn test_fn_operation() {
        let op = FnOperation::new("echo")
            .trigger(keyword("echo"))
            .execute(|args, sender| vec![Reply::public(format!("{sender}: {args}"))]);
        let op: &dyn Operation = &op;

        assert_eq!(op.name(), "echo");
        let args = op.trigger("echo hi there").unwrap();
        assert_eq!(op.execute(&args, "alice"), vec![Reply::public("alice: hi there")]);
        assert!(op.trigger("hello").is_none());
    }

    #[test]
    fn test_operation_without_trigger_never_fires() {
        let op = FnOperation::new("idle");
        let op: &dyn Operation = &op;
        assert!(op.trigger("anything").is_none());
        assert!(op.execute("", "alice").is_empty());
    }
}
