//! Message dispatcher.
//!
//! The [`Dispatcher`] holds operations in registration order. For each
//! message it:
//!
//! 1. Strips the bot address, if addressing is configured, and drops
//!    messages not meant for the bot
//! 2. Tries each operation's trigger in registration order
//! 3. Executes the first operation that triggers, and only that one
//!
//! ```
//! use javabot_framework::{Addressing, Dispatcher, FnOperation, IncomingMessage, Reply, keyword};
//!
//! let dispatcher = Dispatcher::new()
//!     .addressing(Addressing::new("javabot").with_prefix("~"))
//!     .with(
//!         FnOperation::new("ping")
//!             .trigger(keyword("ping"))
//!             .execute(|_, sender| vec![Reply::public(format!("{sender}: pong"))]),
//!     );
//!
//! let replies = dispatcher.dispatch(&IncomingMessage::public("#java", "alice", "~ping"));
//! assert_eq!(replies, Some(vec![Reply::public("alice: pong")]));
//! ```

use std::{
    convert::Infallible,
    future::{Ready, ready},
    sync::Arc,
    task::{Context, Poll},
};

use tower::Service;
use tracing::{Level, debug, span, trace};

use crate::{
    addressing::Addressing,
    message::{IncomingMessage, Reply},
    operation::{BoxedOperation, Operation},
};

/// Routes messages to the first matching operation.
///
/// `Dispatcher` is `Send + Sync` and cheap to clone.
#[derive(Default, Clone)]
pub struct Dispatcher {
    operations: Vec<BoxedOperation>,
    addressing: Option<Addressing>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only handle messages addressed to the bot, with the address removed.
    pub fn addressing(mut self, addressing: Addressing) -> Self {
        self.addressing = Some(addressing);
        self
    }

    /// Registers an operation. Operations are tried in the order they are
    /// added.
    pub fn add<O: Operation + 'static>(&mut self, operation: O) {
        self.operations.push(Arc::new(operation));
    }

    /// Registers a pre-built shared operation.
    pub fn add_boxed(&mut self, operation: BoxedOperation) {
        self.operations.push(operation);
    }

    /// Registers an operation (builder pattern).
    pub fn with<O: Operation + 'static>(mut self, operation: O) -> Self {
        self.add(operation);
        self
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(|op| op.name())
    }

    pub fn clear(&mut self) {
        self.operations.clear();
    }

    /// Dispatches one message.
    ///
    /// Returns `None` when the message is not addressed to the bot or no
    /// operation triggers; otherwise the replies of the single operation that
    /// handled it.
    pub fn dispatch(&self, message: &IncomingMessage) -> Option<Vec<Reply>> {
        let span = span!(
            Level::DEBUG,
            "dispatch",
            channel = %message.channel,
            sender = %message.sender
        );
        let _enter = span.enter();

        let text = match &self.addressing {
            Some(addressing) => match addressing.strip(message) {
                Some(text) => text,
                None => {
                    trace!("Message not addressed to the bot, ignoring");
                    return None;
                }
            },
            None => message.text.trim(),
        };

        for operation in &self.operations {
            let Some(args) = operation.trigger(text) else {
                trace!(operation = operation.name(), "Trigger did not match");
                continue;
            };

            let replies = operation.execute(&args, &message.sender);
            debug!(
                operation = operation.name(),
                replies = replies.len(),
                "Operation handled message"
            );
            return Some(replies);
        }

        debug!("No operation matched");
        None
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("operation_count", &self.operations.len())
            .field("addressing", &self.addressing)
            .finish()
    }
}

// ============================================================================
// Tower Service Implementation for Dispatcher
// ============================================================================

/// Lets tower middleware wrap the dispatcher.
///
/// Dispatch is synchronous, so the future is always ready.
impl Service<IncomingMessage> for Dispatcher {
    type Response = Option<Vec<Reply>>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, message: IncomingMessage) -> Self::Future {
        ready(Ok(self.dispatch(&message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{FnOperation, keyword};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    fn counting(name: &str, word: &str, counter: Arc<AtomicUsize>, step: usize) -> FnOperation {
        let label = name.to_string();
        FnOperation::new(name)
            .trigger(keyword(word))
            .execute(move |args, _| {
                counter.fetch_add(step, Ordering::SeqCst);
                vec![Reply::public(format!("{label}:{args}"))]
            })
    }

    fn channel(text: &str) -> IncomingMessage {
        IncomingMessage::public("#java", "alice", text)
    }

    #[test]
    fn test_dispatch_no_operations() {
        let dispatcher = Dispatcher::new();
        assert_eq!(dispatcher.dispatch(&channel("javadoc String")), None);
    }

    #[test]
    fn test_first_matching_operation_wins() {
        let counter = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new()
            .with(counting("first", "javadoc", Arc::clone(&counter), 1))
            .with(counting("second", "javadoc", Arc::clone(&counter), 10));

        let replies = dispatcher.dispatch(&channel("javadoc Map")).unwrap();

        assert_eq!(replies, vec![Reply::public("first:Map")]);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_later_operation_runs_when_earlier_does_not_trigger() {
        let counter = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new()
            .with(counting("factoid", "forget", Arc::clone(&counter), 1))
            .with(counting("javadoc", "javadoc", Arc::clone(&counter), 10));

        let replies = dispatcher.dispatch(&channel("javadoc List")).unwrap();

        assert_eq!(replies, vec![Reply::public("javadoc:List")]);
        assert_eq!(counter.load(Ordering::SeqCst), 10);
        assert_eq!(dispatcher.operation_names().collect::<Vec<_>>(), ["factoid", "javadoc"]);
    }

    #[test]
    fn test_addressing_gates_dispatch() {
        let counter = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new()
            .addressing(Addressing::new("javabot").with_prefix("~"))
            .with(counting("javadoc", "javadoc", Arc::clone(&counter), 1));

        assert_eq!(dispatcher.dispatch(&channel("javadoc String")), None);
        assert!(dispatcher.dispatch(&channel("javabot: javadoc String")).is_some());
        assert!(dispatcher.dispatch(&channel("~javadoc String")).is_some());
        assert!(
            dispatcher
                .dispatch(&IncomingMessage::private("alice", "javadoc String"))
                .is_some()
        );
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_dispatcher_as_service() {
        let counter = Arc::new(AtomicUsize::new(0));
        let dispatcher =
            Dispatcher::new().with(counting("javadoc", "javadoc", Arc::clone(&counter), 1));

        let replies = tokio_test::block_on(dispatcher.clone().oneshot(channel("javadoc Cipher")));
        assert_eq!(replies, Ok(Some(vec![Reply::public("javadoc:Cipher")])));

        let replies = tokio_test::block_on(dispatcher.oneshot(channel("hello")));
        assert_eq!(replies, Ok(None));
    }
}
