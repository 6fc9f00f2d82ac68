//! # javabot framework
//!
//! Chat-facing layer of javabot:
//! - [`IncomingMessage`] and [`Reply`]
//! - the [`Operation`] trait and the closure-built [`FnOperation`]
//! - [`Addressing`], which decides whether channel text is meant for the bot
//! - the [`Dispatcher`], which routes a message to the first matching operation
//! - [`JavadocOperation`], the Javadoc lookup
//!
//! Nothing here does I/O; the runtime feeds messages in and sends replies out.

pub mod addressing;
pub mod dispatcher;
pub mod javadoc;
pub mod message;
pub mod operation;

pub use addressing::Addressing;
pub use dispatcher::Dispatcher;
pub use javadoc::{JavadocOperation, error_reply, plan_replies};
pub use message::{IncomingMessage, Reply};
pub use operation::{BoxedOperation, ExecuteFn, FnOperation, Operation, TriggerFn, keyword};
