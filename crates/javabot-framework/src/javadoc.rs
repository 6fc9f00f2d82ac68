//! The `javadoc` operation.
//!
//! Pipeline: parse the argument, resolve it against the current catalog
//! snapshot, plan delivery, and turn the plan into replies. Every failure
//! becomes a single public reply.

use javabot_core::{
    CatalogHandle, DeliveryPlan, DeliveryStrategy, JavadocError, ParseError, ResolutionError,
    parse, resolve,
};
use tracing::debug;

use crate::{
    message::Reply,
    operation::{Operation, keyword},
};

/// Looks up Javadoc references.
#[derive(Debug, Clone)]
pub struct JavadocOperation {
    catalog: CatalogHandle,
    strategy: DeliveryStrategy,
}

impl JavadocOperation {
    /// The command keyword.
    pub const KEYWORD: &'static str = "javadoc";

    pub fn new(catalog: CatalogHandle) -> Self {
        Self {
            catalog,
            strategy: DeliveryStrategy::default(),
        }
    }

    pub fn strategy(mut self, strategy: DeliveryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Runs one lookup.
    pub fn lookup(&self, args: &str, sender: &str) -> Result<Vec<Reply>, JavadocError> {
        let catalog = self.catalog.snapshot();
        let query = parse(args, catalog.as_ref())?;
        let matches = resolve(&query, catalog.as_ref())?;
        debug!(query = %query, matches = matches.len(), "Javadoc query resolved");

        match self.strategy.plan(&matches, sender) {
            Some(plan) => Ok(plan_replies(&plan)),
            None => Err(ResolutionError::NotFound {
                query: query.to_string(),
            }
            .into()),
        }
    }
}

impl Operation for JavadocOperation {
    fn name(&self) -> &str {
        Self::KEYWORD
    }

    fn trigger(&self, text: &str) -> Option<String> {
        keyword(Self::KEYWORD)(text)
    }

    fn execute(&self, args: &str, sender: &str) -> Vec<Reply> {
        if args.is_empty() {
            return vec![Reply::public(usage(sender))];
        }
        match self.lookup(args, sender) {
            Ok(replies) => replies,
            Err(err) => {
                debug!(error = %err, "Javadoc lookup failed");
                vec![Reply::public(error_reply(&err, sender))]
            }
        }
    }
}

/// Turns a plan into replies: the notice first, then the private payload.
pub fn plan_replies(plan: &DeliveryPlan<'_>) -> Vec<Reply> {
    if let Some(inline) = plan.inline_reply() {
        return vec![Reply::public(inline)];
    }
    plan.notice()
        .map(Reply::public)
        .into_iter()
        .chain(
            plan.overflow_messages()
                .into_iter()
                .map(|chunk| Reply::private(plan.requester(), chunk)),
        )
        .collect()
}

fn usage(sender: &str) -> String {
    format!(
        "{sender}: usage: javadoc Class, javadoc Class.method(Type,...) or javadoc Class.method(*)"
    )
}

/// The text sent back for a failed lookup.
pub fn error_reply(err: &JavadocError, sender: &str) -> String {
    match err {
        JavadocError::Parse(ParseError::Malformed { input, reason }) => format!(
            "{sender}: I could not make sense of '{input}' ({reason}). {}",
            "Try javadoc Class, javadoc Class.method(Type,...) or javadoc Class.method(*)"
        ),
        JavadocError::Resolution(ResolutionError::AmbiguousType { name, candidates }) => format!(
            "{sender}: '{name}' is ambiguous, please qualify it: {}",
            candidates.join(", ")
        ),
        JavadocError::Resolution(ResolutionError::ParameterPatternRequired {
            type_name,
            method,
        }) => format!(
            "{sender}: please give parameter types, e.g. {type_name}.{method}(String) \
             or {type_name}.{method}(*) for every overload"
        ),
        JavadocError::Resolution(ResolutionError::NotFound { query }) => {
            format!("{sender}: I don't have any documentation for {query}")
        }
    }
}
