//! Error types for catalog loading and Javadoc lookups.
//!
//! Every request-level error is local to one message: the operation turns it
//! into a single explanatory reply and nothing is retried.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors produced while turning a raw argument into a [`Query`](crate::Query).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unbalanced parentheses, an empty type path, or an empty parameter.
    #[error("malformed reference '{input}': {reason}")]
    Malformed {
        /// The argument as typed by the requester.
        input: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl ParseError {
    /// Creates a malformed-reference error.
    pub fn malformed(input: impl Into<String>, reason: &'static str) -> Self {
        Self::Malformed {
            input: input.into(),
            reason,
        }
    }
}

// =============================================================================
// Resolution Errors
// =============================================================================

/// Errors produced while resolving a query against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// A simple name matches classes in more than one package.
    #[error("'{name}' is ambiguous: {}", .candidates.join(", "))]
    AmbiguousType {
        /// The type path as queried.
        name: String,
        /// Fully-qualified candidates, in catalog order.
        candidates: Vec<String>,
    },

    /// A method was named without a parameter list.
    #[error("'{type_name}.{method}' needs a parameter list")]
    ParameterPatternRequired {
        /// The resolved declaring type.
        type_name: String,
        /// The method name.
        method: String,
    },

    /// Nothing in the catalog matches.
    #[error("no match for '{query}'")]
    NotFound {
        /// The query, rendered back as text.
        query: String,
    },
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors that can occur while loading or building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        /// Path of the catalog file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog source is not valid JSON for the expected schema.
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The source parsed but describes an unusable catalog.
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

impl CatalogError {
    /// Creates an invalid-catalog error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

// =============================================================================
// Umbrella Error
// =============================================================================

/// Any error a single Javadoc lookup can end with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JavadocError {
    /// The reference could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The reference parsed but did not resolve.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for reference parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for query resolution.
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// Result type for catalog loading.
pub type CatalogResult<T> = Result<T, CatalogError>;
