//! Core of javabot's Javadoc lookup.
//!
//! This crate has no notion of chat messages. It provides:
//!
//! - [`catalog`]: the API catalog, its lookup seam [`ApiIndex`], and the
//!   swappable [`CatalogHandle`]
//! - [`parser`]: raw reference text to [`Query`]
//! - [`resolver`]: [`Query`] to [`MatchResult`]
//! - [`delivery`]: [`MatchResult`] to an inline or overflow [`DeliveryPlan`]
//!
//! # Example
//!
//! ```
//! use javabot_core::{ApiCatalog, DeliveryStrategy, parse, resolve};
//!
//! let json = r#"{"apis": [{"name": "JDK", "classes": [{
//!     "package": "java.lang", "name": "String", "url": "http://is.gd/2ABgA",
//!     "methods": [{"name": "split", "params": ["java.lang.String"], "url": "http://is.gd/2ABgG"}]
//! }]}]}"#;
//! let catalog = ApiCatalog::from_json(json.as_bytes()).unwrap();
//!
//! let query = parse("String.split(String)", &catalog).unwrap();
//! let matches = resolve(&query, &catalog).unwrap();
//! let plan = DeliveryStrategy::default().plan(&matches, "alice").unwrap();
//!
//! assert_eq!(
//!     plan.inline_reply().unwrap(),
//!     "alice: http://is.gd/2ABgG [JDK: java.lang.String.split(String)]"
//! );
//! ```

pub mod catalog;
pub mod delivery;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod resolver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{
    ApiCatalog, ApiEntry, ApiIndex, ApiSource, CatalogHandle, CatalogSource, ClassSource,
    MethodSource, TypeLookup, TypeRef,
};
pub use delivery::{DeliveryPlan, DeliveryStrategy, overflow_notice};
pub use error::{
    CatalogError, CatalogResult, JavadocError, ParseError, ParseResult, ResolutionError,
    ResolutionResult,
};
pub use parser::{ParamPattern, Query, parse};
pub use resolver::{MatchResult, resolve};
