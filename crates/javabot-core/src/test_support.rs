//! Sample catalog shared by tests across the workspace.

use crate::catalog::{ApiCatalog, CatalogHandle};

/// The bundled sample catalog as JSON.
pub const SAMPLE_CATALOG_JSON: &str = include_str!("../../../fixtures/jdk-sample.json");

/// Builds the sample catalog.
///
/// # Panics
///
/// Panics if the bundled fixture is invalid.
pub fn sample_catalog() -> ApiCatalog {
    ApiCatalog::from_json(SAMPLE_CATALOG_JSON.as_bytes()).expect("bundled sample catalog is valid")
}

/// A handle holding the sample catalog.
pub fn sample_handle() -> CatalogHandle {
    CatalogHandle::new(sample_catalog())
}
