//! Shared catalog snapshot with atomic replacement.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::info;

use super::{
    index::ApiCatalog,
    source::{ApiSource, CatalogSource},
};
use crate::error::CatalogResult;

/// Cloneable handle to the current catalog snapshot.
///
/// Readers take an `Arc` snapshot and keep it for the whole request. Writers
/// build a complete new catalog off to the side and swap it in, so a
/// resolution in flight never observes a partially updated index.
#[derive(Debug, Clone, Default)]
pub struct CatalogHandle {
    current: Arc<RwLock<Arc<ApiCatalog>>>,
    // Serializes rebuilds so concurrent edits are not lost.
    update: Arc<Mutex<()>>,
}

impl CatalogHandle {
    pub fn new(catalog: ApiCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
            update: Arc::default(),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<ApiCatalog> {
        Arc::clone(&self.current.read())
    }

    /// Installs a new catalog, returning the previous snapshot.
    pub fn replace(&self, catalog: ApiCatalog) -> Arc<ApiCatalog> {
        let _guard = self.update.lock();
        self.swap(catalog)
    }

    /// Rebuilds the catalog from a new source.
    pub fn rebuild(&self, source: CatalogSource) -> CatalogResult<Arc<ApiCatalog>> {
        let catalog = ApiCatalog::build(source)?;
        Ok(self.replace(catalog))
    }

    /// Adds or replaces one API.
    pub fn install_api(&self, api: ApiSource) -> CatalogResult<()> {
        let _guard = self.update.lock();
        let name = api.name.clone();
        let source = self.snapshot().source().clone().with_api(api);
        self.swap(ApiCatalog::build(source)?);
        info!(api = %name, "API installed");
        Ok(())
    }

    /// Removes one API, reporting whether it was present.
    pub fn drop_api(&self, name: &str) -> CatalogResult<bool> {
        let _guard = self.update.lock();
        let mut source = self.snapshot().source().clone();
        if !source.remove_api(name) {
            return Ok(false);
        }
        self.swap(ApiCatalog::build(source)?);
        info!(api = %name, "API dropped");
        Ok(true)
    }

    fn swap(&self, catalog: ApiCatalog) -> Arc<ApiCatalog> {
        let next = Arc::new(catalog);
        info!(
            types = next.type_count(),
            entries = next.entries().len(),
            "Catalog snapshot swapped"
        );
        std::mem::replace(&mut *self.current.write(), next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ApiIndex, TypeLookup};
    use crate::test_support::sample_catalog;

    fn knows(catalog: &ApiCatalog, name: &str) -> bool {
        catalog.lookup_type(&[name.to_string()]).is_known()
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let handle = CatalogHandle::new(sample_catalog());
        let before = handle.snapshot();

        let previous = handle.replace(ApiCatalog::default());

        assert!(Arc::ptr_eq(&before, &previous));
        assert!(knows(&before, "Cipher"));
        assert!(!knows(&handle.snapshot(), "Cipher"));
    }

    #[test]
    fn test_drop_and_install_api() {
        let handle = CatalogHandle::new(sample_catalog());
        let servlet = handle
            .snapshot()
            .source()
            .apis
            .iter()
            .find(|a| a.name == "Servlet")
            .cloned()
            .unwrap();

        assert!(handle.drop_api("Servlet").unwrap());
        assert!(!handle.drop_api("Servlet").unwrap());
        assert_eq!(
            handle.snapshot().lookup_type(&["HttpServlet".to_string()]),
            TypeLookup::Missing
        );
        assert!(knows(&handle.snapshot(), "Cipher"));

        handle.install_api(servlet).unwrap();
        assert!(knows(&handle.snapshot(), "HttpServlet"));
    }

    #[test]
    fn test_default_handle_is_empty() {
        let handle = CatalogHandle::default();
        assert!(handle.snapshot().is_empty());
    }
}
