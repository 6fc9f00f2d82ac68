//! API catalog: entries, the serialisable source, the indexed snapshot and
//! the shared handle used to swap snapshots at runtime.

mod entry;
mod handle;
mod index;
mod source;

pub use entry::ApiEntry;
pub use handle::CatalogHandle;
pub use index::{ApiCatalog, ApiIndex, TypeLookup, TypeRef};
pub use source::{ApiSource, CatalogSource, ClassSource, MethodSource};
