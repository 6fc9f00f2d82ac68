//! The indexed, immutable catalog and the lookup seam consumed by the
//! parser and resolver.

use std::{collections::HashMap, io::Read, path::Path};

use tracing::{debug, warn};

use super::{
    entry::ApiEntry,
    source::{ApiSource, CatalogSource, ClassSource},
};
use crate::{
    error::{CatalogError, CatalogResult},
    normalize::{same_params, simple_type_name},
};

// =============================================================================
// Lookup Seam
// =============================================================================

/// Handle to a declaring type inside one index.
///
/// The id is only meaningful for the index that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRef<'a> {
    id: usize,
    class: &'a ApiEntry,
}

impl<'a> TypeRef<'a> {
    pub fn new(id: usize, class: &'a ApiEntry) -> Self {
        Self { id, class }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// The entry documenting the type itself.
    pub fn class(&self) -> &'a ApiEntry {
        self.class
    }
}

/// Outcome of looking up a (possibly nested, possibly qualified) type path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeLookup<'a> {
    Found(TypeRef<'a>),
    /// Fully-qualified names of every candidate, in catalog order.
    Ambiguous(Vec<String>),
    Missing,
}

impl TypeLookup<'_> {
    /// Whether the path names a type at all, uniquely or not.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Missing)
    }
}

/// Read access to an API catalog.
pub trait ApiIndex {
    /// Looks up a type by its dotted path segments.
    fn lookup_type(&self, path: &[String]) -> TypeLookup<'_>;

    /// All overloads of `method` declared on `ty`, in declaration order.
    fn lookup_overloads<'a>(&'a self, ty: TypeRef<'a>, method: &str) -> Vec<&'a ApiEntry>;

    /// The overload of `method` on `ty` with exactly these parameter types.
    fn lookup_exact<'a>(
        &'a self,
        ty: TypeRef<'a>,
        method: &str,
        params: &[String],
    ) -> Option<&'a ApiEntry>;
}

// =============================================================================
// ApiCatalog
// =============================================================================

#[derive(Debug, Clone)]
struct TypeRecord {
    class: usize,
    methods: Vec<usize>,
}

/// An immutable, indexed snapshot of a [`CatalogSource`].
#[derive(Debug, Clone, Default)]
pub struct ApiCatalog {
    source: CatalogSource,
    entries: Vec<ApiEntry>,
    types: Vec<TypeRecord>,
    by_name: HashMap<String, Vec<usize>>,
    by_suffix: HashMap<String, Vec<usize>>,
}

impl ApiCatalog {
    /// Indexes a catalog source.
    ///
    /// Every class is reachable by its fully-qualified name and by each
    /// trailing dotted suffix of its (possibly nested) simple name.
    pub fn build(source: CatalogSource) -> CatalogResult<Self> {
        let mut catalog = Self::default();
        let mut seen: HashMap<(String, String), usize> = HashMap::new();

        for api in &source.apis {
            if api.name.trim().is_empty() {
                return Err(CatalogError::invalid("API with an empty name"));
            }
            for class in &api.classes {
                catalog.add_class(api, class, &mut seen)?;
            }
        }

        debug!(
            apis = source.apis.len(),
            types = catalog.types.len(),
            entries = catalog.entries.len(),
            "Catalog built"
        );
        catalog.source = source;
        Ok(catalog)
    }

    /// Loads and indexes a JSON catalog source.
    pub fn from_json<R: Read>(reader: R) -> CatalogResult<Self> {
        Self::build(CatalogSource::from_json(reader)?)
    }

    /// Loads and indexes a JSON catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        Self::build(CatalogSource::from_path(path)?)
    }

    /// The source this snapshot was built from.
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[ApiEntry] {
        &self.entries
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add_class(
        &mut self,
        api: &ApiSource,
        class: &ClassSource,
        seen: &mut HashMap<(String, String), usize>,
    ) -> CatalogResult<()> {
        let segments: Vec<&str> = class.name.split('.').collect();
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(CatalogError::invalid(format!(
                "class '{}' in API '{}' has an empty name segment",
                class.name, api.name
            )));
        }
        let fqn = class.qualified_name();

        let type_id = match seen.get(&(api.name.clone(), fqn.clone())) {
            Some(&id) => {
                warn!(api = %api.name, class = %fqn, "Class declared twice, merging methods");
                id
            }
            None => {
                let id = self.types.len();
                let class_entry =
                    self.push_entry(ApiEntry::class(&api.name, &fqn, api.absolute_url(&class.url)));
                self.types.push(TypeRecord {
                    class: class_entry,
                    methods: Vec::new(),
                });
                seen.insert((api.name.clone(), fqn.clone()), id);

                self.by_name.entry(fqn.clone()).or_default().push(id);
                for start in 0..segments.len() {
                    let suffix = segments[start..].join(".");
                    if suffix != fqn {
                        self.by_suffix.entry(suffix).or_default().push(id);
                    }
                }
                id
            }
        };

        for method in &class.methods {
            if method.name.trim().is_empty() {
                return Err(CatalogError::invalid(format!(
                    "method with an empty name on '{fqn}'"
                )));
            }
            let params = method.params.iter().map(|p| simple_type_name(p)).collect();
            let entry = self.push_entry(ApiEntry::method(
                &api.name,
                &fqn,
                &method.name,
                params,
                api.absolute_url(&method.url),
            ));
            self.types[type_id].methods.push(entry);
        }
        Ok(())
    }

    fn push_entry(&mut self, entry: ApiEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    fn type_ref(&self, id: usize) -> TypeRef<'_> {
        TypeRef::new(id, &self.entries[self.types[id].class])
    }

    fn methods_of<'a>(&'a self, ty: TypeRef<'a>) -> impl Iterator<Item = &'a ApiEntry> + 'a {
        self.types
            .get(ty.id)
            .into_iter()
            .flat_map(|record| record.methods.iter())
            .map(|&i| &self.entries[i])
    }
}

impl ApiIndex for ApiCatalog {
    fn lookup_type(&self, path: &[String]) -> TypeLookup<'_> {
        let key = path.join(".");
        // A name can be one class's FQN and another's nested suffix at once.
        let mut ids: Vec<usize> = self
            .by_name
            .get(&key)
            .into_iter()
            .chain(self.by_suffix.get(&key))
            .flatten()
            .copied()
            .collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return TypeLookup::Missing;
        }

        // The same class published by several APIs is one type; the earliest
        // API wins.
        let mut names: Vec<&str> = Vec::new();
        for &id in &ids {
            let name = self.entries[self.types[id].class].declaring_type();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        match names.len() {
            1 => TypeLookup::Found(self.type_ref(ids[0])),
            _ => TypeLookup::Ambiguous(names.into_iter().map(str::to_string).collect()),
        }
    }

    fn lookup_overloads<'a>(&'a self, ty: TypeRef<'a>, method: &str) -> Vec<&'a ApiEntry> {
        self.methods_of(ty)
            .filter(|e| e.method_name() == Some(method))
            .collect()
    }

    fn lookup_exact<'a>(
        &'a self,
        ty: TypeRef<'a>,
        method: &str,
        params: &[String],
    ) -> Option<&'a ApiEntry> {
        let mut hits = self
            .methods_of(ty)
            .filter(|e| e.method_name() == Some(method) && same_params(e.parameter_types(), params));
        let first = hits.next()?;
        let extra = hits.count();
        if extra > 0 {
            warn!(
                signature = %first.signature(),
                duplicates = extra,
                "Duplicate signature in catalog, using first"
            );
        }
        Some(first)
    }
}
