//! Serialisable catalog source.
//!
//! The source is what gets loaded from disk and edited by API add/drop
//! commands; [`ApiCatalog`](super::ApiCatalog) is the indexed form built from it.

use std::{fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// All documented APIs, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(default)]
    pub apis: Vec<ApiSource>,
}

/// One documented API, e.g. the JDK or the Servlet API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSource {
    /// Tag shown in rendered entries, e.g. `JDK`.
    pub name: String,
    /// Prefix for relative class and method URLs.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassSource>,
}

/// One class; nested classes use a dotted name such as `Map.Entry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSource {
    #[serde(default)]
    pub package: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub methods: Vec<MethodSource>,
}

/// One method or constructor overload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSource {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    pub url: String,
}

impl CatalogSource {
    /// Reads a source from JSON.
    pub fn from_json<R: Read>(reader: R) -> CatalogResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads a source from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(std::io::BufReader::new(file))
    }

    /// Adds an API, replacing any API with the same name in place.
    pub fn with_api(mut self, api: ApiSource) -> Self {
        match self.apis.iter_mut().find(|a| a.name == api.name) {
            Some(existing) => *existing = api,
            None => self.apis.push(api),
        }
        self
    }

    /// Removes the API with the given name, reporting whether it existed.
    pub fn remove_api(&mut self, name: &str) -> bool {
        let before = self.apis.len();
        self.apis.retain(|a| a.name != name);
        self.apis.len() != before
    }

    pub fn api_names(&self) -> impl Iterator<Item = &str> {
        self.apis.iter().map(|a| a.name.as_str())
    }
}

impl ApiSource {
    /// Resolves a possibly relative URL against this API's base URL.
    pub fn absolute_url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !url.contains("://") => {
                format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
            }
            _ => url.to_string(),
        }
    }
}

impl ClassSource {
    /// Fully-qualified name, e.g. `java.util.Map.Entry`.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}
