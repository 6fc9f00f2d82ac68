//! The immutable catalog entry.

use std::fmt;

/// One documented class or method.
///
/// Entries are created while a catalog is built and never change afterwards;
/// everything downstream borrows them from the catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiEntry {
    api: String,
    declaring_type: String,
    method: Option<String>,
    params: Vec<String>,
    short_url: String,
}

impl ApiEntry {
    /// Creates the entry documenting a class itself.
    pub fn class(
        api: impl Into<String>,
        declaring_type: impl Into<String>,
        short_url: impl Into<String>,
    ) -> Self {
        Self {
            api: api.into(),
            declaring_type: declaring_type.into(),
            method: None,
            params: Vec::new(),
            short_url: short_url.into(),
        }
    }

    /// Creates the entry documenting one method overload.
    ///
    /// `params` are expected to be normalized simple names.
    pub fn method(
        api: impl Into<String>,
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        params: Vec<String>,
        short_url: impl Into<String>,
    ) -> Self {
        Self {
            api: api.into(),
            declaring_type: declaring_type.into(),
            method: Some(name.into()),
            params,
            short_url: short_url.into(),
        }
    }

    /// The API this entry belongs to, e.g. `JDK`.
    pub fn api(&self) -> &str {
        &self.api
    }

    /// Fully-qualified name of the declaring type.
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Method name, or `None` for a class entry.
    pub fn method_name(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Simple parameter type names in declaration order.
    pub fn parameter_types(&self) -> &[String] {
        &self.params
    }

    pub fn short_url(&self) -> &str {
        &self.short_url
    }

    pub fn is_class(&self) -> bool {
        self.method.is_none()
    }

    /// Canonical signature: `fqType` or `fqType.method(P1,P2)`.
    pub fn signature(&self) -> String {
        match &self.method {
            None => self.declaring_type.clone(),
            Some(name) => format!(
                "{}.{}({})",
                self.declaring_type,
                name,
                self.params.join(",")
            ),
        }
    }
}

impl fmt::Display for ApiEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}: {}]", self.short_url, self.api, self.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_entry_renders_type_only() {
        let entry = ApiEntry::class("JDK", "java.util.Map.Entry", "http://is.gd/2ABgy");
        assert!(entry.is_class());
        assert_eq!(entry.to_string(), "http://is.gd/2ABgy [JDK: java.util.Map.Entry]");
    }

    #[test]
    fn test_method_entry_joins_params_without_spaces() {
        let entry = ApiEntry::method(
            "JDK",
            "javax.crypto.Cipher",
            "doFinal",
            vec!["ByteBuffer".into(), "ByteBuffer".into()],
            "http://is.gd/ZwtI1c",
        );
        assert_eq!(
            entry.to_string(),
            "http://is.gd/ZwtI1c [JDK: javax.crypto.Cipher.doFinal(ByteBuffer,ByteBuffer)]"
        );

        let no_args = ApiEntry::method("JDK", "javax.crypto.Cipher", "doFinal", vec![], "u");
        assert_eq!(no_args.signature(), "javax.crypto.Cipher.doFinal()");
    }
}
