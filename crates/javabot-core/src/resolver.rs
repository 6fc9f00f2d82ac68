//! Javadoc resolver: maps a [`Query`] onto catalog entries.

use tracing::trace;

use crate::{
    catalog::{ApiEntry, ApiIndex, TypeLookup},
    error::{ResolutionError, ResolutionResult},
    parser::{ParamPattern, Query},
};

/// Ordered, duplicate-free entries from a single declaring type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult<'a> {
    entries: Vec<&'a ApiEntry>,
}

impl<'a> MatchResult<'a> {
    /// Collects entries, dropping repeats of an earlier signature.
    pub fn from_entries(entries: impl IntoIterator<Item = &'a ApiEntry>) -> Self {
        let mut result = Self::default();
        for entry in entries {
            if !result.entries.iter().any(|e| same_signature(e, entry)) {
                result.entries.push(entry);
            }
        }
        result
    }

    pub fn entries(&self) -> &[&'a ApiEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ApiEntry> + '_ {
        self.entries.iter().copied()
    }
}

// Two entries name the same member when everything but the URL agrees.
fn same_signature(a: &ApiEntry, b: &ApiEntry) -> bool {
    a.api() == b.api()
        && a.declaring_type() == b.declaring_type()
        && a.method_name() == b.method_name()
        && a.parameter_types() == b.parameter_types()
}

/// Resolves a query. Never mutates the index.
pub fn resolve<'a, I: ApiIndex + ?Sized>(
    query: &Query,
    index: &'a I,
) -> ResolutionResult<MatchResult<'a>> {
    let ty = match index.lookup_type(&query.type_path) {
        TypeLookup::Found(ty) => ty,
        TypeLookup::Ambiguous(candidates) => {
            return Err(ResolutionError::AmbiguousType {
                name: query.type_name(),
                candidates,
            });
        }
        TypeLookup::Missing => return Err(not_found(query)),
    };
    trace!(query = %query, declaring_type = ty.class().declaring_type(), "Type resolved");

    let Some(method) = query.method.as_deref() else {
        return Ok(MatchResult::from_entries([ty.class()]));
    };

    let overloads = index.lookup_overloads(ty, method);
    if overloads.is_empty() {
        return Err(not_found(query));
    }

    match &query.params {
        ParamPattern::Unspecified => Err(ResolutionError::ParameterPatternRequired {
            type_name: ty.class().declaring_type().to_string(),
            method: method.to_string(),
        }),
        ParamPattern::Wildcard => Ok(MatchResult::from_entries(overloads)),
        ParamPattern::Exact(params) => index
            .lookup_exact(ty, method, params)
            .map(|entry| MatchResult::from_entries([entry]))
            .ok_or_else(|| not_found(query)),
    }
}

fn not_found(query: &Query) -> ResolutionError {
    ResolutionError::NotFound {
        query: query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{ApiCatalog, ApiSource, CatalogSource, ClassSource, MethodSource},
        parser::parse,
        test_support::sample_catalog,
    };

    fn lookup(raw: &str) -> ResolutionResult<Vec<String>> {
        let catalog = sample_catalog();
        let query = parse(raw, &catalog).unwrap();
        resolve(&query, &catalog).map(|m| m.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_exact_method() {
        let expected = ["http://is.gd/2ABgG [JDK: java.lang.String.split(String)]"];
        assert_eq!(lookup("String.split(String)").unwrap(), expected);
        assert_eq!(lookup("String.split(java.lang.String)").unwrap(), expected);
        assert_eq!(lookup("java.lang.String.split(String)").unwrap(), expected);
    }

    #[test]
    fn test_wildcard_returns_all_overloads_in_order() {
        assert_eq!(
            lookup("String.split(*)").unwrap(),
            [
                "http://is.gd/2ABgG [JDK: java.lang.String.split(String)]",
                "http://is.gd/2ABgH [JDK: java.lang.String.split(String,int)]",
            ]
        );
        assert_eq!(lookup("Cipher.doFinal(*)").unwrap().len(), 7);
    }

    #[test]
    fn test_nested_class() {
        assert_eq!(
            lookup("Map.Entry").unwrap(),
            ["http://is.gd/2ABgy [JDK: java.util.Map.Entry]"]
        );
    }

    #[test]
    fn test_varargs_accepts_array_syntax() {
        assert_eq!(
            lookup("String.format(String,Object[])").unwrap(),
            ["http://is.gd/2ABh0 [JDK: java.lang.String.format(String,Object...)]"]
        );
    }

    #[test]
    fn test_constructor() {
        assert_eq!(
            lookup("String(char[])").unwrap(),
            ["http://is.gd/2ABgB [JDK: java.lang.String.String(char[])]"]
        );
    }

    #[test]
    fn test_ambiguous_type() {
        assert_eq!(
            lookup("List.add(*)").unwrap_err(),
            ResolutionError::AmbiguousType {
                name: "List".into(),
                candidates: vec!["java.util.List".into(), "java.awt.List".into()],
            }
        );
        assert_eq!(lookup("java.awt.List.add(*)").unwrap().len(), 1);
    }

    #[test]
    fn test_method_without_params_requires_pattern() {
        assert_eq!(
            lookup("String.split").unwrap_err(),
            ResolutionError::ParameterPatternRequired {
                type_name: "java.lang.String".into(),
                method: "split".into(),
            }
        );
    }

    #[test]
    fn test_not_found_cases() {
        for raw in [
            "Strin.split(*)",
            "String.splat(*)",
            "String.splat",
            "String.split(int)",
            "String.split(String,int,int)",
            "Cipher.doFinal(short[])",
            "Nope",
        ] {
            assert!(
                matches!(lookup(raw), Err(ResolutionError::NotFound { .. })),
                "{raw:?} should not resolve"
            );
        }
    }

    #[test]
    fn test_match_result_deduplicates() {
        let catalog = sample_catalog();
        let entry = &catalog.entries()[0];
        let result = MatchResult::from_entries([entry, entry]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_wildcard_drops_repeated_signature() {
        let wait = |url: &str| MethodSource {
            name: "wait".into(),
            params: vec!["long".into()],
            url: url.into(),
        };
        let source = CatalogSource::default().with_api(ApiSource {
            name: "JDK".into(),
            base_url: None,
            classes: vec![ClassSource {
                package: "java.lang".into(),
                name: "Object".into(),
                url: "u0".into(),
                methods: vec![wait("first"), wait("second")],
            }],
        });
        let catalog = ApiCatalog::build(source).unwrap();

        let query = parse("Object.wait(*)", &catalog).unwrap();
        let result = resolve(&query, &catalog).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.entries()[0].short_url(), "first");
    }
}
