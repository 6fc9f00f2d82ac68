//! Reference parser.
//!
//! Turns the argument of a `javadoc` command into a [`Query`]:
//!
//! | input                  | type path        | method   | params                 |
//! |------------------------|------------------|----------|------------------------|
//! | `Map.Entry`            | `Map, Entry`     | -        | unspecified            |
//! | `String.split`         | `String`         | `split`  | unspecified            |
//! | `String.split(String)` | `String`         | `split`  | exact `[String]`       |
//! | `Cipher.doFinal(*)`    | `Cipher`         | `doFinal`| wildcard               |
//! | `String(char[])`       | `String`         | `String` | exact `[char[]]`       |
//!
//! Without a parameter list the catalog decides whether the last segment is a
//! nested type or a method.

use std::fmt;

use crate::{
    catalog::ApiIndex,
    error::{ParseError, ParseResult},
    normalize::simple_type_name,
};

/// How the parameter list of a method reference was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamPattern {
    /// No parentheses.
    Unspecified,
    /// Explicit parameter types, normalized to simple names.
    Exact(Vec<String>),
    /// `(*)`: every overload.
    Wildcard,
}

/// A parsed reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Dotted type path segments, possibly package qualified or nested.
    pub type_path: Vec<String>,
    pub method: Option<String>,
    pub params: ParamPattern,
}

impl Query {
    pub fn type_name(&self) -> String {
        self.type_path.join(".")
    }

    pub fn is_class_only(&self) -> bool {
        self.method.is_none()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())?;
        if let Some(method) = &self.method {
            write!(f, ".{method}")?;
        }
        match &self.params {
            ParamPattern::Unspecified => Ok(()),
            ParamPattern::Wildcard => f.write_str("(*)"),
            ParamPattern::Exact(params) => write!(f, "({})", params.join(",")),
        }
    }
}

/// Parses a raw reference, consulting `index` to tell nested types from
/// methods.
pub fn parse<I: ApiIndex + ?Sized>(raw: &str, index: &I) -> ParseResult<Query> {
    let input = raw.trim();
    let (path_text, params) = split_parameters(input)?;
    let segments = split_path(input, path_text)?;

    if params == ParamPattern::Unspecified
        && (segments.len() == 1 || index.lookup_type(&segments).is_known())
    {
        return Ok(Query {
            type_path: segments,
            method: None,
            params,
        });
    }

    let (method, type_path) = match segments.split_last() {
        // A lone name with parameters is a constructor.
        Some((last, [])) => (last.clone(), vec![last.clone()]),
        Some((last, rest)) => (last.clone(), rest.to_vec()),
        None => return Err(ParseError::malformed(input, "empty type name")),
    };

    Ok(Query {
        type_path,
        method: Some(method),
        params,
    })
}

fn split_parameters(input: &str) -> ParseResult<(&str, ParamPattern)> {
    let Some(open) = input.find('(') else {
        if input.contains(')') {
            return Err(ParseError::malformed(input, "')' without '('"));
        }
        return Ok((input, ParamPattern::Unspecified));
    };

    let rest = &input[open + 1..];
    let close = rest
        .find(')')
        .ok_or_else(|| ParseError::malformed(input, "missing ')'"))?;
    let inner = &rest[..close];
    let trailing = &rest[close + 1..];

    if inner.contains('(') {
        return Err(ParseError::malformed(input, "nested '('"));
    }
    if !trailing.trim().is_empty() {
        return Err(ParseError::malformed(input, "text after ')'"));
    }

    Ok((&input[..open], parse_param_list(input, inner)?))
}

fn parse_param_list(input: &str, inner: &str) -> ParseResult<ParamPattern> {
    let inner = inner.trim();
    if inner == "*" {
        return Ok(ParamPattern::Wildcard);
    }
    if inner.is_empty() {
        return Ok(ParamPattern::Exact(Vec::new()));
    }

    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ParseError::malformed(input, "unbalanced '>'"))?;
            }
            ',' if depth == 0 => {
                params.push(param_name(input, &inner[start..i])?);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ParseError::malformed(input, "unbalanced '<'"));
    }
    params.push(param_name(input, &inner[start..])?);

    Ok(ParamPattern::Exact(params))
}

fn param_name(input: &str, token: &str) -> ParseResult<String> {
    let token = token.trim();
    if token.is_empty() || token == "*" {
        return Err(ParseError::malformed(input, "empty parameter type"));
    }
    Ok(simple_type_name(token))
}

fn split_path(input: &str, path: &str) -> ParseResult<Vec<String>> {
    let path = path.trim();
    if path.is_empty() {
        return Err(ParseError::malformed(input, "empty type name"));
    }
    path.split('.')
        .map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                Err(ParseError::malformed(input, "empty name segment"))
            } else if !segment
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            {
                Err(ParseError::malformed(input, "invalid character in a name"))
            } else {
                Ok(segment.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;

    fn parsed(raw: &str) -> Query {
        parse(raw, &sample_catalog()).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_nested_class_is_class_only() {
        let query = parsed("Map.Entry");
        assert_eq!(query.type_path, strings(&["Map", "Entry"]));
        assert_eq!(query.method, None);
        assert_eq!(query.params, ParamPattern::Unspecified);
    }

    #[test]
    fn test_unknown_trailing_segment_is_method() {
        let query = parsed("String.split");
        assert_eq!(query.type_path, strings(&["String"]));
        assert_eq!(query.method.as_deref(), Some("split"));
        assert_eq!(query.params, ParamPattern::Unspecified);
    }

    #[test]
    fn test_ambiguous_path_still_counts_as_type() {
        let query = parsed("List");
        assert!(query.is_class_only());
        let query = parsed("java.awt.List");
        assert!(query.is_class_only());
    }

    #[test]
    fn test_exact_params_are_normalized() {
        let query = parsed("String.split(java.lang.String)");
        assert_eq!(query.params, ParamPattern::Exact(strings(&["String"])));

        let query = parsed("java.lang.String.format( java.util.Locale , String, Object... )");
        assert_eq!(query.type_path, strings(&["java", "lang", "String"]));
        assert_eq!(
            query.params,
            ParamPattern::Exact(strings(&["Locale", "String", "Object..."]))
        );
    }

    #[test]
    fn test_generic_commas_do_not_split() {
        let query = parsed("Collections.sort(List<Map<K,V>>, Comparator<? super T>)");
        assert_eq!(query.params, ParamPattern::Exact(strings(&["List", "Comparator"])));
    }

    #[test]
    fn test_wildcard_and_empty_params() {
        assert_eq!(parsed("Cipher.doFinal(*)").params, ParamPattern::Wildcard);
        assert_eq!(parsed("Cipher.doFinal( * )").params, ParamPattern::Wildcard);
        assert_eq!(parsed("Cipher.doFinal()").params, ParamPattern::Exact(Vec::new()));
    }

    #[test]
    fn test_single_name_with_params_is_constructor() {
        let query = parsed("String(char[])");
        assert_eq!(query.type_path, strings(&["String"]));
        assert_eq!(query.method.as_deref(), Some("String"));
        assert_eq!(query.params, ParamPattern::Exact(strings(&["char[]"])));
    }

    #[test]
    fn test_display_round_trips_shape() {
        assert_eq!(parsed("Cipher.doFinal(*)").to_string(), "Cipher.doFinal(*)");
        assert_eq!(
            parsed("String.split(java.lang.String, int)").to_string(),
            "String.split(String,int)"
        );
        assert_eq!(parsed("Map.Entry").to_string(), "Map.Entry");
    }

    #[test]
    fn test_malformed_inputs() {
        let catalog = sample_catalog();
        for raw in [
            "String.split(String",
            "String.split)String(",
            "String.split(String))",
            "String.split((String))",
            "String.split(String) extra",
            "String.split)",
            "String.split(String,)",
            "String.split(,int)",
            "String..split",
            ".split(*)",
            "(*)",
            "",
            "   ",
            "List<String>>.add(*)",
            "Collections.sort(List<T)",
            "Collections.sort(List>T<)",
            "String split",
        ] {
            assert!(
                matches!(parse(raw, &catalog), Err(ParseError::Malformed { .. })),
                "{raw:?} should be malformed"
            );
        }
    }
}
