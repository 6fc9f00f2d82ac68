//! Type-name normalization shared by catalog building and query parsing.

/// Reduces a Java type reference to the simple name used for matching.
///
/// Package qualifiers and generic arguments are dropped; array brackets and
/// varargs dots are kept.
///
/// ```
/// use javabot_core::normalize::simple_type_name;
///
/// assert_eq!(simple_type_name("java.lang.String"), "String");
/// assert_eq!(simple_type_name("java.util.List<java.lang.String>"), "List");
/// assert_eq!(simple_type_name("java.lang.Object[]"), "Object[]");
/// assert_eq!(simple_type_name("Object..."), "Object...");
/// ```
pub fn simple_type_name(raw: &str) -> String {
    let stripped = strip_generics(raw);
    let cut = [stripped.find('['), stripped.find("...")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(stripped.len());
    let (base, suffix) = stripped.split_at(cut);
    let base = base.rsplit('.').next().unwrap_or(base);
    format!("{base}{suffix}")
}

/// Compares two normalized names, treating `T...` and `T[]` as the same type.
pub fn same_type(a: &str, b: &str) -> bool {
    a == b || a.replace("...", "[]") == b.replace("...", "[]")
}

/// Compares two normalized parameter lists, arity included.
pub fn same_params(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_type(x, y))
}

fn strip_generics(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() => {}
            c if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}
