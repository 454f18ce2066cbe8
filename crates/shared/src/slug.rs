//! URL slug derivation.

use regex::Regex;

lazy_static::lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9 -]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-+").unwrap();
}

/// Derives a URL-safe slug from an arbitrary title.
///
/// The result only contains `[a-z0-9-]`, never starts or ends with a hyphen
/// and never contains two hyphens in a row. Applying it twice gives the same
/// result as applying it once.
///
/// ```
/// use shared::slug::slugify;
///
/// assert_eq!(slugify("Hello, World! 2024"), "hello-world-2024");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Returns true if `value` is already in canonical slug form.
pub fn is_slug(value: &str) -> bool {
    !value.is_empty() && slugify(value) == value
}
