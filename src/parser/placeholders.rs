//! Placeholder extraction and flat substitution.
//!
//! A placeholder is `{{identifier}}` where the identifier matches
//! `[A-Za-z0-9_.-]+`, optionally padded with whitespace inside the braces.
//! There are no conditionals, loops or nesting: substitution is a single
//! pass over the markup.

use regex::{Captures, Regex};
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

/// Pattern matching a single `{{ name }}` token.
const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}";

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"))
}

/// Extracts placeholder names from markup.
///
/// Names are deduplicated and returned in first-occurrence order. Malformed
/// braces (e.g. an unmatched `{{`) simply produce no match.
///
/// # Examples
///
/// ```
/// use mailforge::parser::extract_placeholders;
///
/// let names = extract_placeholders("{{b}} {{ a }} {{b}} {{broken");
/// assert_eq!(names, vec!["b", "a"]);
/// ```
#[must_use]
pub fn extract_placeholders(code: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    placeholder_regex()
        .captures_iter(code)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .map(String::from)
        .collect()
}

/// Replaces every placeholder in `code` with its bound value.
///
/// Unbound placeholders resolve to the empty string. This never fails.
///
/// # Examples
///
/// ```
/// use mailforge::parser::substitute;
/// use std::collections::BTreeMap;
///
/// let mut values = BTreeMap::new();
/// values.insert("url".to_string(), "https://x/1.png".to_string());
///
/// let html = substitute("<img src='{{url}}' alt='{{ alt }}'>", &values);
/// assert_eq!(html, "<img src='https://x/1.png' alt=''>");
/// ```
#[must_use]
pub fn substitute(code: &str, values: &BTreeMap<String, String>) -> String {
    placeholder_regex()
        .replace_all(code, |caps: &Captures<'_>| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}
