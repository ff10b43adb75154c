//! Identifier case conversion.
//!
//! DCC scripting hops between naming conventions constantly: node names in
//! PascalCase, attribute names in camelCase, file names in snake_case.
//! Converters for every direction between the three live here.

use once_cell::sync::Lazy;
use regex::Regex;

// Two-pass split used on the way to snake_case: first peel TitleCase words
// off their prefix (HTTPServer -> HTTP_Server), then split remaining
// lower-to-upper boundaries (fooBar -> foo_Bar).
static TITLE_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
static LOWER_UPPER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// `PascalCase` -> `snake_case`. Acronym-aware: `HTTPServer` -> `http_server`.
pub fn pascal_to_snake(s: &str) -> String {
    let pass1 = TITLE_WORD_RE.replace_all(s, "${1}_${2}");
    LOWER_UPPER_RE
        .replace_all(&pass1, "${1}_${2}")
        .to_lowercase()
}

/// `camelCase` -> `snake_case`.
pub fn camel_to_snake(s: &str) -> String {
    pascal_to_snake(s)
}

/// `PascalCase` -> `camelCase`.
pub fn pascal_to_camel(s: &str) -> String {
    lower_first(s)
}

/// `camelCase` -> `PascalCase`.
pub fn camel_to_pascal(s: &str) -> String {
    upper_first(s)
}

/// `snake_case` -> `PascalCase`.
pub fn snake_to_pascal(s: &str) -> String {
    s.split('_').filter(|w| !w.is_empty()).map(capitalize).collect()
}

/// `snake_case` -> `camelCase`.
pub fn snake_to_camel(s: &str) -> String {
    let mut words = s.split('_').filter(|w| !w.is_empty());
    let Some(first) = words.next() else {
        return String::new();
    };
    let mut out = first.to_lowercase();
    for word in words {
        out.push_str(&capitalize(word));
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
