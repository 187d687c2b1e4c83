//! Post-processing of generated text.

use std::sync::LazyLock;

use regex::Regex;

static ROLE_PREFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(label|name|archetype|cluster name)\s*:\s*").ok());

static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// First line only, no role prefix, collapsed whitespace, and no wrapping
/// quotes or trailing `.` / `,`.
pub fn clean_generated(raw: &str) -> String {
    let first_line = raw.trim().lines().next().unwrap_or("");

    let without_prefix = match ROLE_PREFIX.as_ref() {
        Some(re) => re.replace(first_line, "").into_owned(),
        None => first_line.to_string(),
    };
    let collapsed = match WHITESPACE.as_ref() {
        Some(re) => re.replace_all(&without_prefix, " ").into_owned(),
        None => without_prefix,
    };

    collapsed
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '.' | ','))
        .trim()
        .to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Capitalize each word and lowercase the rest of it.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
