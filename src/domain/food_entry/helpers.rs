use std::sync::LazyLock;

use regex::Regex;

/// Standalone connector words removed from dish names. Word-boundary match
/// only, so "sandwich" and "android" are untouched.
static CONNECTOR_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:and|with|or)\b").expect("connector word pattern is valid"));

/// Canonical dedup key for a dish name.
///
/// Lowercases, strips standalone "and"/"with"/"or", and collapses
/// whitespace. Non-alphanumeric characters (accents, "&") pass through
/// unchanged. This function is the single basis of dish identity: every
/// place that compares dish names must go through it.
pub fn normalize_dish_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = CONNECTOR_WORDS.replace_all(&lowered, " ");

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
