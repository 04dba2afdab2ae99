//! Code list cleanup and joining

use std::collections::HashSet;

/// Separator for `IndexCode`
pub const INDEX_CODE_SEPARATOR: &str = ",";
/// Keyword glue for text items
pub const TEXT_KEYWORD_SEPARATOR: &str = ",";
/// Keyword glue for picture items
pub const PICTURE_KEYWORD_SEPARATOR: &str = ", ";

/// Remove duplicates and entries failing `keep`, preserving first-seen order
///
/// Comparison is case-sensitive: `"Health"` and `"HEALTH"` are distinct.
pub fn dedup_filter<S, F>(items: &[S], keep: F) -> Vec<String>
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    let mut seen: HashSet<&str> = HashSet::new();
    items
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|item| keep(*item))
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}

/// Non-empty and starting with an uppercase letter
pub fn is_capitalized(value: &str) -> bool {
    value.chars().next().map(char::is_uppercase).unwrap_or(false)
}

/// Index codes ready for emission: capitalized, non-empty, deduplicated
pub fn filter_indexes<S: AsRef<str>>(codes: &[S]) -> Vec<String> {
    dedup_filter(codes, is_capitalized)
}

/// Join keywords with `separator`, dropping blanks and duplicates
pub fn join_keywords<S: AsRef<str>>(keywords: &[S], separator: &str) -> String {
    let trimmed: Vec<&str> = keywords.iter().map(|k| k.as_ref().trim()).collect();
    dedup_filter(&trimmed, |k| !k.is_empty()).join(separator)
}
