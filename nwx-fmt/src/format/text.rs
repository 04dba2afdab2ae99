//! Plain-text field formatting
//!
//! Lengths are measured in characters, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|h[1-6]|li|tr|blockquote)\s*>").expect("valid regex")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid regex"));
static INLINE_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid regex"));
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").expect("valid regex"));

const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&#39;", "'"),
    ("&rsquo;", "\u{2019}"),
    ("&lsquo;", "\u{2018}"),
    ("&rdquo;", "\u{201d}"),
    ("&ldquo;", "\u{201c}"),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&hellip;", "\u{2026}"),
    // last, so "&amp;lt;" stays "&lt;"
    ("&amp;", "&"),
];

/// Keep whole words from the start of `text` within `max_length` characters
///
/// Text already within the limit is returned unchanged. Otherwise words are
/// appended (joined by single spaces) until the next one would overflow. A
/// first word longer than the limit yields the empty string.
pub fn truncate_at_word_boundary(text: &str, max_length: usize) -> String {
    if text.is_empty() || max_length == 0 {
        return String::new();
    }
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let mut out = String::new();
    let mut out_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if out.is_empty() { word_len } else { word_len + 1 };
        if out_len + needed > max_length {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        out_len += needed;
    }
    out
}

/// Render HTML markup as plain text
///
/// Block boundaries become line breaks, tags are dropped, character entities
/// are decoded and runs of blank lines collapse to one paragraph break.
pub fn html_to_text(html: &str) -> String {
    let with_breaks = BLOCK_BREAK.replace_all(html, "\n");
    let stripped = TAG.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);
    let spaced = INLINE_SPACE.replace_all(&decoded, " ");
    let lines: Vec<&str> = spaced.lines().map(str::trim).collect();
    let joined = lines.join("\n");
    BLANK_LINES.replace_all(&joined, "\n\n").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    let numeric = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let body = &caps[1];
        let code = match body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => body.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(|c| c.to_string())
            .unwrap_or_default()
    });
    let mut out = numeric.into_owned();
    for (entity, replacement) in NAMED_ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, replacement);
        }
    }
    out
}

/// Whitespace-separated word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Character count
pub fn char_length(text: &str) -> usize {
    text.chars().count()
}

/// Collapse all whitespace runs to single spaces
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_within_limit_unchanged() {
        assert_eq!(truncate_at_word_boundary("Budget tabled", 20), "Budget tabled");
    }

    #[test]
    fn test_truncate_at_word_boundary() {
        assert_eq!(
            truncate_at_word_boundary("The quick brown fox jumps", 15),
            "The quick brown"
        );
        assert_eq!(
            truncate_at_word_boundary("The quick brown fox jumps", 14),
            "The quick"
        );
    }

    #[test]
    fn test_truncate_empty_and_zero() {
        assert_eq!(truncate_at_word_boundary("", 10), "");
        assert_eq!(truncate_at_word_boundary("words", 0), "");
    }

    #[test]
    fn test_truncate_first_word_too_long() {
        assert_eq!(truncate_at_word_boundary("Supercalifragilistic word", 5), "");
    }

    #[test]
    fn test_truncate_counts_characters() {
        // 'é' is two bytes but one character
        assert_eq!(truncate_at_word_boundary("été à Montréal", 8), "été à");
    }

    #[test]
    fn test_html_to_text_paragraphs() {
        let html = "<p>First &amp; foremost.</p><p>Second<br/>line</p>";
        assert_eq!(html_to_text(html), "First & foremost.\nSecond\nline");
    }

    #[test]
    fn test_html_to_text_entities() {
        assert_eq!(html_to_text("caf&#233; &lt;b&gt; &#x41;"), "café <b> A");
        assert_eq!(html_to_text("a&nbsp;&nbsp;b"), "a b");
        assert_eq!(html_to_text("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_html_to_text_collapses_blank_lines() {
        let html = "<p>One</p>\n\n\n<p></p><p>Two</p>";
        assert_eq!(html_to_text(html), "One\n\nTwo");
    }

    #[test]
    fn test_word_count_and_length() {
        let text = html_to_text("<p>Three little words</p>");
        assert_eq!(word_count(&text), 3);
        assert_eq!(char_length(&text), 18);
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\n b\t\tc "), "a b c");
    }
}
