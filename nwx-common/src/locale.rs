//! Supported output locales
//!
//! The legacy wire format knows exactly two locales. Anything else falls back
//! to the configured default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-CA")]
    EnCa,
    #[serde(rename = "fr-CA")]
    FrCa,
}

impl Locale {
    /// Canonical tag (`en-CA` / `fr-CA`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::EnCa => "en-CA",
            Locale::FrCa => "fr-CA",
        }
    }

    /// Language subtag (`en` / `fr`)
    pub fn language(&self) -> &'static str {
        match self {
            Locale::EnCa => "en",
            Locale::FrCa => "fr",
        }
    }

    /// Legacy numeric language code emitted in the `Language` field
    pub fn wire_code(&self) -> &'static str {
        match self {
            Locale::EnCa => "1",
            Locale::FrCa => "2",
        }
    }

    /// Parse a locale string, returning None when unsupported
    ///
    /// Accepts `fr`, `fr-CA`, `fr_CA` and any casing of the region.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_locale(raw);
        match normalized.to_ascii_lowercase().as_str() {
            "en-ca" => Some(Locale::EnCa),
            "fr-ca" => Some(Locale::FrCa),
            _ => None,
        }
    }

    /// Parse a locale string, falling back to `default` when unsupported or absent
    pub fn parse_or(raw: Option<&str>, default: Locale) -> Self {
        match raw.and_then(Locale::parse) {
            Some(locale) => locale,
            None => {
                if let Some(raw) = raw {
                    tracing::debug!("Unsupported locale '{}', using {}", raw, default);
                }
                default
            }
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a locale string for translation lookup
///
/// Underscores become hyphens. A bare `en` or `fr` gets its canonical region
/// appended. Other bare languages are returned as-is.
pub fn normalize_locale(raw: &str) -> String {
    let replaced = raw.trim().replace('_', "-");
    if replaced.contains('-') {
        return replaced;
    }
    match replaced.to_ascii_lowercase().as_str() {
        "en" => "en-CA".to_string(),
        "fr" => "fr-CA".to_string(),
        _ => replaced,
    }
}

/// Language part of a locale string (`fr-CA` → `fr`)
pub fn language_of(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}
