//! Writethrough ordinals
//!
//! Ordinal suffixes per language. English follows the usual st/nd/rd/th rule
//! with the 11-13 exception; French uses "er" for 1 and "ème" otherwise.

use nwx_common::Locale;

/// Localized ordinal of `n`, None for 0 (the lead carries no ordinal)
pub fn ordinal(n: u32, locale: Locale) -> Option<String> {
    if n == 0 {
        return None;
    }
    let suffix = match locale {
        Locale::EnCa => english_suffix(n),
        Locale::FrCa => french_suffix(n),
    };
    Some(format!("{}{}", n, suffix))
}

/// Same as [`ordinal`] for a raw locale string, unsupported locales as English
pub fn ordinal_for(n: u32, locale: &str) -> Option<String> {
    ordinal(n, Locale::parse(locale).unwrap_or_default())
}

fn english_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn french_suffix(n: u32) -> &'static str {
    if n == 1 {
        "er"
    } else {
        "ème"
    }
}

/// Lead versus writethrough category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritethruKind {
    Lead,
    Writethru,
}

impl WritethruKind {
    pub fn of(n: u32) -> Self {
        if n == 0 {
            WritethruKind::Lead
        } else {
            WritethruKind::Writethru
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (WritethruKind::Lead, Locale::EnCa) => "Lead",
            (WritethruKind::Lead, Locale::FrCa) => "Primeur",
            (WritethruKind::Writethru, Locale::EnCa) => "Writethru",
            (WritethruKind::Writethru, Locale::FrCa) => "Nouvelle version",
        }
    }
}
