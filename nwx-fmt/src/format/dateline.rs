//! Dateline block and placeline

use nwx_common::model::Dateline;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Place names normalized before emission
///
/// Applied independently to city, province and country. Downstream systems
/// only recognize the right-hand labels.
pub static PLACE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("Newfoundland", "Newfoundland and Labrador"),
    ("Labrador", "Newfoundland and Labrador"),
    ("Yukon Territory", "Yukon"),
    ("Northwest Territory", "Northwest Territories"),
    ("PEI", "Prince Edward Island"),
    ("P.E.I.", "Prince Edward Island"),
    ("Washington, D.C.", "District of Columbia"),
    ("Hong Kong SAR", "Hong Kong"),
    ("Macau SAR", "Macau"),
];

static PLACE_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PLACE_SUBSTITUTIONS.iter().copied().collect());

/// Placeline separator
pub const PLACELINE_SEPARATOR: &str = ";";

/// Dateline fields as emitted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedDateline {
    pub city: String,
    pub province: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

impl FormattedDateline {
    /// Non-empty city, province and country joined by `;`
    pub fn placeline(&self) -> String {
        [&self.city, &self.province, &self.country]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(PLACELINE_SEPARATOR)
    }
}

/// Apply the substitution table to one place name
pub fn substitute_place(name: &str) -> String {
    let trimmed = name.trim();
    PLACE_LOOKUP
        .get(trimmed)
        .map(|s| s.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Format the item dateline; an absent dateline yields empty fields
pub fn format_dateline(dateline: Option<&Dateline>) -> FormattedDateline {
    let Some(dateline) = dateline else {
        return FormattedDateline::default();
    };
    let place = |value: &Option<String>| value.as_deref().map(substitute_place).unwrap_or_default();
    FormattedDateline {
        city: place(&dateline.city),
        province: place(&dateline.state),
        country: place(&dateline.country),
        latitude: dateline.lat.map(format_coordinate).unwrap_or_default(),
        longitude: dateline.lon.map(format_coordinate).unwrap_or_default(),
    }
}

fn format_coordinate(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}
