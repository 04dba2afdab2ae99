//! Credit line

/// Sources whose credit line is fixed regardless of the item credit
pub static WIRE_SERVICE_CREDITS: &[(&str, &str)] = &[
    ("CP", "THE CANADIAN PRESS"),
    ("PC", "LA PRESSE CANADIENNE"),
    ("AP", "THE ASSOCIATED PRESS"),
    ("AFP", "AGENCE FRANCE-PRESSE"),
    ("Reuters", "REUTERS"),
];

/// Fixed credit for a known wire service
pub fn wire_service_credit(source: &str) -> Option<&'static str> {
    let source = source.trim();
    WIRE_SERVICE_CREDITS
        .iter()
        .find(|(name, _)| *name == source)
        .map(|(_, credit)| *credit)
}

/// Credit line: wire-service table, then item credit, then source
pub fn format_credit(source: Option<&str>, credit: Option<&str>) -> String {
    let source = source.map(str::trim).filter(|s| !s.is_empty());
    let credit = credit.map(str::trim).filter(|s| !s.is_empty());

    if let Some(fixed) = source.and_then(wire_service_credit) {
        return fixed.to_string();
    }
    credit.or(source).unwrap_or_default().to_string()
}
