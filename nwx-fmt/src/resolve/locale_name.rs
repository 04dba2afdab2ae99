//! Locale name resolver

use nwx_common::locale::{language_of, normalize_locale};
use nwx_common::Tag;

/// Best display name for `tag` at `locale`
///
/// Fallback order: exact normalized locale, language only, default name.
/// Translation keys match ignoring case and `_`/`-` spelling, so `fr_CA`
/// and `fr-ca` both serve `fr-CA`.
pub fn name<'t>(tag: &'t Tag, locale: &str) -> &'t str {
    let normalized = normalize_locale(locale);
    let language = language_of(&normalized);

    lookup(tag, &normalized)
        .or_else(|| lookup(tag, language))
        .unwrap_or(&tag.name)
}

fn lookup<'t>(tag: &'t Tag, wanted: &str) -> Option<&'t str> {
    let translations = &tag.translations.name;
    if let Some(found) = translations.get(wanted).filter(|s| !s.is_empty()) {
        return Some(found);
    }
    translations
        .iter()
        .find(|(key, value)| !value.is_empty() && key.trim().replace('_', "-").eq_ignore_ascii_case(wanted))
        .map(|(_, value)| value.as_str())
}
