//! Text branch fields
//!
//! Also used for video, audio and composite items, which carry the same
//! headline and body fields.

use crate::document::FieldSet;
use crate::format::text::{char_length, html_to_text, single_line, truncate_at_word_boundary, word_count};
use nwx_common::config::FormatterConfig;
use nwx_common::{ContentItem, ItemPayload};

/// Extra field replacing the headline on the wire
pub const HEADLINE_OVERRIDE_KEY: &str = "headline_override";

/// Append `Headline` through `DirectoryText`
///
/// `Headline` carries the edited override when one is set, `Headline2`
/// always the item's own headline. `DirectoryText` prefers the abstract
/// and falls back to the body.
pub fn append_fields(content: &mut FieldSet, item: &ContentItem, config: &FormatterConfig) {
    let original = item.headline.as_deref().unwrap_or_default();
    let headline = item.extra_value(HEADLINE_OVERRIDE_KEY).unwrap_or(original);
    content.push(
        "Headline",
        truncate_at_word_boundary(&single_line(headline), config.headline_max_length),
    );
    content.push(
        "Headline2",
        truncate_at_word_boundary(&single_line(original), config.headline_max_length),
    );

    let body = item.body_html.as_deref().map(html_to_text).unwrap_or_default();
    content.push("WordCount", word_count(&body).to_string());
    content.push("Length", char_length(&body).to_string());

    let summary = match &item.payload {
        ItemPayload::Text(text) => text.abstract_html.as_deref().map(html_to_text),
        _ => None,
    }
    .filter(|s| !s.trim().is_empty())
    .unwrap_or_else(|| body.clone());
    content.push(
        "DirectoryText",
        truncate_at_word_boundary(&single_line(&summary), config.directory_text_max_length),
    );
}
