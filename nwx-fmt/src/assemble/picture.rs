//! Picture branch fields and file naming

use crate::document::FieldSet;
use crate::format::codes::{join_keywords, PICTURE_KEYWORD_SEPARATOR};
use crate::format::text::{html_to_text, single_line};
use chrono_tz::Tz;
use nwx_common::model::PicturePayload;
use nwx_common::time::parse_instant;
use nwx_common::{ContentItem, ContentRepository, Result};
use tracing::{debug, warn};

/// Joins container ids
pub const CONTAINER_ID_SEPARATOR: &str = ", ";

/// Wire file name of a picture
///
/// Derived from the original rendition's storage key; without one, the
/// legacy `YYYY-MMDD-<external id>` pattern dated by first creation.
pub fn file_name(item: &ContentItem, tz: Tz) -> String {
    let key = item
        .picture_payload()
        .and_then(PicturePayload::original)
        .and_then(|r| r.storage_key.as_deref())
        .map(str::trim)
        .filter(|k| !k.is_empty());

    match key {
        Some(key) => rendition_file_name(key),
        None => legacy_file_name(item, tz),
    }
}

/// Storage key with its extension stripped and `/` replaced by `-`
pub fn rendition_file_name(key: &str) -> String {
    let name_start = key.rfind('/').map_or(0, |i| i + 1);
    let stem = match key[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &key[..name_start + dot],
        _ => key,
    };
    stem.replace('/', "-")
}

fn legacy_file_name(item: &ContentItem, tz: Tz) -> String {
    let id = item
        .picture_payload()
        .and_then(|p| p.external_id.as_deref())
        .filter(|id| !id.trim().is_empty())
        .unwrap_or(item.id.as_str());

    match item.firstcreated.as_deref().map(parse_instant) {
        Some(Ok(created)) => {
            let date = created.with_timezone(&tz).format("%Y-%m%d");
            format!("{}-{}", date, id)
        }
        Some(Err(err)) => {
            warn!("'{}' has an unreadable creation date, file name has no date: {}", item.id, err);
            id.to_string()
        }
        None => {
            debug!("'{}' has no creation date for its file name", item.id);
            id.to_string()
        }
    }
}

/// Append `Byline` through `Height`
pub fn append_fields(
    content: &mut FieldSet,
    item: &ContentItem,
    repository: &dyn ContentRepository,
) -> Result<()> {
    let default_payload = PicturePayload::default();
    let picture = item.picture_payload().unwrap_or(&default_payload);
    let text = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();

    content.push("Byline", text(&item.byline));
    content.push("BylineTitle", text(&picture.byline_title));
    content.push(
        "Caption",
        picture
            .caption
            .as_deref()
            .map(|c| single_line(&html_to_text(c)))
            .unwrap_or_default(),
    );
    content.push("CaptionWriter", text(&picture.caption_writer));
    content.push("Copyright", text(&picture.copyright_notice));
    content.push("UsageTerms", text(&picture.usage_terms));
    content.push("SpecialInstructions", text(&picture.special_instructions));
    content.push(
        "ArchiveSources",
        join_keywords(&picture.archive_sources, PICTURE_KEYWORD_SEPARATOR),
    );
    content.push("ContainerIDs", container_ids(item, repository)?);
    content.push("OrigTransRef", text(&picture.external_id));

    let original = picture.original();
    content.push(
        "MimeType",
        original
            .and_then(|r| r.mimetype.clone())
            .unwrap_or_default(),
    );
    content.push(
        "Width",
        original
            .and_then(|r| r.width)
            .map(|w| w.to_string())
            .unwrap_or_default(),
    );
    content.push(
        "Height",
        original
            .and_then(|r| r.height)
            .map(|h| h.to_string())
            .unwrap_or_default(),
    );
    Ok(())
}

/// Ids of published or corrected items embedding this picture
fn container_ids(item: &ContentItem, repository: &dyn ContentRepository) -> Result<String> {
    let ids: Vec<String> = repository
        .referencing_items(&item.id)?
        .into_iter()
        .filter(|container| container.publish_status.is_usable())
        .map(|container| container.id)
        .collect();
    Ok(ids.join(CONTAINER_ID_SEPARATOR))
}
