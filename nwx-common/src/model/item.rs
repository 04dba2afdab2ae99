//! Content item records
//!
//! A [`ContentItem`] carries the fields shared by every item type plus a
//! type-specific [`ItemPayload`]. Items are read-only for the formatter;
//! anything derived during assembly lives in a separate working copy.

use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::model::tag::Tag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Editorial urgency, 1 (highest) through 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Urgency(u8);

impl Urgency {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Clamp an arbitrary value into 1-8
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Urgency {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Urgency::new(value).ok_or_else(|| format!("urgency {} outside 1-8", value))
    }
}

impl From<Urgency> for u8 {
    fn from(value: Urgency) -> Self {
        value.0
    }
}

/// Workflow state of an item in the content repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    #[default]
    Draft,
    InProgress,
    Published,
    Corrected,
    Killed,
    Recalled,
    Spiked,
}

impl PublishStatus {
    /// Published content other items may legitimately point at
    pub fn is_usable(&self) -> bool {
        matches!(self, PublishStatus::Published | PublishStatus::Corrected)
    }
}

/// Where the story was filed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Dateline {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// A stored binary rendition of a media item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Rendition {
    /// Storage reference, e.g. `2020/0807/5f2d12c8-jpeg.jpg`
    #[serde(default, alias = "media")]
    pub storage_key: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Text-only fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextPayload {
    /// Short summary used for directory text when present
    #[serde(default)]
    pub abstract_html: Option<String>,
}

/// Picture-only fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PicturePayload {
    #[serde(default)]
    pub byline_title: Option<String>,
    #[serde(default, alias = "description_text")]
    pub caption: Option<String>,
    #[serde(default)]
    pub caption_writer: Option<String>,
    #[serde(default)]
    pub copyright_notice: Option<String>,
    #[serde(default)]
    pub usage_terms: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub archive_sources: Vec<String>,
    /// Original transmission reference from the supplying agency
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub renditions: BTreeMap<String, Rendition>,
}

impl PicturePayload {
    pub fn original(&self) -> Option<&Rendition> {
        self.renditions.get("original")
    }
}

/// Video and audio fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MediaPayload {
    #[serde(default)]
    pub renditions: BTreeMap<String, Rendition>,
    #[serde(default)]
    pub duration_secs: Option<u32>,
}

/// Type-specific payload, tagged by the item's `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemPayload {
    Text(TextPayload),
    Picture(PicturePayload),
    Video(MediaPayload),
    Audio(MediaPayload),
    Composite,
}

/// Item type without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Text,
    Picture,
    Video,
    Audio,
    Composite,
}

impl ItemKind {
    /// Lower-case type name as used on the repository side
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Picture => "picture",
            ItemKind::Video => "video",
            ItemKind::Audio => "audio",
            ItemKind::Composite => "composite",
        }
    }

    /// Capitalized label for the `ContentType` wire field
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Text => "Text",
            ItemKind::Picture => "Picture",
            ItemKind::Video => "Video",
            ItemKind::Audio => "Audio",
            ItemKind::Composite => "Composite",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An approved editorial item as handed over by the content repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(alias = "guid", alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub payload: ItemPayload,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub slugline: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub byline: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub credit: Option<String>,
    #[serde(default)]
    pub ednote: Option<String>,
    /// Every attached tag, across all schemes
    #[serde(default)]
    pub subject: Vec<Tag>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub dateline: Option<Dateline>,
    #[serde(default)]
    pub associations: BTreeMap<String, ContentItem>,
    /// Id of the item this one rewrites
    #[serde(default)]
    pub rewrite_of: Option<String>,
    /// Writethrough number; 0 for the lead
    #[serde(default)]
    pub rewrite_sequence: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub firstcreated: Option<String>,
    #[serde(default)]
    pub versioncreated: Option<String>,
    #[serde(default)]
    pub embargo: Option<String>,
    #[serde(default)]
    pub publish_status: PublishStatus,
    /// Free-form overrides keyed by field name
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl ContentItem {
    /// Create an item with the given payload and no other fields set
    pub fn new(id: impl Into<String>, payload: ItemPayload) -> Self {
        Self {
            id: id.into(),
            payload,
            headline: None,
            slugline: None,
            body_html: None,
            byline: None,
            source: None,
            credit: None,
            ednote: None,
            subject: Vec::new(),
            keywords: Vec::new(),
            dateline: None,
            associations: BTreeMap::new(),
            rewrite_of: None,
            rewrite_sequence: 0,
            language: None,
            urgency: None,
            firstcreated: None,
            versioncreated: None,
            embargo: None,
            publish_status: PublishStatus::default(),
            extra: BTreeMap::new(),
        }
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, ItemPayload::Text(TextPayload::default()))
    }

    pub fn picture(id: impl Into<String>) -> Self {
        Self::new(id, ItemPayload::Picture(PicturePayload::default()))
    }

    /// Parse a repository JSON document
    ///
    /// A missing `type` or id is reported as [`Error::MissingIdentifier`]
    /// rather than a generic decode failure.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let has_id = ["id", "guid", "_id"].iter().any(|key| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false)
        });
        if !has_id {
            return Err(Error::MissingIdentifier("item has no id".to_string()));
        }
        if value.get("type").and_then(|v| v.as_str()).is_none() {
            return Err(Error::MissingIdentifier("item has no type".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn kind(&self) -> ItemKind {
        match self.payload {
            ItemPayload::Text(_) => ItemKind::Text,
            ItemPayload::Picture(_) => ItemKind::Picture,
            ItemPayload::Video(_) => ItemKind::Video,
            ItemPayload::Audio(_) => ItemKind::Audio,
            ItemPayload::Composite => ItemKind::Composite,
        }
    }

    pub fn is_picture(&self) -> bool {
        self.kind() == ItemKind::Picture
    }

    pub fn picture_payload(&self) -> Option<&PicturePayload> {
        match &self.payload {
            ItemPayload::Picture(p) => Some(p),
            _ => None,
        }
    }

    /// Fail when the item cannot be identified at all
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::MissingIdentifier("item has no id".to_string()));
        }
        Ok(())
    }

    /// Output locale of the item, `default` when absent or unsupported
    pub fn locale(&self, default: Locale) -> Locale {
        Locale::parse_or(self.language.as_deref(), default)
    }

    /// Attached tags belonging to `scheme`, in item order
    pub fn tags_in<'a>(&'a self, scheme: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.subject.iter().filter(move |t| t.scheme == scheme)
    }

    /// Non-empty extra field
    pub fn extra_value(&self, key: &str) -> Option<&str> {
        self.extra
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_bounds() {
        assert!(Urgency::new(0).is_none());
        assert_eq!(Urgency::new(1).map(|u| u.get()), Some(1));
        assert_eq!(Urgency::new(8).map(|u| u.get()), Some(8));
        assert!(Urgency::new(9).is_none());
    }

    #[test]
    fn test_from_json_text_item() {
        let json = r#"{
            "guid": "urn:text:1",
            "type": "text",
            "headline": "Budget tabled",
            "abstract_html": "<p>Short</p>",
            "urgency": 3,
            "subject": [{"qcode": "a", "scheme": "subject_custom", "name": "A"}],
            "extra": {"headline_override": "Budget"}
        }"#;
        let item = ContentItem::from_json(json).unwrap();
        assert_eq!(item.id, "urn:text:1");
        assert_eq!(item.kind(), ItemKind::Text);
        assert_eq!(item.urgency.map(|u| u.get()), Some(3));
        assert_eq!(item.subject.len(), 1);
        match &item.payload {
            ItemPayload::Text(p) => assert_eq!(p.abstract_html.as_deref(), Some("<p>Short</p>")),
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_from_json_picture_item() {
        let json = r#"{
            "id": "pic-1",
            "type": "picture",
            "description_text": "A caption",
            "renditions": {"original": {"media": "2020/0807/5f2d12c8-jpeg.jpg", "mimetype": "image/jpeg"}}
        }"#;
        let item = ContentItem::from_json(json).unwrap();
        let picture = item.picture_payload().unwrap();
        assert_eq!(picture.caption.as_deref(), Some("A caption"));
        assert_eq!(
            picture.original().and_then(|r| r.storage_key.as_deref()),
            Some("2020/0807/5f2d12c8-jpeg.jpg")
        );
    }

    #[test]
    fn test_from_json_missing_type_is_fatal() {
        let err = ContentItem::from_json(r#"{"id": "x"}"#).unwrap_err();
        assert!(matches!(err, Error::MissingIdentifier(_)));
    }

    #[test]
    fn test_from_json_missing_id_is_fatal() {
        let err = ContentItem::from_json(r#"{"type": "text"}"#).unwrap_err();
        assert!(matches!(err, Error::MissingIdentifier(_)));
    }

    #[test]
    fn test_from_json_rejects_out_of_range_urgency() {
        let result = ContentItem::from_json(r#"{"id": "x", "type": "text", "urgency": 12}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_validate_empty_id() {
        let item = ContentItem::text("  ");
        assert!(matches!(item.validate(), Err(Error::MissingIdentifier(_))));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ContentItem::text("a").kind().label(), "Text");
        assert_eq!(ContentItem::picture("a").kind().label(), "Picture");
        assert_eq!(ItemKind::Composite.as_str(), "composite");
    }

    #[test]
    fn test_publish_status_usable() {
        assert!(PublishStatus::Published.is_usable());
        assert!(PublishStatus::Corrected.is_usable());
        assert!(!PublishStatus::Killed.is_usable());
        assert!(!PublishStatus::Draft.is_usable());
    }

    #[test]
    fn test_extra_value_ignores_blank() {
        let mut item = ContentItem::text("a");
        item.extra.insert("k".into(), "  ".into());
        item.extra.insert("j".into(), "v".into());
        assert_eq!(item.extra_value("k"), None);
        assert_eq!(item.extra_value("j"), Some("v"));
    }
}
