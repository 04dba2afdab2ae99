//! Content and tag models

mod item;
mod tag;

pub use item::{
    ContentItem, Dateline, ItemKind, ItemPayload, MediaPayload, PicturePayload, PublishStatus,
    Rendition, TextPayload, Urgency,
};
pub use tag::{CreatorKind, Tag, Translations};
