//! Content repository collaborator
//!
//! The formatter only reads from the repository: rewrite-chain climbing and
//! the "which items reference this picture" lookup. Calls are blocking and
//! never retried here; an `Err` aborts the transform so the caller can retry it.

use crate::error::Result;
use crate::model::ContentItem;
use std::collections::HashMap;

/// Read access to stored content items
pub trait ContentRepository: Send + Sync {
    /// Item by id, `Ok(None)` when it does not exist
    fn find_item(&self, id: &str) -> Result<Option<ContentItem>>;

    /// Items whose associations point at `id`
    fn referencing_items(&self, id: &str) -> Result<Vec<ContentItem>>;
}

/// Repository held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    items: HashMap<String, ContentItem>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: ContentItem) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn with(mut self, item: ContentItem) -> Self {
        self.insert(item);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ContentRepository for InMemoryRepository {
    fn find_item(&self, id: &str) -> Result<Option<ContentItem>> {
        Ok(self.items.get(id).cloned())
    }

    fn referencing_items(&self, id: &str) -> Result<Vec<ContentItem>> {
        let mut found: Vec<ContentItem> = self
            .items
            .values()
            .filter(|item| item.associations.values().any(|assoc| assoc.id == id))
            .cloned()
            .collect();
        // HashMap order is unstable; callers emit these ids
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_item() {
        let repo = InMemoryRepository::new().with(ContentItem::text("a"));
        assert!(repo.find_item("a").unwrap().is_some());
        assert!(repo.find_item("b").unwrap().is_none());
    }

    #[test]
    fn test_referencing_items_sorted() {
        let picture = ContentItem::picture("pic");
        let mut story_b = ContentItem::text("story-b");
        story_b
            .associations
            .insert("featuremedia".into(), picture.clone());
        let mut story_a = ContentItem::text("story-a");
        story_a.associations.insert("embedded1".into(), picture);

        let repo = InMemoryRepository::new()
            .with(story_b)
            .with(story_a)
            .with(ContentItem::text("unrelated"));

        let ids: Vec<_> = repo
            .referencing_items("pic")
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["story-a", "story-b"]);
    }
}
