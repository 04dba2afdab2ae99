//! Vocabulary snapshots
//!
//! A [`VocabularySnapshot`] is an immutable view of one controlled vocabulary.
//! Snapshots are shared behind `Arc` and never mutated; a refresh publishes a
//! new instance, so transforms already holding the old one are unaffected.

use crate::error::Result;
use crate::model::Tag;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Immutable view of one controlled vocabulary
#[derive(Debug, Clone)]
pub struct VocabularySnapshot {
    id: String,
    items: Vec<Tag>,
    index: HashMap<String, usize>,
}

impl VocabularySnapshot {
    /// Build a snapshot from an ordered list of tags
    ///
    /// Each tag's `scheme` is set to `id`. On duplicate qcodes the first entry
    /// wins and the duplicate is logged and dropped.
    pub fn new(id: impl Into<String>, items: Vec<Tag>) -> Self {
        let id = id.into();
        let mut kept = Vec::with_capacity(items.len());
        let mut index = HashMap::with_capacity(items.len());
        for mut tag in items {
            if index.contains_key(&tag.qcode) {
                warn!("Vocabulary '{}': duplicate qcode '{}' dropped", id, tag.qcode);
                continue;
            }
            tag.scheme = id.clone();
            index.insert(tag.qcode.clone(), kept.len());
            kept.push(tag);
        }
        Self {
            id,
            items: kept,
            index,
        }
    }

    /// Parse the vocabulary collaborator's JSON shape
    ///
    /// Accepts either a bare array of records or `{"_id": .., "items": [..]}`.
    /// When the document carries its own id it overrides `id`.
    pub fn from_json(id: &str, json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Document {
            Wrapped {
                #[serde(default, alias = "_id")]
                id: Option<String>,
                items: Vec<Tag>,
            },
            Bare(Vec<Tag>),
        }

        let snapshot = match serde_json::from_str::<Document>(json)? {
            Document::Wrapped { id: doc_id, items } => {
                Self::new(doc_id.unwrap_or_else(|| id.to_string()), items)
            }
            Document::Bare(items) => Self::new(id, items),
        };
        debug!(
            "Loaded vocabulary '{}' with {} entries",
            snapshot.id,
            snapshot.items.len()
        );
        Ok(snapshot)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// O(1) lookup by qcode
    pub fn get(&self, qcode: &str) -> Option<&Tag> {
        self.index.get(qcode).map(|&i| &self.items[i])
    }

    pub fn contains(&self, qcode: &str) -> bool {
        self.index.contains_key(qcode)
    }

    /// Entries in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Snapshots handed to one assembly, keyed by scheme id
#[derive(Debug, Clone, Default)]
pub struct VocabularySet {
    snapshots: HashMap<String, Arc<VocabularySnapshot>>,
}

impl VocabularySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: Arc<VocabularySnapshot>) {
        self.snapshots.insert(snapshot.id().to_string(), snapshot);
    }

    /// Builder-style insert of an owned snapshot
    pub fn with(mut self, snapshot: VocabularySnapshot) -> Self {
        self.insert(Arc::new(snapshot));
        self
    }

    pub fn get(&self, scheme: &str) -> Option<&VocabularySnapshot> {
        self.snapshots.get(scheme).map(Arc::as_ref)
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.snapshots.contains_key(scheme)
    }
}

/// Vocabulary collaborator
pub trait VocabularyProvider: Send + Sync {
    /// Fetch the current state of vocabulary `id`, None when unknown
    fn get_vocabulary(&self, id: &str) -> Option<VocabularySnapshot>;
}

/// Process-wide cache in front of a [`VocabularyProvider`]
///
/// Lazily fetches each vocabulary once. `invalidate` and `refresh` replace the
/// cached `Arc`; readers holding the previous snapshot keep it.
pub struct VocabularyCache<P> {
    provider: P,
    entries: RwLock<HashMap<String, Arc<VocabularySnapshot>>>,
}

impl<P: VocabularyProvider> VocabularyCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached snapshot, fetching from the provider on first use
    pub fn get(&self, id: &str) -> Option<Arc<VocabularySnapshot>> {
        if let Some(hit) = self.read_entries().get(id) {
            return Some(Arc::clone(hit));
        }
        self.refresh(id)
    }

    /// Fetch a fresh snapshot and publish it
    ///
    /// When the provider no longer knows `id`, the cached entry is dropped.
    pub fn refresh(&self, id: &str) -> Option<Arc<VocabularySnapshot>> {
        match self.provider.get_vocabulary(id) {
            Some(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.write_entries()
                    .insert(id.to_string(), Arc::clone(&snapshot));
                debug!("Vocabulary '{}' published ({} entries)", id, snapshot.len());
                Some(snapshot)
            }
            None => {
                warn!("Vocabulary '{}' not available from provider", id);
                self.write_entries().remove(id);
                None
            }
        }
    }

    /// Drop the cached entry; the next `get` refetches
    pub fn invalidate(&self, id: &str) {
        self.write_entries().remove(id);
    }

    /// Drop every cached entry
    pub fn invalidate_all(&self) {
        self.write_entries().clear();
    }

    /// Collect snapshots for `ids`, skipping (and logging) unavailable ones
    pub fn snapshot_set<S: AsRef<str>>(&self, ids: &[S]) -> VocabularySet {
        let mut set = VocabularySet::new();
        for id in ids {
            if let Some(snapshot) = self.get(id.as_ref()) {
                set.insert(snapshot);
            }
        }
        set
    }

    fn read_entries(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<VocabularySnapshot>>> {
        // inserts are single operations, a poisoned map is still consistent
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_entries(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<VocabularySnapshot>>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
