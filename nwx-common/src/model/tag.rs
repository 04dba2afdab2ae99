//! Controlled-vocabulary tag records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who attached the tag to the item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreatorKind {
    #[default]
    Human,
    Machine,
}

/// Per-locale translations of tag fields
///
/// Shaped `{"name": {"fr-CA": "..."}}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Translations {
    #[serde(default)]
    pub name: BTreeMap<String, String>,
}

/// One controlled-vocabulary entry, either attached to an item or held in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Identifier, unique within `scheme`
    pub qcode: String,
    /// Vocabulary id this tag belongs to
    #[serde(default)]
    pub scheme: String,
    /// Default display name
    #[serde(default)]
    pub name: String,
    /// Parent qcode in the same scheme
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub translations: Translations,
    /// Tagging confidence, only meaningful for machine tags
    #[serde(default)]
    pub relevance: Option<f32>,
    #[serde(default)]
    pub creator: CreatorKind,
    /// Usable in legacy wire output
    #[serde(default, rename = "eligible_for_legacy")]
    pub eligible: bool,
}

impl Tag {
    /// Create an ineligible, human-created tag with no parent
    pub fn new(scheme: impl Into<String>, qcode: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qcode: qcode.into(),
            scheme: scheme.into(),
            name: name.into(),
            parent: None,
            translations: Translations::default(),
            relevance: None,
            creator: CreatorKind::Human,
            eligible: false,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn eligible(mut self) -> Self {
        self.eligible = true;
        self
    }

    pub fn with_translation(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.translations.name.insert(locale.into(), name.into());
        self
    }

    /// Mark as machine-created with the given relevance
    pub fn machine(mut self, relevance: f32) -> Self {
        self.creator = CreatorKind::Machine;
        self.relevance = Some(relevance);
        self
    }

    pub fn is_machine(&self) -> bool {
        self.creator == CreatorKind::Machine
    }
}
