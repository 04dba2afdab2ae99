//! # NWX Common Library
//!
//! Shared code for the NWX newswire export crates:
//! - Content item and tag models
//! - Vocabulary snapshots, sets and cache
//! - Content repository collaborator trait
//! - Error taxonomy and degraded-result type
//! - Configuration loading and logging bootstrap
//! - Timestamp utilities

pub mod config;
pub mod error;
pub mod locale;
pub mod logging;
pub mod model;
pub mod repository;
pub mod time;
pub mod vocabulary;

pub use config::FormatterConfig;
pub use error::{Degradation, Error, Resolved, Result};
pub use locale::Locale;
pub use model::{ContentItem, ItemKind, ItemPayload, Tag};
pub use repository::{ContentRepository, InMemoryRepository};
pub use vocabulary::{VocabularyCache, VocabularyProvider, VocabularySet, VocabularySnapshot};
