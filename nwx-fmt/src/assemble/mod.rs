//! Document assembler
//!
//! Turns one approved content item plus its vocabulary snapshots into one or
//! more wire documents:
//!
//! `Start -> TagsResolved -> FieldsFormatted -> TypeBranch -> Assembled`
//!
//! Missing upstream data never fails the transform. Each recovered condition
//! is returned as a [`Degradation`] alongside the documents. Only an item
//! without an id, a repository failure or a configuration error is fatal.

pub mod fanout;
pub mod picture;
pub mod rewrite;
mod tags;
pub mod text;

use crate::document::{FieldSet, OutputDocument};
use crate::format::codes::{
    filter_indexes, join_keywords, INDEX_CODE_SEPARATOR, PICTURE_KEYWORD_SEPARATOR,
    TEXT_KEYWORD_SEPARATOR,
};
use crate::format::credit::format_credit;
use crate::format::dateline::format_dateline;
use crate::format::datetime::format_timestamp_field;
use crate::format::ordinal::{ordinal, WritethruKind};
use crate::format::ranking::{effective_urgency, ranking_label};
use crate::resolve::HierarchyResolver;
use chrono_tz::Tz;
use nwx_common::config::FormatterConfig;
use nwx_common::{
    ContentItem, ContentRepository, Degradation, ItemKind, Locale, Result, Tag, VocabularySet,
};
use std::fmt;
use tags::TagContext;
use tracing::{debug, info};

/// Assembly progress, logged at each transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    TagsResolved,
    FieldsFormatted,
    TypeBranch(Branch),
    Assembled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Start => f.write_str("start"),
            Stage::TagsResolved => f.write_str("tags resolved"),
            Stage::FieldsFormatted => f.write_str("fields formatted"),
            Stage::TypeBranch(branch) => write!(f, "{:?} branch", branch),
            Stage::Assembled => f.write_str("assembled"),
        }
    }
}

/// Type-specific field set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Text,
    Picture,
}

impl Branch {
    /// Pictures have their own field set; everything else is laid out as text
    pub fn of(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Picture => Branch::Picture,
            ItemKind::Text | ItemKind::Video | ItemKind::Audio | ItemKind::Composite => Branch::Text,
        }
    }
}

/// Output of one assembly
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub documents: Vec<OutputDocument>,
    pub degradations: Vec<Degradation>,
}

impl Assembly {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    /// Degradations as a JSON array, for audit logs
    pub fn degradations_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.degradations)?)
    }
}

/// Builds wire documents from content items
#[derive(Debug, Clone)]
pub struct Assembler {
    config: FormatterConfig,
    tz: Tz,
    resolver: HierarchyResolver,
}

impl Assembler {
    /// Validate `config` and resolve its timezone
    pub fn new(config: FormatterConfig) -> Result<Self> {
        config.validate()?;
        let tz = config.tz()?;
        let resolver = HierarchyResolver::new(config.max_hierarchy_depth);
        Ok(Self {
            config,
            tz,
            resolver,
        })
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Assemble `item` against `vocabularies`
    ///
    /// The repository is consulted for the rewrite chain (text file name) and
    /// for containers referencing a picture.
    pub fn assemble(
        &self,
        item: &ContentItem,
        vocabularies: &VocabularySet,
        repository: &dyn ContentRepository,
    ) -> Result<Assembly> {
        item.validate()?;
        self.enter(item, Stage::Start);

        let locale = item.locale(self.config.default_locale);
        let mut degradations = Vec::new();
        let mut tags = TagContext::new(vocabularies);

        let working = tags.resolve_subject(item, &self.resolver, &self.config, &mut degradations)?;
        self.enter(item, Stage::TagsResolved);

        let branch = Branch::of(item.kind());
        let file_name = match branch {
            Branch::Picture => picture::file_name(item, self.tz),
            Branch::Text => {
                rewrite::original_of(item, repository, self.config.max_rewrite_hops)?
                    .record(&mut degradations)
                    .id
            }
        };
        let mut content = self.common_fields(
            item,
            &working,
            &mut tags,
            locale,
            file_name,
            branch,
            &mut degradations,
        );
        self.enter(item, Stage::FieldsFormatted);

        match branch {
            Branch::Text => text::append_fields(&mut content, item, &self.config),
            Branch::Picture => picture::append_fields(&mut content, item, repository)?,
        }
        self.enter(item, Stage::TypeBranch(branch));

        let services = tags.services(
            &working,
            &self.config.schemes.service,
            locale,
            &mut degradations,
        );
        let documents = fanout::fan_out(content, &services, &self.config.default_service_code);
        self.enter(item, Stage::Assembled);

        info!(
            "Assembled '{}' into {} document(s), {} degradation(s)",
            item.id,
            documents.len(),
            degradations.len()
        );
        Ok(Assembly {
            documents,
            degradations,
        })
    }

    fn enter(&self, item: &ContentItem, stage: Stage) {
        debug!("'{}': {}", item.id, stage);
    }

    /// Fields shared by every item type, `ContentType` through `WriteThruType`
    #[allow(clippy::too_many_arguments)]
    fn common_fields(
        &self,
        item: &ContentItem,
        working: &[Tag],
        tags: &mut TagContext<'_>,
        locale: Locale,
        file_name: String,
        branch: Branch,
        degradations: &mut Vec<Degradation>,
    ) -> FieldSet {
        let schemes = &self.config.schemes;
        let mut content = FieldSet::new();

        content.push("ContentType", item.kind().label());
        content.push("FileName", file_name);
        content.push("SystemSlug", item.slugline.as_deref().unwrap_or_default().trim());
        content.push(
            "Credit",
            format_credit(item.source.as_deref(), item.credit.as_deref()),
        );
        content.push("Source", item.source.as_deref().unwrap_or_default().trim());
        content.push("EditorNote", item.ednote.as_deref().unwrap_or_default().trim());
        content.push("Language", locale.wire_code());

        content.push(
            "Category",
            tags.first_name(working, &schemes.category, locale, degradations),
        );
        let indexes = filter_indexes(&tags.index_names(working, &self.config, locale));
        debug!("'{}' index codes: {:?}", item.id, indexes);
        content.push("IndexCode", indexes.join(INDEX_CODE_SEPARATOR));

        let urgency = effective_urgency(item.urgency, self.config.default_urgency);
        content.push("RankingValue", urgency.get().to_string());
        content.push("Ranking", ranking_label(urgency, locale));
        content.push(
            "VersionType",
            tags.first_name(working, &schemes.genre, locale, degradations),
        );

        let separator = match branch {
            Branch::Text => TEXT_KEYWORD_SEPARATOR,
            Branch::Picture => PICTURE_KEYWORD_SEPARATOR,
        };
        content.push("Keyword", join_keywords(&item.keywords, separator));

        let dateline = format_dateline(item.dateline.as_ref());
        let placeline = dateline.placeline();
        let mut block = FieldSet::new();
        block.push("City", dateline.city);
        block.push("Province", dateline.province);
        block.push("Country", dateline.country);
        block.push("Latitude", dateline.latitude);
        block.push("Longitude", dateline.longitude);
        content.push_block("Dateline", block);
        content.push("Placeline", placeline);

        for (field, raw, with_offset) in [
            ("EmbargoTime", item.embargo.as_deref(), true),
            ("CreatedDateTime", item.firstcreated.as_deref(), false),
            ("UpdatedDateTime", item.versioncreated.as_deref(), true),
        ] {
            let value = format_timestamp_field(raw, self.tz, with_offset, field).record(degradations);
            content.push(field, value);
        }

        let sequence = item.rewrite_sequence;
        content.push("WritethruValue", sequence.to_string());
        if let Some(num) = ordinal(sequence, locale) {
            content.push("WritethruNum", num);
        }
        content.push("WriteThruType", WritethruKind::of(sequence).label(locale));

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwx_common::{Error, InMemoryRepository};

    #[test]
    fn test_branch_of_kind() {
        assert_eq!(Branch::of(ItemKind::Picture), Branch::Picture);
        assert_eq!(Branch::of(ItemKind::Video), Branch::Text);
        assert_eq!(Branch::of(ItemKind::Composite), Branch::Text);
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let mut config = FormatterConfig::default();
        config.timezone = "Mars/Olympus".into();
        assert!(Assembler::new(config).is_err());
    }

    #[test]
    fn test_missing_id_is_fatal() {
        let assembler = Assembler::new(FormatterConfig::default()).unwrap();
        let item = ContentItem::text("  ");
        let result = assembler.assemble(&item, &VocabularySet::new(), &InMemoryRepository::new());
        assert!(matches!(result, Err(Error::MissingIdentifier(_))));
    }

    #[test]
    fn test_common_field_order() {
        let assembler = Assembler::new(FormatterConfig::default()).unwrap();
        let assembly = assembler
            .assemble(&ContentItem::text("story"), &VocabularySet::new(), &InMemoryRepository::new())
            .unwrap();

        assert_eq!(assembly.documents.len(), 1);
        assert!(!assembly.is_degraded());
        let names = assembly.documents[0].content.names();
        assert_eq!(
            names,
            vec![
                "ContentType",
                "FileName",
                "SystemSlug",
                "Credit",
                "Source",
                "EditorNote",
                "Language",
                "Category",
                "IndexCode",
                "RankingValue",
                "Ranking",
                "VersionType",
                "Keyword",
                "Dateline",
                "Placeline",
                "EmbargoTime",
                "CreatedDateTime",
                "UpdatedDateTime",
                "WritethruValue",
                "WriteThruType",
                "Headline",
                "Headline2",
                "WordCount",
                "Length",
                "DirectoryText",
            ]
        );
    }
}
