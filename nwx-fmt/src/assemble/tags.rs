//! Subject tag resolution
//!
//! Builds the derived working copy of an item's subject list: machine tags
//! under the relevance threshold are ignored, tags in hierarchical schemes
//! are checked against their vocabulary and their nearest eligible ancestor
//! is appended once. The item itself is never modified.

use super::fanout::Service;
use crate::resolve::{locale_name, HierarchyResolver};
use nwx_common::config::FormatterConfig;
use nwx_common::{ContentItem, Degradation, Error, Locale, Result, Tag, VocabularySet, VocabularySnapshot};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Vocabulary access for one assembly
///
/// Reports each missing scheme once, however many tags reference it.
pub(crate) struct TagContext<'v> {
    vocabularies: &'v VocabularySet,
    reported_missing: HashSet<String>,
}

impl<'v> TagContext<'v> {
    pub fn new(vocabularies: &'v VocabularySet) -> Self {
        Self {
            vocabularies,
            reported_missing: HashSet::new(),
        }
    }

    /// Snapshot for `scheme`, recording a degradation the first time it is missing
    pub fn snapshot(
        &mut self,
        scheme: &str,
        degradations: &mut Vec<Degradation>,
    ) -> Option<&'v VocabularySnapshot> {
        let snapshot = self.vocabularies.get(scheme);
        if snapshot.is_none() && self.reported_missing.insert(scheme.to_string()) {
            warn!("No vocabulary snapshot for scheme '{}', skipping it", scheme);
            degradations.push(Degradation::MissingVocabulary {
                scheme: scheme.to_string(),
            });
        }
        snapshot
    }

    /// Derived working copy of `item.subject` with promoted ancestors appended
    pub fn resolve_subject(
        &mut self,
        item: &ContentItem,
        resolver: &HierarchyResolver,
        config: &FormatterConfig,
        degradations: &mut Vec<Degradation>,
    ) -> Result<Vec<Tag>> {
        let mut working: Vec<Tag> = Vec::with_capacity(item.subject.len());
        let mut ancestors: Vec<Tag> = Vec::new();

        for tag in &item.subject {
            if below_relevance(tag, config.min_machine_relevance) {
                debug!(
                    "Ignoring machine tag '{}' (relevance {:?})",
                    tag.qcode, tag.relevance
                );
                continue;
            }
            if !config.schemes.is_hierarchical(&tag.scheme) {
                working.push(tag.clone());
                continue;
            }
            let Some(snapshot) = self.snapshot(&tag.scheme, degradations) else {
                continue;
            };

            match resolver.walk(&tag.qcode, snapshot) {
                Ok(Some(eligible)) => {
                    working.push(tag.clone());
                    if eligible.qcode != tag.qcode {
                        ancestors.push(eligible.clone());
                    }
                }
                Ok(None) => {
                    debug!("'{}' has no eligible ancestor", tag.qcode);
                    working.push(tag.clone());
                }
                Err(err) => match Degradation::from_error(&err) {
                    Some(degradation) => {
                        if matches!(err, Error::NotFound { .. }) {
                            warn!("Dropping tag: {}", err);
                        } else {
                            warn!("Promotion skipped: {}", err);
                            working.push(tag.clone());
                        }
                        degradations.push(degradation);
                    }
                    None => return Err(err),
                },
            }
        }

        for ancestor in ancestors {
            let present = working
                .iter()
                .any(|t| t.scheme == ancestor.scheme && t.qcode == ancestor.qcode);
            if !present {
                working.push(ancestor);
            }
        }
        Ok(working)
    }

    /// Localized names of eligible subject tags in `working`, in order
    pub fn index_names(&self, working: &[Tag], config: &FormatterConfig, locale: Locale) -> Vec<String> {
        working
            .iter()
            .filter(|t| t.scheme == config.schemes.subject)
            .filter_map(|t| self.vocabularies.get(&t.scheme)?.get(&t.qcode))
            .filter(|record| record.eligible)
            .map(|record| locale_name::name(record, locale.as_str()).to_string())
            .collect()
    }

    /// Vocabulary records for the tags of `scheme` found in `working`
    ///
    /// Tags whose qcode the vocabulary does not know are dropped as
    /// [`Degradation::NotFound`].
    pub fn records_in(
        &mut self,
        working: &[Tag],
        scheme: &str,
        degradations: &mut Vec<Degradation>,
    ) -> Vec<&'v Tag> {
        let mut tags = working.iter().filter(|t| t.scheme == scheme).peekable();
        if tags.peek().is_none() {
            return Vec::new();
        }
        let Some(snapshot) = self.snapshot(scheme, degradations) else {
            return Vec::new();
        };

        let mut records = Vec::new();
        for tag in tags {
            match snapshot.get(&tag.qcode) {
                Some(record) => records.push(record),
                None => {
                    warn!("Dropping tag '{}': not in '{}'", tag.qcode, scheme);
                    degradations.push(Degradation::NotFound {
                        qcode: tag.qcode.clone(),
                        scheme: scheme.to_string(),
                    });
                }
            }
        }
        records
    }

    /// Localized name of the first known tag of `scheme`, empty when none
    pub fn first_name(
        &mut self,
        working: &[Tag],
        scheme: &str,
        locale: Locale,
        degradations: &mut Vec<Degradation>,
    ) -> String {
        self.records_in(working, scheme, degradations)
            .first()
            .map(|record| locale_name::name(record, locale.as_str()).to_string())
            .unwrap_or_default()
    }

    /// Distinct distribution services in item order
    pub fn services(
        &mut self,
        working: &[Tag],
        scheme: &str,
        locale: Locale,
        degradations: &mut Vec<Degradation>,
    ) -> Vec<Service> {
        let mut seen: HashSet<String> = HashSet::new();
        self.records_in(working, scheme, degradations)
            .into_iter()
            .filter(|record| seen.insert(record.qcode.clone()))
            .map(|record| Service {
                code: record.qcode.clone(),
                name: locale_name::name(record, locale.as_str()).to_string(),
            })
            .collect()
    }
}

fn below_relevance(tag: &Tag, threshold: f32) -> bool {
    tag.is_machine() && tag.relevance.unwrap_or(0.0) < threshold
}
