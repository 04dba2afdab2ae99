//! Rewrite-chain resolution
//!
//! Text items keep the file name of the first version in their rewrite
//! chain. The chain is followed through the content repository one
//! `rewrite_of` link at a time.

use nwx_common::{ContentItem, ContentRepository, Degradation, Resolved, Result};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Default bound on rewrite hops
pub const DEFAULT_MAX_HOPS: usize = 100;

/// First version of `item`'s rewrite chain
///
/// A missing link, a loop back to an already visited item, or running past
/// `max_hops` stops the climb at the last item found, reported as
/// [`Degradation::BrokenChain`]. Repository failures propagate.
pub fn original_of(
    item: &ContentItem,
    repository: &dyn ContentRepository,
    max_hops: usize,
) -> Result<Resolved<ContentItem>> {
    let mut current = item.clone();
    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(current.id.clone());
    let mut hops = 0;

    loop {
        let prior_id = match current.rewrite_of.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                if hops > 0 {
                    debug!("'{}' rewrites original '{}' ({} hops)", item.id, current.id, hops);
                }
                return Ok(Resolved::Ok(current));
            }
        };

        if hops >= max_hops || visited.contains(&prior_id) {
            warn!(
                "Rewrite chain of '{}' stopped at '{}' after {} hops",
                item.id, current.id, hops
            );
            return Ok(broken(current, prior_id));
        }

        match repository.find_item(&prior_id)? {
            Some(prior) => {
                visited.insert(prior.id.clone());
                current = prior;
                hops += 1;
            }
            None => {
                warn!(
                    "Rewrite chain of '{}' broken: '{}' not found",
                    item.id, prior_id
                );
                return Ok(broken(current, prior_id));
            }
        }
    }
}

fn broken(last_known: ContentItem, missing: String) -> Resolved<ContentItem> {
    let degradation = Degradation::BrokenChain {
        missing,
        last_known: last_known.id.clone(),
    };
    Resolved::Degraded(last_known, degradation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwx_common::{Error, InMemoryRepository};

    fn rewrite(id: &str, of: &str) -> ContentItem {
        let mut item = ContentItem::text(id);
        item.rewrite_of = Some(of.to_string());
        item
    }

    #[test]
    fn test_item_without_rewrite_is_its_own_original() {
        let repo = InMemoryRepository::new();
        let item = ContentItem::text("v1");
        let result = original_of(&item, &repo, DEFAULT_MAX_HOPS).unwrap();
        assert_eq!(result, Resolved::Ok(item));
    }

    #[test]
    fn test_climbs_to_first_version() {
        let repo = InMemoryRepository::new()
            .with(ContentItem::text("v1"))
            .with(rewrite("v2", "v1"));
        let result = original_of(&rewrite("v3", "v2"), &repo, DEFAULT_MAX_HOPS).unwrap();
        assert!(!result.is_degraded());
        assert_eq!(result.value().id, "v1");
    }

    #[test]
    fn test_missing_link_stops_at_last_known() {
        let repo = InMemoryRepository::new().with(rewrite("v2", "v1"));
        let result = original_of(&rewrite("v3", "v2"), &repo, DEFAULT_MAX_HOPS).unwrap();
        assert_eq!(result.value().id, "v2");
        assert_eq!(
            result.degradation(),
            Some(&Degradation::BrokenChain {
                missing: "v1".into(),
                last_known: "v2".into()
            })
        );
    }

    #[test]
    fn test_loop_terminates() {
        let repo = InMemoryRepository::new()
            .with(rewrite("a", "b"))
            .with(rewrite("b", "a"));
        let result = original_of(&rewrite("a", "b"), &repo, DEFAULT_MAX_HOPS).unwrap();
        assert!(result.is_degraded());
        assert_eq!(result.value().id, "b");
    }

    #[test]
    fn test_hop_bound() {
        let repo = InMemoryRepository::new()
            .with(ContentItem::text("v1"))
            .with(rewrite("v2", "v1"))
            .with(rewrite("v3", "v2"));
        let result = original_of(&rewrite("v4", "v3"), &repo, 2).unwrap();
        assert!(result.is_degraded());
        assert_eq!(result.value().id, "v2");
    }

    struct FailingRepository;

    impl ContentRepository for FailingRepository {
        fn find_item(&self, _id: &str) -> Result<Option<ContentItem>> {
            Err(Error::Repository("connection reset".into()))
        }

        fn referencing_items(&self, _id: &str) -> Result<Vec<ContentItem>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_repository_failure_propagates() {
        let result = original_of(&rewrite("v2", "v1"), &FailingRepository, DEFAULT_MAX_HOPS);
        assert!(matches!(result, Err(Error::Repository(_))));
    }
}
