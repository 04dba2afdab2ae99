//! Hierarchy resolver
//!
//! Finds the nearest tag eligible for legacy output, starting at the tag
//! itself and climbing parent links. The walk is iterative, guarded by a
//! visited set and bounded by a maximum depth.

use nwx_common::{Error, Result, Tag, VocabularySnapshot};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Default bound on parent hops
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Walks parent links within one vocabulary snapshot
#[derive(Debug, Clone, Copy)]
pub struct HierarchyResolver {
    max_depth: usize,
}

impl Default for HierarchyResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl HierarchyResolver {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Nearest eligible tag for `qcode`, or None
    ///
    /// Fails with [`Error::NotFound`] when `qcode` is not in the snapshot.
    /// A cycle or an over-deep chain is logged and treated as "no eligible
    /// ancestor".
    pub fn resolve<'s>(&self, qcode: &str, snapshot: &'s VocabularySnapshot) -> Result<Option<&'s Tag>> {
        match self.walk(qcode, snapshot) {
            Err(Error::CycleOrDepthExceeded { qcode: at, depth }) => {
                warn!(
                    "Hierarchy walk for '{}' in '{}' aborted at '{}' after {} hops",
                    qcode,
                    snapshot.id(),
                    at,
                    depth
                );
                Ok(None)
            }
            other => other,
        }
    }

    /// Like [`resolve`](Self::resolve) but reports cycles and depth overruns
    /// as [`Error::CycleOrDepthExceeded`]
    pub fn walk<'s>(&self, qcode: &str, snapshot: &'s VocabularySnapshot) -> Result<Option<&'s Tag>> {
        let mut current = snapshot.get(qcode).ok_or_else(|| Error::NotFound {
            qcode: qcode.to_string(),
            scheme: snapshot.id().to_string(),
        })?;

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(current.qcode.as_str());
        let mut depth = 0;

        loop {
            if current.eligible {
                if depth > 0 {
                    debug!("'{}' promoted to ancestor '{}'", qcode, current.qcode);
                }
                return Ok(Some(current));
            }

            let parent = match current.parent.as_deref() {
                Some(p) if !p.is_empty() => p,
                _ => return Ok(None),
            };
            let next = match snapshot.get(parent) {
                Some(tag) => tag,
                None => {
                    debug!(
                        "'{}' has parent '{}' missing from '{}'",
                        current.qcode,
                        parent,
                        snapshot.id()
                    );
                    return Ok(None);
                }
            };

            depth += 1;
            if !visited.insert(next.qcode.as_str()) || depth > self.max_depth {
                return Err(Error::CycleOrDepthExceeded {
                    qcode: next.qcode.clone(),
                    depth,
                });
            }
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(tags: Vec<Tag>) -> VocabularySnapshot {
        VocabularySnapshot::new("subject_custom", tags)
    }

    #[test]
    fn test_eligible_tag_resolves_to_itself() {
        let snap = snapshot(vec![Tag::new("", "a", "A").eligible()]);
        let resolved = HierarchyResolver::default().resolve("a", &snap).unwrap();
        assert_eq!(resolved.map(|t| t.qcode.as_str()), Some("a"));
    }

    #[test]
    fn test_climbs_to_nearest_eligible_ancestor() {
        let snap = snapshot(vec![
            Tag::new("", "root", "Root").eligible(),
            Tag::new("", "mid", "Mid").with_parent("root").eligible(),
            Tag::new("", "leaf", "Leaf").with_parent("mid"),
        ]);
        let resolved = HierarchyResolver::default().resolve("leaf", &snap).unwrap();
        assert_eq!(resolved.map(|t| t.qcode.as_str()), Some("mid"));
    }

    #[test]
    fn test_no_eligible_ancestor() {
        let snap = snapshot(vec![
            Tag::new("", "root", "Root"),
            Tag::new("", "leaf", "Leaf").with_parent("root"),
        ]);
        assert!(HierarchyResolver::default().resolve("leaf", &snap).unwrap().is_none());
    }

    #[test]
    fn test_missing_parent_stops_walk() {
        let snap = snapshot(vec![Tag::new("", "leaf", "Leaf").with_parent("gone")]);
        assert!(HierarchyResolver::default().resolve("leaf", &snap).unwrap().is_none());
    }

    #[test]
    fn test_unknown_qcode_is_not_found() {
        let snap = snapshot(vec![]);
        let err = HierarchyResolver::default().resolve("x", &snap).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_cycle_terminates_with_none() {
        let snap = snapshot(vec![
            Tag::new("", "a", "A").with_parent("b"),
            Tag::new("", "b", "B").with_parent("a"),
        ]);
        let resolver = HierarchyResolver::default();
        assert!(resolver.resolve("a", &snap).unwrap().is_none());
        assert!(matches!(
            resolver.walk("a", &snap),
            Err(Error::CycleOrDepthExceeded { .. })
        ));
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let snap = snapshot(vec![Tag::new("", "a", "A").with_parent("a")]);
        assert!(matches!(
            HierarchyResolver::default().walk("a", &snap),
            Err(Error::CycleOrDepthExceeded { .. })
        ));
    }

    #[test]
    fn test_depth_bound_applies_without_cycle() {
        // chain t0 <- t1 <- ... <- t5, only t0 eligible
        let mut tags = vec![Tag::new("", "t0", "T0").eligible()];
        for i in 1..=5 {
            tags.push(Tag::new("", format!("t{}", i), format!("T{}", i)).with_parent(format!("t{}", i - 1)));
        }
        let snap = snapshot(tags);

        let shallow = HierarchyResolver::new(3);
        assert!(matches!(
            shallow.walk("t5", &snap),
            Err(Error::CycleOrDepthExceeded { depth: 4, .. })
        ));
        assert!(shallow.resolve("t5", &snap).unwrap().is_none());

        let deep = HierarchyResolver::new(5);
        assert_eq!(
            deep.resolve("t5", &snap).unwrap().map(|t| t.qcode.as_str()),
            Some("t0")
        );
    }
}
