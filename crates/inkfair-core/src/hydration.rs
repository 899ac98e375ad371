//! Batch hydration primitives.
//!
//! Aggregates reference other aggregates only by `DomainId`, so turning a
//! page of aggregates into a displayable view is an explicit two-step:
//! collect the distinct foreign ids, then resolve each referenced type with
//! a single `find_by_ids` call. `RefMap` holds one type's resolution result
//! for the duration of producing a single response; it is a value owned by
//! the hydration call, never a process-wide cache.

use std::collections::{BTreeSet, HashMap};

use crate::id::DomainId;

/// Collects the deduplicated set of non-null foreign ids across `items`.
///
/// Deduplication is what bounds the downstream query count independent of
/// the number of items. The set is ordered, so queries and tests see a
/// deterministic id list regardless of input order.
pub fn collect_refs<'a, T, I, F>(items: I, extract: F) -> BTreeSet<DomainId>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> Option<&'a DomainId>,
{
    items.into_iter().filter_map(extract).cloned().collect()
}

/// A per-response mapping from foreign id to the referenced aggregate.
#[derive(Debug)]
pub struct RefMap<T> {
    entries: HashMap<DomainId, T>,
}

impl<T> RefMap<T> {
    /// Wraps the result of a `find_by_ids` call.
    #[must_use]
    pub fn new(entries: HashMap<DomainId, T>) -> Self {
        Self { entries }
    }

    /// Looks up a referenced aggregate. A missing entry returns `None`;
    /// callers surface that as an explicit unresolved marker, never a
    /// fabricated placeholder.
    #[must_use]
    pub fn get(&self, id: &DomainId) -> Option<&T> {
        self.entries.get(id)
    }

    /// Number of resolved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map resolved nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for RefMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}
