/*!
 * Generation
 * Live identities attributed to one time window
 */

use crate::core::types::{ObjectId, TypeTag};
use ahash::RandomState;
use std::collections::{HashMap, HashSet};

/// Per-type live counts for one generation
pub type GenerationSummary = HashMap<TypeTag, usize, RandomState>;

/// Live identities of a single type inside one generation
type LiveSet = HashSet<ObjectId, RandomState>;

/// One time window of surviving allocations
///
/// Buckets identities by type. Not internally synchronized; the owning
/// manager serializes access. Deliberately not `Clone`: buckets can hold
/// large live sets, so ownership transfers by move only.
#[derive(Debug, Default)]
pub struct Generation {
    buckets: HashMap<TypeTag, LiveSet, RandomState>,
}

impl Generation {
    /// Attribute a live identity to this window
    ///
    /// The caller upholds the one-generation-per-identity invariant through
    /// the reverse index; this is a plain insert.
    pub fn add(&mut self, tag: TypeTag, id: ObjectId) {
        self.buckets.entry(tag).or_default().insert(id);
    }

    /// Drop an identity on deallocation
    ///
    /// Identities are not self-clearing, so the deallocation path must call
    /// this. Absent identities are a no-op.
    pub fn remove(&mut self, tag: TypeTag, id: ObjectId) {
        if let Some(set) = self.buckets.get_mut(&tag) {
            set.remove(&id);
        }
    }

    /// Total live identities across every type
    pub fn len(&self) -> usize {
        self.buckets.values().map(HashSet::len).sum()
    }

    /// True when no identity in this window is still live
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(HashSet::is_empty)
    }

    /// Live count per type
    ///
    /// Types whose instances have all been freed stay in the map and report
    /// zero.
    pub fn summary(&self) -> GenerationSummary {
        self.buckets
            .iter()
            .map(|(tag, set)| (*tag, set.len()))
            .collect()
    }

    /// Snapshot copy of the live identities of `tag` in this window
    ///
    /// Safe to iterate after the generation lock is released.
    pub fn live_instances(&self, tag: TypeTag) -> Vec<ObjectId> {
        self.buckets
            .get(&tag)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}
