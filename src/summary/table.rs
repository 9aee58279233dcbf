/*!
 * Summary Table
 * Always-active per-type allocation counters
 */

use super::types::{AllocationSummary, TypeSummary};
use crate::core::shard::ShardPolicy;
use crate::core::types::{Size, TypeTag};
use ahash::RandomState;
use dashmap::DashMap;

/// Flat per-type counter engine
///
/// Folds every tracked event into a sharded map keyed by type; independent
/// of generation tracking. An entry is created on a type's first allocation
/// and survives until `reset`, so a type whose instances have all been freed
/// still reports its history.
pub struct SummaryTable {
    entries: DashMap<TypeTag, TypeSummary, RandomState>,
}

impl SummaryTable {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size for an expected tracked-type population
    pub fn with_capacity(types: usize) -> Self {
        Self {
            entries: DashMap::with_capacity_and_hasher_and_shard_amount(
                types,
                RandomState::new(),
                ShardPolicy::table_shards(),
            ),
        }
    }

    /// Fold an allocation event
    ///
    /// Creates the entry on first observation; `instance_size` is sticky
    /// after that. One shard lock, held for the counter bump only.
    pub fn record_alloc(&self, tag: TypeTag, instance_size: Size) {
        self.entries
            .entry(tag)
            .and_modify(|summary| summary.allocations += 1)
            .or_insert_with(|| TypeSummary::first_allocation(instance_size));
    }

    /// Fold a deallocation event
    ///
    /// Unknown types are a no-op: the collaborator delivers allocate before
    /// deallocate, but an object allocated before the session began has no
    /// entry to decrement.
    pub fn record_dealloc(&self, tag: TypeTag) {
        if let Some(mut entry) = self.entries.get_mut(&tag) {
            entry.deallocations += 1;
        }
    }

    /// Point-in-time copy
    ///
    /// Each entry is copied under its shard lock and is never observed
    /// partially updated; entries mutated while the copy runs may differ
    /// from one another by in-flight events.
    pub fn snapshot(&self) -> AllocationSummary {
        self.entries
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }

    /// Every type observed since the last reset
    pub fn tracked_types(&self) -> Vec<TypeTag> {
        self.entries.iter().map(|entry| *entry.key()).collect()
    }

    /// Clear all entries
    pub fn reset(&self) {
        self.entries.clear();
    }
}

impl Default for SummaryTable {
    fn default() -> Self {
        Self::new()
    }
}
