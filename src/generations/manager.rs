/*!
 * Generation Manager
 * Ordered generation list with O(1) identity routing
 */

use super::generation::{Generation, GenerationSummary};
use crate::core::errors::{TrackerError, TrackerResult};
use crate::core::types::{ObjectId, TypeTag};
use ahash::RandomState;
use std::collections::HashMap;

/// Ordered generations plus a reverse index from identity to owner
///
/// The index is what keeps deallocation O(1): without it every free would
/// scan all generations for the identity. Invariant: every identity held by
/// any generation appears in the index exactly once, pointing at that
/// generation's position. Not internally synchronized.
#[derive(Debug)]
pub struct GenerationManager {
    generations: Vec<Generation>,
    index: HashMap<ObjectId, usize, RandomState>,
}

impl GenerationManager {
    /// Create a manager with the initial open generation
    ///
    /// There is always at least one generation, so `generations` is never
    /// empty and the newest window always exists to receive allocations.
    pub fn new() -> Self {
        Self {
            generations: vec![Generation::default()],
            index: HashMap::default(),
        }
    }

    /// Close the current generation and open a new one
    pub fn mark_generation(&mut self) {
        self.generations.push(Generation::default());
    }

    /// Number of generations, including the currently open one
    pub fn generation_count(&self) -> usize {
        self.generations.len()
    }

    /// Attribute a fresh allocation to the newest generation
    pub fn add_object(&mut self, tag: TypeTag, id: ObjectId) {
        let current = self.generations.len() - 1;
        self.generations[current].add(tag, id);
        self.index.insert(id, current);
    }

    /// Route a deallocation to whichever generation holds `id`
    ///
    /// Unknown identities (allocated before tracking, or never seen) are
    /// silently ignored.
    pub fn remove_object(&mut self, tag: TypeTag, id: ObjectId) {
        if let Some(owner) = self.index.remove(&id) {
            self.generations[owner].remove(tag, id);
        }
    }

    /// Live identities of `tag` in the generation at `index`
    pub fn instances_in_generation(
        &self,
        tag: TypeTag,
        index: usize,
    ) -> TrackerResult<Vec<ObjectId>> {
        let count = self.generations.len();
        let generation = self
            .generations
            .get(index)
            .ok_or(TrackerError::GenerationOutOfRange { index, count })?;
        Ok(generation.live_instances(tag))
    }

    /// Live identities of `tag` in the newest generation
    pub fn instances_in_last_generation(&self, tag: TypeTag) -> Vec<ObjectId> {
        // Safe index: new() seeds one generation and nothing removes them
        self.generations[self.generations.len() - 1].live_instances(tag)
    }

    /// Live identities of `tag` across every generation, oldest first
    pub fn instances_across_generations(&self, tag: TypeTag) -> Vec<ObjectId> {
        let mut all = Vec::new();
        for generation in &self.generations {
            all.extend(generation.live_instances(tag));
        }
        all
    }

    /// Per-generation live counts, oldest first
    pub fn summary(&self) -> Vec<GenerationSummary> {
        self.generations.iter().map(Generation::summary).collect()
    }
}

impl Default for GenerationManager {
    fn default() -> Self {
        Self::new()
    }
}
