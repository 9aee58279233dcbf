/*!
 * Query Layer
 * Snapshot reads over the summary and generation engines
 */

use super::InstanceTracker;
use crate::core::errors::{TrackerError, TrackerResult};
use crate::core::traits::InstanceProbe;
use crate::core::types::{ObjectId, TypeTag};
use crate::generations::GenerationSummary;
use crate::summary::AllocationSummary;

impl InstanceTracker {
    /// Every type observed since the session began
    pub fn tracked_types(&self) -> Vec<TypeTag> {
        self.summary.tracked_types()
    }

    /// Point-in-time copy of the per-type counters
    pub fn current_summary(&self) -> AllocationSummary {
        self.summary.snapshot()
    }

    /// Per-generation live counts, oldest first
    ///
    /// Empty while generation tracking is disabled; this is the one
    /// generation read that does not error on a disabled engine.
    pub fn generation_summaries(&self) -> Vec<GenerationSummary> {
        let state = self.generations.lock();
        state
            .manager
            .as_ref()
            .map(|manager| manager.summary())
            .unwrap_or_default()
    }

    /// Number of generations, zero while generation tracking is disabled
    pub fn generation_count(&self) -> usize {
        let state = self.generations.lock();
        state
            .manager
            .as_ref()
            .map_or(0, |manager| manager.generation_count())
    }

    /// Live instances of `tag` across every generation, oldest first
    pub fn instances_of_type<P>(&self, tag: TypeTag, probe: &P) -> TrackerResult<Vec<ObjectId>>
    where
        P: InstanceProbe + ?Sized,
    {
        let copied = {
            let state = self.generations.lock();
            let manager = state
                .manager
                .as_ref()
                .ok_or(TrackerError::GenerationsDisabled)?;
            manager.instances_across_generations(tag)
        };
        Ok(Self::probe_filter(copied, probe))
    }

    /// Live instances of several types at once, across every generation
    ///
    /// One lock acquisition covers the whole copy phase, so the result is
    /// a single consistent cut across all requested types.
    pub fn instances_of_types<P>(
        &self,
        tags: &[TypeTag],
        probe: &P,
    ) -> TrackerResult<Vec<ObjectId>>
    where
        P: InstanceProbe + ?Sized,
    {
        let copied = {
            let state = self.generations.lock();
            let manager = state
                .manager
                .as_ref()
                .ok_or(TrackerError::GenerationsDisabled)?;
            let mut all = Vec::new();
            for &tag in tags {
                all.extend(manager.instances_across_generations(tag));
            }
            all
        };
        Ok(Self::probe_filter(copied, probe))
    }

    /// Live instances of `tag` in the generation at `index`
    pub fn instances_of_type_in_generation<P>(
        &self,
        tag: TypeTag,
        index: usize,
        probe: &P,
    ) -> TrackerResult<Vec<ObjectId>>
    where
        P: InstanceProbe + ?Sized,
    {
        let copied = {
            let state = self.generations.lock();
            let manager = state
                .manager
                .as_ref()
                .ok_or(TrackerError::GenerationsDisabled)?;
            manager.instances_in_generation(tag, index)?
        };
        Ok(Self::probe_filter(copied, probe))
    }

    /// Live instances of `tag` in the newest generation
    pub fn instances_in_last_generation<P>(
        &self,
        tag: TypeTag,
        probe: &P,
    ) -> TrackerResult<Vec<ObjectId>>
    where
        P: InstanceProbe + ?Sized,
    {
        let copied = {
            let state = self.generations.lock();
            let manager = state
                .manager
                .as_ref()
                .ok_or(TrackerError::GenerationsDisabled)?;
            manager.instances_in_last_generation(tag)
        };
        Ok(Self::probe_filter(copied, probe))
    }

    // The probe runs only here, after every guard above has been dropped.
    // It may allocate or call back into the tracker without deadlocking.
    fn probe_filter<P>(ids: Vec<ObjectId>, probe: &P) -> Vec<ObjectId>
    where
        P: InstanceProbe + ?Sized,
    {
        ids.into_iter()
            .filter(|id| probe.is_safe_to_access(*id))
            .collect()
    }
}
