/*!
 * Event Intake
 * Hot-path allocation and deallocation handlers
 */

use super::InstanceTracker;
use crate::core::traits::AllocationSink;
use crate::core::types::{ObjectId, Size, TypeTag};
use std::sync::atomic::Ordering;

impl InstanceTracker {
    /// Record one allocation event
    ///
    /// Runs inline on the host's allocation path: one gate load when
    /// disabled, plus one sharded counter bump and, only while generations
    /// are enabled, one short mutex hold. Emits no logs.
    pub fn on_allocate(&self, tag: TypeTag, id: ObjectId, instance_size: Size) {
        if !self.tracking.load(Ordering::Acquire) {
            return;
        }

        self.summary.record_alloc(tag, instance_size);

        if self.generations_active.load(Ordering::Acquire) {
            let mut state = self.generations.lock();
            // The gate can lag a disable; the manager check is authoritative
            if let Some(manager) = state.manager.as_mut() {
                manager.add_object(tag, id);
            }
        }
    }

    /// Record one deallocation event
    ///
    /// After this returns the tracker holds no copy of `id`; the host may
    /// reuse the identity.
    pub fn on_deallocate(&self, tag: TypeTag, id: ObjectId) {
        if !self.tracking.load(Ordering::Acquire) {
            return;
        }

        self.summary.record_dealloc(tag);

        if self.generations_active.load(Ordering::Acquire) {
            let mut state = self.generations.lock();
            if let Some(manager) = state.manager.as_mut() {
                manager.remove_object(tag, id);
            }
        }
    }
}

impl AllocationSink for InstanceTracker {
    fn on_allocate(&self, tag: TypeTag, id: ObjectId, instance_size: Size) {
        InstanceTracker::on_allocate(self, tag, id, instance_size)
    }

    fn on_deallocate(&self, tag: TypeTag, id: ObjectId) {
        InstanceTracker::on_deallocate(self, tag, id)
    }
}
