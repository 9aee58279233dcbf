/*!
 * Core Traits
 * Seams between the tracking core and the host runtime
 */

use super::types::{ObjectId, Size, TypeTag};

/// Allocation event intake
///
/// Implemented by the tracker and driven by the host's interception layer
/// (allocator hooks, constructor/destructor instrumentation, RAII wrappers)
/// with exactly one call per lifecycle event. For any single identity the
/// allocation event precedes the deallocation event, and identities are not
/// reused before their deallocation is delivered.
pub trait AllocationSink: Send + Sync {
    /// Record a successful allocation, called before the new identity is
    /// usable by application code.
    fn on_allocate(&self, tag: TypeTag, id: ObjectId, instance_size: Size);

    /// Record a deallocation. The sink holds no reference to `id` after
    /// this returns.
    fn on_deallocate(&self, tag: TypeTag, id: ObjectId);
}

/// Host-side check that an identity can still be dereferenced
///
/// Consulted only inside instance queries, never on the event path and
/// never while a tracker lock is held, so implementations are free to
/// allocate or re-enter the tracker.
pub trait InstanceProbe {
    fn is_safe_to_access(&self, id: ObjectId) -> bool;
}

impl<F> InstanceProbe for F
where
    F: Fn(ObjectId) -> bool,
{
    fn is_safe_to_access(&self, id: ObjectId) -> bool {
        self(id)
    }
}

/// Probe that admits every identity, for hosts without a liveness oracle
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl InstanceProbe for AcceptAll {
    fn is_safe_to_access(&self, _id: ObjectId) -> bool {
        true
    }
}
