/*!
 * Summary Types
 * Per-type counter value objects
 */

use crate::core::types::{Size, TypeTag};
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point-in-time copy of every tracked type's counters
pub type AllocationSummary = HashMap<TypeTag, TypeSummary, RandomState>;

/// Running counters for one tracked type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub allocations: u64,
    pub deallocations: u64,
    /// Instance size in bytes, captured at first observation and constant
    /// afterwards
    pub instance_size: Size,
}

impl TypeSummary {
    /// Entry state for a type's first observed allocation
    pub(crate) fn first_allocation(instance_size: Size) -> Self {
        Self {
            allocations: 1,
            deallocations: 0,
            instance_size,
        }
    }

    /// Allocations minus deallocations
    ///
    /// Signed: a deallocation whose allocation predates the session still
    /// increments `deallocations` once the type is known, so the difference
    /// can dip below zero.
    pub fn alive_objects(&self) -> i64 {
        self.allocations as i64 - self.deallocations as i64
    }
}
