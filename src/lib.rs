/*!
 * Instance Tracker Library
 * Generation-indexed allocation tracking for in-process memory profiling
 */

pub mod core;
pub mod generations;
pub mod summary;
pub mod tracker;

// Re-exports
pub use crate::core::{
    AcceptAll, AllocationSink, InstanceProbe, ObjectId, Size, TrackerError, TrackerResult, TypeTag,
};
pub use generations::{Generation, GenerationManager, GenerationSummary};
pub use summary::{AllocationSummary, SummaryTable, TypeSummary};
pub use tracker::InstanceTracker;
