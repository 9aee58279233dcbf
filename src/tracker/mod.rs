/*!
 * Instance Tracker
 * Session state machine binding the summary and generation engines
 */

use crate::generations::GenerationManager;
use crate::summary::SummaryTable;
use log::info;
use parking_lot::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

mod events;
mod query;
mod session;

/// Generation engine state behind a single lock
///
/// The enable count shares the lock with the structural data it gates, so
/// enable/disable transitions and event routing always agree on whether a
/// manager exists.
#[derive(Debug, Default)]
struct GenerationState {
    enable_count: u32,
    manager: Option<GenerationManager>,
}

/// Generation-indexed allocation tracking engine
///
/// Consumes allocation and deallocation events from the host runtime,
/// keeps per-type running counters, and optionally partitions live
/// identities into ordered generations. Clones share state and may be
/// handed to event sources and inspection threads independently.
///
/// # Performance
/// - Event intake is gated by atomics and touches one sharded map entry;
///   the generation mutex is taken only while generations are enabled
/// - Session and query operations are coarse and expected to be rare
pub struct InstanceTracker {
    // Event delivery gate, flipped by begin/end
    tracking: Arc<AtomicBool>,

    // Fast-path gate that lets events skip the generation lock entirely
    generations_active: Arc<AtomicBool>,

    // Per-type counters, always fed while tracking
    summary: Arc<SummaryTable>,

    // Generation sequence, reverse index, and enable count
    generations: Arc<Mutex<GenerationState>>,
}

impl InstanceTracker {
    /// Create a tracker in the disabled state
    pub fn new() -> Self {
        Self::with_type_capacity(0)
    }

    /// Create a tracker pre-sized for an expected tracked-type population
    pub fn with_type_capacity(types: usize) -> Self {
        info!("Instance tracker initialized: type_capacity={}", types);

        Self {
            tracking: Arc::new(AtomicBool::new(false)),
            generations_active: Arc::new(AtomicBool::new(false)),
            summary: Arc::new(SummaryTable::with_capacity(types)),
            generations: Arc::new(Mutex::new(GenerationState::default())),
        }
    }
}

impl Clone for InstanceTracker {
    fn clone(&self) -> Self {
        Self {
            tracking: Arc::clone(&self.tracking),
            generations_active: Arc::clone(&self.generations_active),
            summary: Arc::clone(&self.summary),
            generations: Arc::clone(&self.generations),
        }
    }
}

impl Default for InstanceTracker {
    fn default() -> Self {
        Self::new()
    }
}
