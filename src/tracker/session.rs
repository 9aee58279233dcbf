/*!
 * Session Lifecycle
 * Begin/end tracking and reference-counted generation enablement
 */

use super::InstanceTracker;
use crate::core::errors::{TrackerError, TrackerResult};
use crate::generations::GenerationManager;
use log::{debug, info};
use std::sync::atomic::Ordering;

impl InstanceTracker {
    /// Start a tracking session
    ///
    /// Resets the summary engine, then opens the event gate. Sessions do
    /// not nest: a second begin without an end fails rather than silently
    /// discarding the live counters.
    pub fn begin_tracking(&self) -> TrackerResult<()> {
        // Transitions serialize on the generation lock so two begins cannot
        // both pass the gate check
        let _state = self.generations.lock();

        if self.tracking.load(Ordering::Acquire) {
            return Err(TrackerError::AlreadyTracking);
        }

        self.summary.reset();
        self.tracking.store(true, Ordering::Release);
        info!("Allocation tracking started");
        Ok(())
    }

    /// Stop the tracking session and clear all tracked state
    ///
    /// Closes the event gate, clears the summary engine, and tears down
    /// generation data including the enable count.
    pub fn end_tracking(&self) -> TrackerResult<()> {
        let mut state = self.generations.lock();

        if !self.tracking.load(Ordering::Acquire) {
            return Err(TrackerError::NotTracking);
        }

        self.tracking.store(false, Ordering::Release);
        self.generations_active.store(false, Ordering::Release);
        state.enable_count = 0;
        state.manager = None;
        self.summary.reset();
        info!("Allocation tracking stopped");
        Ok(())
    }

    /// Enable generation tracking, reference-counted
    ///
    /// The first enable creates the generation engine with one empty
    /// generation; later enables from independent callers only bump the
    /// count. Requires an active session.
    pub fn enable_generations(&self) -> TrackerResult<()> {
        let mut state = self.generations.lock();

        if !self.tracking.load(Ordering::Acquire) {
            return Err(TrackerError::NotTracking);
        }

        state.enable_count += 1;
        if state.enable_count == 1 {
            state.manager = Some(GenerationManager::new());
            self.generations_active.store(true, Ordering::Release);
            info!("Generation tracking enabled");
        } else {
            debug!(
                "Generation tracking already enabled, count={}",
                state.enable_count
            );
        }
        Ok(())
    }

    /// Disable generation tracking, reference-counted
    ///
    /// Reaching a count of zero destroys every generation and the reverse
    /// index; later instance queries report generations as disabled rather
    /// than serving stale data. Calls beyond the floor are ignored.
    pub fn disable_generations(&self) {
        let mut state = self.generations.lock();

        match state.enable_count {
            0 => debug!("Generation disable ignored, not enabled"),
            1 => {
                state.enable_count = 0;
                state.manager = None;
                self.generations_active.store(false, Ordering::Release);
                info!("Generation tracking disabled, history cleared");
            }
            count => {
                state.enable_count = count - 1;
                debug!(
                    "Generation disable deferred, count={}",
                    state.enable_count
                );
            }
        }
    }

    /// Close the current generation and open a new empty one
    ///
    /// Ignored while generation tracking is disabled.
    pub fn mark_generation(&self) {
        let mut state = self.generations.lock();

        match state.manager.as_mut() {
            Some(manager) => {
                manager.mark_generation();
                info!("Generation marked, total={}", manager.generation_count());
            }
            None => debug!("Generation mark ignored, generation tracking disabled"),
        }
    }

    /// Whether a tracking session is active
    pub fn is_tracking(&self) -> bool {
        self.tracking.load(Ordering::Acquire)
    }

    /// Whether generation tracking is active
    pub fn generations_enabled(&self) -> bool {
        self.generations_active.load(Ordering::Acquire)
    }
}
