/*!
 * Error Types
 * Session-control and query error taxonomy with thiserror and serde support
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tracker operation result
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Tracker errors
///
/// Structural misuse, meaning lifecycle calls out of order or an
/// out-of-range generation index, is reported synchronously through these
/// variants. Expected races (unknown identity on removal, deallocation of a
/// type the session never observed) are absorbed as no-ops and never
/// surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum TrackerError {
    #[error("tracking is already active; sessions do not nest")]
    AlreadyTracking,

    #[error("tracking is not active")]
    NotTracking,

    #[error("generation tracking is not enabled")]
    GenerationsDisabled,

    #[error("generation index {index} out of range ({count} generations exist)")]
    GenerationOutOfRange { index: usize, count: usize },
}
