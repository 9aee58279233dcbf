/*!
 * Generations
 * Time-windowed partitioning of live allocations
 */

mod generation;
mod manager;

pub use generation::{Generation, GenerationSummary};
pub use manager::GenerationManager;
