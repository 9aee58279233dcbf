/*!
 * Summary Module
 * Flat per-type allocation counters, active for the whole session
 */

mod table;
mod types;

pub use table::SummaryTable;
pub use types::{AllocationSummary, TypeSummary};
