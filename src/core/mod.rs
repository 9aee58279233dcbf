/*!
 * Core Module
 * Identity tokens, error taxonomy, and collaborator seams
 */

pub mod errors;
pub mod shard;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use shard::ShardPolicy;
pub use traits::*;
pub use types::*;
