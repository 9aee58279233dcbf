/*!
 * Shard Policy
 *
 * CPU-topology-aware shard count for the concurrent summary table. Every
 * tracked allocation and deallocation lands in that table, so it is sized
 * like a high-contention structure: power-of-2 shard counts proportional to
 * the host's CPU count, computed once at first use.
 */

use std::sync::OnceLock;

static SHARD_POLICY: OnceLock<ShardPolicy> = OnceLock::new();

/// Topology-derived shard sizing for the tracker's concurrent maps
#[derive(Debug, Clone)]
pub struct ShardPolicy {
    cpu_count: usize,
}

impl ShardPolicy {
    fn instance() -> &'static Self {
        SHARD_POLICY.get_or_init(|| {
            let cpu_count = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or_else(|_| {
                    log::warn!("Failed to detect CPU count, defaulting to 8");
                    8
                });

            Self { cpu_count }
        })
    }

    /// Shard count for the per-type summary table
    ///
    /// 4x CPU shards: the table sits on the allocation hot path of the whole
    /// host process and benefits from maximum parallelism. Power of 2 so the
    /// map can reduce hashes with a bitwise AND, clamped to keep 1-2 core
    /// systems and very wide servers inside sane bounds.
    pub fn table_shards() -> usize {
        let calculated = (Self::instance().cpu_count * 4).next_power_of_two();
        calculated.clamp(8, 512)
    }
}
