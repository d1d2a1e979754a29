//! Replication Outcome Report
//!
//! Replicated writes are best-effort loops over every shard; a single
//! boolean cannot tell "fully replicated" from "partially replicated". The
//! report keeps one outcome per shard so callers and tests can distinguish
//! the three cases.

use serde::{Deserialize, Serialize};

/// One shard's result during a replicated write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShardWrite {
    /// The write landed on this shard
    Applied,
    /// Skipped — an equivalent record was already present, or there was
    /// nothing to change (idempotent replication)
    Skipped,
    /// The shard failed; the loop continued on the remaining shards
    Failed(String),
}

/// Per-shard outcome, in shard-iteration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardOutcome {
    pub shard: usize,
    pub write: ShardWrite,
}

/// Outcome of one replicated operation across all shards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationReport {
    pub outcomes: Vec<ShardOutcome>,
}

impl ReplicationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, shard: usize, write: ShardWrite) {
        self.outcomes.push(ShardOutcome { shard, write });
    }

    /// Every shard applied or skipped the write
    pub fn is_full(&self) -> bool {
        !self.outcomes.is_empty()
            && self
                .outcomes
                .iter()
                .all(|o| !matches!(o.write, ShardWrite::Failed(_)))
    }

    /// Some shards succeeded, some failed — replicated collections have
    /// diverged and there is no rollback
    pub fn is_partial(&self) -> bool {
        let failed = self.failed_shards().len();
        failed > 0 && failed < self.outcomes.len()
    }

    /// At least one shard actually took the write
    pub fn any_applied(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.write == ShardWrite::Applied)
    }

    pub fn failed_shards(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.write, ShardWrite::Failed(_)))
            .map(|o| o.shard)
            .collect()
    }
}
