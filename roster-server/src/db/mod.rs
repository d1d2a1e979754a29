//! Database Module
//!
//! One embedded SurrealDB datastore per shard. Handles are opened once at
//! process start and never reconnected mid-run; a failed shard surfaces as a
//! repository-level error on the operation that touched it.

pub mod models;
pub mod repository;
pub mod router;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};
use thiserror::Error;

use crate::core::Config;

/// Connection registry error types
#[derive(Debug, Error)]
pub enum ShardSetError {
    #[error("Unknown shard index: {0}")]
    UnknownShard(usize),

    #[error("Failed to open shard {shard}: {message}")]
    Open { shard: usize, message: String },
}

/// Connection registry — one live handle per shard, immutable after init.
///
/// Constructed once at startup and injected into the distribution service,
/// so tests can substitute in-memory shards without process-global state.
#[derive(Clone)]
pub struct ShardSet {
    shards: Vec<Surreal<Db>>,
}

impl ShardSet {
    /// Open one RocksDB-backed datastore per shard under
    /// `<work_dir>/shards/shard<i>`.
    pub async fn open(config: &Config) -> Result<Self, ShardSetError> {
        let mut shards = Vec::with_capacity(config.shard_count);
        for idx in 0..config.shard_count {
            let path = Path::new(&config.work_dir)
                .join("shards")
                .join(format!("shard{idx}"));
            let db = Surreal::new::<RocksDb>(path.display().to_string())
                .await
                .map_err(|e| ShardSetError::Open {
                    shard: idx,
                    message: e.to_string(),
                })?;
            db.use_ns("roster")
                .use_db("roster")
                .await
                .map_err(|e| ShardSetError::Open {
                    shard: idx,
                    message: e.to_string(),
                })?;
            tracing::info!(shard = idx, path = %path.display(), "Shard store opened");
            shards.push(db);
        }
        Ok(Self { shards })
    }

    /// Open an in-memory shard set (tests and ephemeral runs)
    pub async fn open_in_memory(shard_count: usize) -> Result<Self, ShardSetError> {
        let mut shards = Vec::with_capacity(shard_count);
        for idx in 0..shard_count {
            let db = Surreal::new::<Mem>(())
                .await
                .map_err(|e| ShardSetError::Open {
                    shard: idx,
                    message: e.to_string(),
                })?;
            db.use_ns("roster")
                .use_db("roster")
                .await
                .map_err(|e| ShardSetError::Open {
                    shard: idx,
                    message: e.to_string(),
                })?;
            shards.push(db);
        }
        Ok(Self { shards })
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Handle for one shard — the same live handle on every call
    pub fn handle(&self, shard: usize) -> Result<&Surreal<Db>, ShardSetError> {
        self.shards
            .get(shard)
            .ok_or(ShardSetError::UnknownShard(shard))
    }

    /// All handles in ascending shard order, matching
    /// [`router::ShardRouter::all_shards`]
    pub fn all_handles(&self) -> impl Iterator<Item = (usize, &Surreal<Db>)> {
        self.shards.iter().enumerate()
    }
}
