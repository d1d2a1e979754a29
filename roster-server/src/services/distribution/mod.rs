//! Distribution Service
//!
//! The orchestration core: decides, for every entity type, which shard(s) a
//! read or write must touch, keeps replicated collections in step across
//! shards, and scatter-gathers when the owning shard is unknown.
//!
//! Placement policy per entity:
//!
//! | Entity | Policy | Read | Write |
//! |---|---|---|---|
//! | User | full replication | designated shard | every shard, skip-if-present |
//! | Department | full replication | designated shard | every shard |
//! | Employee | range fragmentation | owning shard | owning shard |
//! | Leave, Salary | derived fragmentation | employee's shard | employee's shard |
//!
//! All multi-shard loops are sequential and iterate in
//! [`ShardRouter::all_shards`] order; no operation holds locks or spans
//! shards transactionally.

mod departments;
mod employees;
mod leaves;
mod salaries;
mod stats;
mod users;

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::common::{ServiceError, ServiceResult};
use crate::db::repository::RepoError;
use crate::db::router::ShardRouter;
use crate::db::ShardSet;

/// Designated shard for reads of replicated collections. In steady state all
/// shards hold the same replicas; if replication has diverged, reads reflect
/// this shard only.
pub(crate) const PRIMARY_SHARD: usize = 0;

/// Orchestrates all shard placement, replication, and scatter-gather.
///
/// Holds the router by value and the connection registry by `Arc`; both are
/// immutable after construction, so clones share everything and there is no
/// internal locking.
#[derive(Clone)]
pub struct DistributionService {
    router: ShardRouter,
    shards: Arc<ShardSet>,
}

impl DistributionService {
    pub fn new(router: ShardRouter, shards: Arc<ShardSet>) -> Self {
        debug_assert_eq!(router.shard_count(), shards.shard_count());
        Self { router, shards }
    }

    pub fn router(&self) -> &ShardRouter {
        &self.router
    }

    pub(crate) fn shards(&self) -> &ShardSet {
        &self.shards
    }

    /// Handle of the designated shard for replicated reads
    pub(crate) fn primary(&self) -> ServiceResult<&Surreal<Db>> {
        Ok(self.shards.handle(PRIMARY_SHARD)?)
    }
}

/// Log a shard-level failure at the service boundary and convert it.
///
/// This is the only place raw store errors cross into caller-visible types.
pub(crate) fn store_failure(op: &'static str, shard: usize, err: RepoError) -> ServiceError {
    tracing::error!(target: "store", op, shard, error = %err, "Shard operation failed");
    err.into()
}
