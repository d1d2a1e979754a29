//! Leave operations — derived fragmentation
//!
//! A leave lives on the same shard as its owning employee. The record id
//! alone does not reveal that shard, so approve/reject scan shards in order
//! and the first shard reporting an actual modification wins.

use chrono::Utc;
use surrealdb::RecordId;

use super::{DistributionService, store_failure};
use crate::common::ServiceResult;
use crate::db::models::{Leave, LeaveCreate};
use crate::db::repository::leave;

impl DistributionService {
    /// Insert a leave request on its owning employee's shard
    pub async fn apply_leave(&self, data: LeaveCreate) -> ServiceResult<Leave> {
        let shard = self.router().shard_for_employee(data.emp_id)?;
        let db = self.shards().handle(shard)?;
        let created = leave::insert(db, &Leave::from_create(data))
            .await
            .map_err(|e| store_failure("apply_leave", shard, e))?;
        tracing::info!(emp_id = created.emp_id, shard, "Leave applied");
        Ok(created)
    }

    pub async fn get_employee_leaves(&self, emp_id: u32) -> ServiceResult<Vec<Leave>> {
        let shard = self.router().shard_for_employee(emp_id)?;
        let db = self.shards().handle(shard)?;
        leave::find_by_employee(db, emp_id)
            .await
            .map_err(|e| store_failure("get_employee_leaves", shard, e))
    }

    /// Scatter-gather over every shard, most recently applied first. The
    /// sort is stable, so equal timestamps keep shard-iteration order.
    pub async fn get_all_leaves(&self) -> ServiceResult<Vec<Leave>> {
        let mut all = Vec::new();
        for (shard, db) in self.shards().all_handles() {
            let mut rows = leave::find_all(db)
                .await
                .map_err(|e| store_failure("get_all_leaves", shard, e))?;
            all.append(&mut rows);
        }
        all.sort_by(|a, b| b.applied_date.cmp(&a.applied_date));
        Ok(all)
    }

    /// Approve a leave wherever it lives.
    ///
    /// Linear scan in shard order; stops at the first shard that reports a
    /// modification. Returns `false` only if no shard holds the record. The
    /// status overwrite is unconditional — callers enforce the Pending-only
    /// guard before invoking this.
    pub async fn approve_leave(&self, id: &RecordId, approved_by: &str) -> ServiceResult<bool> {
        let at = Utc::now();
        for (shard, db) in self.shards().all_handles() {
            match leave::approve(db, id, approved_by, at).await {
                Ok(true) => {
                    tracing::info!(leave = %id, shard, approved_by, "Leave approved");
                    return Ok(true);
                }
                Ok(false) => continue,
                Err(err) => {
                    // Best-effort: a broken shard must not hide the record
                    // on a later one
                    tracing::error!(shard, error = %err, "Approve scan failed on shard");
                    continue;
                }
            }
        }
        Ok(false)
    }

    /// Reject a leave wherever it lives. Same scan contract as
    /// [`approve_leave`].
    pub async fn reject_leave(&self, id: &RecordId, rejected_by: &str) -> ServiceResult<bool> {
        let at = Utc::now();
        for (shard, db) in self.shards().all_handles() {
            match leave::reject(db, id, rejected_by, at).await {
                Ok(true) => {
                    tracing::info!(leave = %id, shard, rejected_by, "Leave rejected");
                    return Ok(true);
                }
                Ok(false) => continue,
                Err(err) => {
                    tracing::error!(shard, error = %err, "Reject scan failed on shard");
                    continue;
                }
            }
        }
        Ok(false)
    }
}
