//! Department operations — full replication

use super::{DistributionService, PRIMARY_SHARD, store_failure};
use crate::common::ServiceResult;
use crate::db::models::{Department, DepartmentUpdate, ReplicationReport, ShardWrite};
use crate::db::repository::{department, employee};

impl DistributionService {
    /// Replicate a department to every shard, skipping shards that already
    /// hold the id
    pub async fn create_department(
        &self,
        data: Department,
    ) -> ServiceResult<ReplicationReport> {
        let mut report = ReplicationReport::new();
        for (shard, db) in self.shards().all_handles() {
            let outcome = match department::find_by_id(db, data.dept_id).await {
                Ok(Some(_)) => ShardWrite::Skipped,
                Ok(None) => match department::insert(db, &data).await {
                    Ok(()) => ShardWrite::Applied,
                    Err(err) => {
                        tracing::error!(shard, error = %err, "Department replication write failed");
                        ShardWrite::Failed(err.to_string())
                    }
                },
                Err(err) => {
                    tracing::error!(shard, error = %err, "Department lookup failed during replication");
                    ShardWrite::Failed(err.to_string())
                }
            };
            report.record(shard, outcome);
        }
        Ok(report)
    }

    /// Departments are replicated, so one shard answers for all of them.
    /// Insertion order, no global sort.
    pub async fn get_all_departments(&self) -> ServiceResult<Vec<Department>> {
        let db = self.primary()?;
        department::find_all(db)
            .await
            .map_err(|e| store_failure("get_all_departments", PRIMARY_SHARD, e))
    }

    pub async fn get_department(&self, dept_id: u32) -> ServiceResult<Option<Department>> {
        let db = self.primary()?;
        department::find_by_id(db, dept_id)
            .await
            .map_err(|e| store_failure("get_department", PRIMARY_SHARD, e))
    }

    /// Apply the update on every shard, best-effort; shards without the
    /// record, or where the merge changes nothing, are skipped, not failed
    pub async fn update_department(
        &self,
        dept_id: u32,
        data: DepartmentUpdate,
    ) -> ServiceResult<ReplicationReport> {
        let mut report = ReplicationReport::new();
        for (shard, db) in self.shards().all_handles() {
            let outcome = match department::update(db, dept_id, &data).await {
                Ok(true) => ShardWrite::Applied,
                Ok(false) => ShardWrite::Skipped,
                Err(err) => {
                    tracing::error!(shard, error = %err, "Department update failed");
                    ShardWrite::Failed(err.to_string())
                }
            };
            report.record(shard, outcome);
        }
        Ok(report)
    }

    /// Delete from every shard unconditionally, best-effort
    pub async fn delete_department(&self, dept_id: u32) -> ServiceResult<ReplicationReport> {
        let mut report = ReplicationReport::new();
        for (shard, db) in self.shards().all_handles() {
            let outcome = match department::delete(db, dept_id).await {
                Ok(true) => ShardWrite::Applied,
                Ok(false) => ShardWrite::Skipped,
                Err(err) => {
                    tracing::error!(shard, error = %err, "Department delete failed");
                    ShardWrite::Failed(err.to_string())
                }
            };
            report.record(shard, outcome);
        }
        Ok(report)
    }

    /// Employees are fragmented, so the member count is a scatter-gather sum
    pub async fn get_department_member_count(&self, name: &str) -> ServiceResult<u64> {
        let mut total = 0u64;
        for (shard, db) in self.shards().all_handles() {
            total += employee::count_by_department(db, name)
                .await
                .map_err(|e| store_failure("get_department_member_count", shard, e))?;
        }
        Ok(total)
    }
}
