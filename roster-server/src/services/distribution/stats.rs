//! Dashboard aggregates

use super::{DistributionService, store_failure};
use crate::common::ServiceResult;
use crate::db::models::{DashboardStats, LeaveStatus};
use crate::db::repository::employee;

impl DistributionService {
    /// Aggregate snapshot for the dashboard.
    ///
    /// Employee totals come from store-side counts per shard (also exposed
    /// raw as the distribution breakdown); the leave breakdown is computed
    /// from a full scatter-gather fetch, O(total leaves) per call.
    pub async fn get_dashboard_stats(&self) -> ServiceResult<DashboardStats> {
        let mut shard_distribution = Vec::with_capacity(self.shards().shard_count());
        let mut total_employees = 0u64;
        for (shard, db) in self.shards().all_handles() {
            let count = employee::count(db)
                .await
                .map_err(|e| store_failure("get_dashboard_stats", shard, e))?;
            shard_distribution.push(count);
            total_employees += count;
        }

        let total_departments = self.get_all_departments().await?.len() as u64;

        let leaves = self.get_all_leaves().await?;
        let leave_applied = leaves.len() as u64;
        let leave_pending = leaves
            .iter()
            .filter(|l| l.status == LeaveStatus::Pending)
            .count() as u64;
        let leave_approved = leaves
            .iter()
            .filter(|l| l.status == LeaveStatus::Approved)
            .count() as u64;
        let leave_rejected = leaves
            .iter()
            .filter(|l| l.status == LeaveStatus::Rejected)
            .count() as u64;

        Ok(DashboardStats {
            total_employees,
            total_departments,
            leave_applied,
            leave_pending,
            leave_approved,
            leave_rejected,
            shard_distribution,
        })
    }
}
