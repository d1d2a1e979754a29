//! Dashboard Statistics Model

use serde::{Deserialize, Serialize};

/// Aggregate snapshot for the dashboard.
///
/// Employee totals come from a scatter-gather count, department totals from
/// the designated shard, and the leave breakdown from a full fetch of all
/// leave records, O(total leaves) per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_employees: u64,
    pub total_departments: u64,
    pub leave_applied: u64,
    pub leave_pending: u64,
    pub leave_approved: u64,
    pub leave_rejected: u64,
    /// Raw per-shard employee counts, in shard order
    pub shard_distribution: Vec<u64>,
}
