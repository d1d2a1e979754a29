//! Leave Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Leave request status
///
/// `Pending -> Approved` and `Pending -> Rejected` are the only transitions;
/// both targets are terminal. The distribution layer performs an
/// unconditional overwrite on approve/reject — the Pending-only guard is the
/// caller's responsibility, checked via [`LeaveStatus::is_pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for LeaveStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl LeaveStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Leave request, co-located with its owning employee (derived
/// fragmentation). The record id is store-assigned at insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leave {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub emp_id: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
    pub reason: String,
    pub status: LeaveStatus,
    pub applied_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_date: Option<DateTime<Utc>>,
}

/// Apply leave payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveCreate {
    pub emp_id: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
    pub reason: String,
}

impl Leave {
    pub fn from_create(data: LeaveCreate) -> Self {
        Self {
            id: None,
            emp_id: data.emp_id,
            start_date: data.start_date,
            end_date: data.end_date,
            leave_type: data.leave_type,
            reason: data.reason,
            status: LeaveStatus::Pending,
            applied_date: Utc::now(),
            approved_by: None,
            approved_date: None,
            rejected_by: None,
            rejected_date: None,
        }
    }
}
