//! Leave Repository

use chrono::{DateTime, Utc};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult};
use crate::db::models::Leave;

/// Insert a leave request; the store assigns the record id
pub async fn insert(db: &Surreal<Db>, leave: &Leave) -> RepoResult<Leave> {
    let mut result = db
        .query("CREATE leave CONTENT $data RETURN AFTER")
        .bind(("data", leave.clone()))
        .await?;
    let created: Option<Leave> = result.take(0)?;
    created.ok_or_else(|| RepoError::Database("Failed to create leave".to_string()))
}

pub async fn find_by_employee(db: &Surreal<Db>, emp_id: u32) -> RepoResult<Vec<Leave>> {
    let mut result = db
        .query("SELECT * FROM leave WHERE emp_id = $emp_id")
        .bind(("emp_id", emp_id))
        .await?;
    let leaves: Vec<Leave> = result.take(0)?;
    Ok(leaves)
}

pub async fn find_all(db: &Surreal<Db>) -> RepoResult<Vec<Leave>> {
    let mut result = db.query("SELECT * FROM leave").await?;
    let leaves: Vec<Leave> = result.take(0)?;
    Ok(leaves)
}

/// Mark a leave approved. Returns whether the record exists on this shard;
/// the status overwrite is unconditional — the Pending-only guard is the
/// caller's.
pub async fn approve(
    db: &Surreal<Db>,
    id: &RecordId,
    approved_by: &str,
    at: DateTime<Utc>,
) -> RepoResult<bool> {
    let mut result = db
        .query(
            r#"UPDATE $leave SET
                status = 'Approved',
                approved_by = $by,
                approved_date = $at
            RETURN AFTER"#,
        )
        .bind(("leave", id.clone()))
        .bind(("by", approved_by.to_string()))
        .bind(("at", at))
        .await?;
    let updated: Option<Leave> = result.take(0)?;
    Ok(updated.is_some())
}

/// Mark a leave rejected. Same contract as [`approve`].
pub async fn reject(
    db: &Surreal<Db>,
    id: &RecordId,
    rejected_by: &str,
    at: DateTime<Utc>,
) -> RepoResult<bool> {
    let mut result = db
        .query(
            r#"UPDATE $leave SET
                status = 'Rejected',
                rejected_by = $by,
                rejected_date = $at
            RETURN AFTER"#,
        )
        .bind(("leave", id.clone()))
        .bind(("by", rejected_by.to_string()))
        .bind(("at", at))
        .await?;
    let updated: Option<Leave> = result.take(0)?;
    Ok(updated.is_some())
}
