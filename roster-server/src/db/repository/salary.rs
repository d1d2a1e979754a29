//! Salary Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult};
use crate::db::models::SalaryRecord;

/// Insert a salary record; the store assigns the record id
pub async fn insert(db: &Surreal<Db>, record: &SalaryRecord) -> RepoResult<SalaryRecord> {
    let mut result = db
        .query("CREATE salary CONTENT $data RETURN AFTER")
        .bind(("data", record.clone()))
        .await?;
    let created: Option<SalaryRecord> = result.take(0)?;
    created.ok_or_else(|| RepoError::Database("Failed to create salary record".to_string()))
}

pub async fn find_by_employee(db: &Surreal<Db>, emp_id: u32) -> RepoResult<Vec<SalaryRecord>> {
    let mut result = db
        .query("SELECT * FROM salary WHERE emp_id = $emp_id")
        .bind(("emp_id", emp_id))
        .await?;
    let records: Vec<SalaryRecord> = result.take(0)?;
    Ok(records)
}

pub async fn find_all(db: &Surreal<Db>) -> RepoResult<Vec<SalaryRecord>> {
    let mut result = db.query("SELECT * FROM salary").await?;
    let records: Vec<SalaryRecord> = result.take(0)?;
    Ok(records)
}
