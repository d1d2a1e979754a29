//! Department Repository
//!
//! The `department` collection is replicated; the service calls these
//! functions once per shard.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult};
use crate::db::models::{Department, DepartmentUpdate};

pub async fn find_by_id(db: &Surreal<Db>, dept_id: u32) -> RepoResult<Option<Department>> {
    let mut result = db
        .query("SELECT * FROM department WHERE dept_id = $dept_id LIMIT 1")
        .bind(("dept_id", dept_id))
        .await?;
    let departments: Vec<Department> = result.take(0)?;
    Ok(departments.into_iter().next())
}

pub async fn find_all(db: &Surreal<Db>) -> RepoResult<Vec<Department>> {
    let mut result = db.query("SELECT * FROM department").await?;
    let departments: Vec<Department> = result.take(0)?;
    Ok(departments)
}

pub async fn insert(db: &Surreal<Db>, department: &Department) -> RepoResult<()> {
    let mut result = db
        .query("CREATE department CONTENT $data RETURN AFTER")
        .bind(("data", department.clone()))
        .await?;
    let created: Option<Department> = result.take(0)?;
    created
        .map(|_| ())
        .ok_or_else(|| RepoError::Database("Failed to create department".to_string()))
}

/// Merge-update, same contract as the employee path: every present field
/// writes through as supplied (empty strings included), and a merge that
/// leaves the stored document unchanged reports "not updated"
pub async fn update(db: &Surreal<Db>, dept_id: u32, data: &DepartmentUpdate) -> RepoResult<bool> {
    let Some(existing) = find_by_id(db, dept_id).await? else {
        return Ok(false);
    };
    let merged = existing.apply(data);
    if merged == existing {
        return Ok(false);
    }
    db.query("UPDATE department CONTENT $data WHERE dept_id = $dept_id")
        .bind(("data", merged))
        .bind(("dept_id", dept_id))
        .await?;
    Ok(true)
}

/// Delete; reports whether a record was removed on this shard
pub async fn delete(db: &Surreal<Db>, dept_id: u32) -> RepoResult<bool> {
    let mut result = db
        .query("DELETE department WHERE dept_id = $dept_id RETURN BEFORE")
        .bind(("dept_id", dept_id))
        .await?;
    let deleted: Vec<Department> = result.take(0)?;
    Ok(!deleted.is_empty())
}
