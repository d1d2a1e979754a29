//! Employee Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult};
use crate::db::models::{Employee, EmployeeUpdate};

pub async fn find_by_id(db: &Surreal<Db>, emp_id: u32) -> RepoResult<Option<Employee>> {
    let mut result = db
        .query("SELECT * FROM employee WHERE emp_id = $emp_id LIMIT 1")
        .bind(("emp_id", emp_id))
        .await?;
    let employees: Vec<Employee> = result.take(0)?;
    Ok(employees.into_iter().next())
}

pub async fn find_all(db: &Surreal<Db>) -> RepoResult<Vec<Employee>> {
    let mut result = db.query("SELECT * FROM employee").await?;
    let employees: Vec<Employee> = result.take(0)?;
    Ok(employees)
}

pub async fn insert(db: &Surreal<Db>, employee: &Employee) -> RepoResult<()> {
    let mut result = db
        .query("CREATE employee CONTENT $data RETURN AFTER")
        .bind(("data", employee.clone()))
        .await?;
    let created: Option<Employee> = result.take(0)?;
    created
        .map(|_| ())
        .ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
}

/// Update an employee, preserving modified-count semantics: merging the
/// patch into the stored document and getting the same document back counts
/// as "not updated".
pub async fn update(db: &Surreal<Db>, emp_id: u32, data: &EmployeeUpdate) -> RepoResult<bool> {
    let Some(existing) = find_by_id(db, emp_id).await? else {
        return Ok(false);
    };
    let merged = existing.apply(data);
    if merged == existing {
        return Ok(false);
    }
    db.query("UPDATE employee CONTENT $data WHERE emp_id = $emp_id")
        .bind(("data", merged))
        .bind(("emp_id", emp_id))
        .await?;
    Ok(true)
}

/// Delete an employee; reports whether a record was removed
pub async fn delete(db: &Surreal<Db>, emp_id: u32) -> RepoResult<bool> {
    let mut result = db
        .query("DELETE employee WHERE emp_id = $emp_id RETURN BEFORE")
        .bind(("emp_id", emp_id))
        .await?;
    let deleted: Vec<Employee> = result.take(0)?;
    Ok(!deleted.is_empty())
}

pub async fn count(db: &Surreal<Db>) -> RepoResult<u64> {
    let mut result = db
        .query("SELECT count() FROM employee GROUP ALL")
        .await?;
    let count: Option<i64> = result.take((0, "count"))?;
    Ok(count.unwrap_or(0) as u64)
}

pub async fn count_by_department(db: &Surreal<Db>, department: &str) -> RepoResult<u64> {
    let mut result = db
        .query("SELECT count() FROM employee WHERE department = $department GROUP ALL")
        .bind(("department", department.to_string()))
        .await?;
    let count: Option<i64> = result.take((0, "count"))?;
    Ok(count.unwrap_or(0) as u64)
}
