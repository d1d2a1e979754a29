//! User Repository
//!
//! The `user` collection is replicated, so every function here takes the
//! handle of whichever shard the service is currently writing or reading.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult};
use crate::db::models::User;

pub async fn find_by_username(db: &Surreal<Db>, username: &str) -> RepoResult<Option<User>> {
    let mut result = db
        .query("SELECT * FROM user WHERE username = $username LIMIT 1")
        .bind(("username", username.to_string()))
        .await?;
    let users: Vec<User> = result.take(0)?;
    Ok(users.into_iter().next())
}

pub async fn find_by_emp_id(db: &Surreal<Db>, emp_id: u32) -> RepoResult<Option<User>> {
    let mut result = db
        .query("SELECT * FROM user WHERE emp_id = $emp_id LIMIT 1")
        .bind(("emp_id", emp_id))
        .await?;
    let users: Vec<User> = result.take(0)?;
    Ok(users.into_iter().next())
}

/// Insert a user record. The password hash is written through an explicit
/// bind because the model never serializes it.
pub async fn insert(db: &Surreal<Db>, user: &User) -> RepoResult<()> {
    let mut result = db
        .query(
            r#"CREATE user SET
                username = $username,
                hash_pass = $hash_pass,
                role = $role,
                emp_id = $emp_id,
                created_at = $created_at
            RETURN AFTER"#,
        )
        .bind(("username", user.username.clone()))
        .bind(("hash_pass", user.hash_pass.clone()))
        .bind(("role", user.role))
        .bind(("emp_id", user.emp_id))
        .bind(("created_at", user.created_at))
        .await?;
    let created: Option<User> = result.take(0)?;
    created
        .map(|_| ())
        .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
}

/// Overwrite the password hash; reports whether a record matched
pub async fn update_password(
    db: &Surreal<Db>,
    username: &str,
    hash_pass: &str,
) -> RepoResult<bool> {
    let mut result = db
        .query("UPDATE user SET hash_pass = $hash_pass WHERE username = $username RETURN AFTER")
        .bind(("hash_pass", hash_pass.to_string()))
        .bind(("username", username.to_string()))
        .await?;
    let updated: Vec<User> = result.take(0)?;
    Ok(!updated.is_empty())
}
