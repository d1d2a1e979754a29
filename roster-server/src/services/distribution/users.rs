//! User operations — full replication

use super::{DistributionService, store_failure};
use crate::common::ServiceResult;
use crate::db::models::{ReplicationReport, Role, ShardWrite, User};
use crate::db::repository::user;

impl DistributionService {
    /// Create a replicated user account.
    ///
    /// The password is hashed once, before any write. Every shard is then
    /// visited in order; shards that already hold the username are skipped
    /// (idempotent replication) and a failed shard does not stop the loop.
    /// There is no rollback: a partial report means the replicated
    /// collection has diverged.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
        emp_id: Option<u32>,
    ) -> ServiceResult<ReplicationReport> {
        let account = User::new(username, password, role, emp_id)?;

        let mut report = ReplicationReport::new();
        for (shard, db) in self.shards().all_handles() {
            let outcome = match user::find_by_username(db, username).await {
                Ok(Some(_)) => ShardWrite::Skipped,
                Ok(None) => match user::insert(db, &account).await {
                    Ok(()) => ShardWrite::Applied,
                    Err(err) => {
                        tracing::error!(shard, error = %err, "User replication write failed");
                        ShardWrite::Failed(err.to_string())
                    }
                },
                Err(err) => {
                    tracing::error!(shard, error = %err, "User lookup failed during replication");
                    ShardWrite::Failed(err.to_string())
                }
            };
            report.record(shard, outcome);
        }

        if report.is_partial() {
            tracing::warn!(
                username,
                failed_shards = ?report.failed_shards(),
                "User partially replicated, no rollback performed"
            );
        }
        Ok(report)
    }

    /// Authenticate against the designated shard only
    pub async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> ServiceResult<Option<User>> {
        let db = self.primary()?;
        let Some(account) = user::find_by_username(db, username)
            .await
            .map_err(|e| store_failure("authenticate_user", super::PRIMARY_SHARD, e))?
        else {
            return Ok(None);
        };

        match account.verify_password(password) {
            Ok(true) => Ok(Some(account)),
            Ok(false) => {
                tracing::warn!(target: "security", username, "Authentication failed");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Account linked to an employee id, read from the designated shard
    pub async fn get_user_by_emp_id(&self, emp_id: u32) -> ServiceResult<Option<User>> {
        let db = self.primary()?;
        user::find_by_emp_id(db, emp_id)
            .await
            .map_err(|e| store_failure("get_user_by_emp_id", super::PRIMARY_SHARD, e))
    }

    pub async fn username_exists(&self, username: &str) -> ServiceResult<bool> {
        let db = self.primary()?;
        Ok(user::find_by_username(db, username)
            .await
            .map_err(|e| store_failure("username_exists", super::PRIMARY_SHARD, e))?
            .is_some())
    }

    /// Re-hash and overwrite the password on every shard, best-effort
    pub async fn change_user_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> ServiceResult<ReplicationReport> {
        let hash_pass = User::hash_password(new_password)?;

        let mut report = ReplicationReport::new();
        for (shard, db) in self.shards().all_handles() {
            let outcome = match user::update_password(db, username, &hash_pass).await {
                Ok(true) => ShardWrite::Applied,
                Ok(false) => ShardWrite::Skipped,
                Err(err) => {
                    tracing::error!(shard, error = %err, "Password update failed");
                    ShardWrite::Failed(err.to_string())
                }
            };
            report.record(shard, outcome);
        }
        Ok(report)
    }
}
