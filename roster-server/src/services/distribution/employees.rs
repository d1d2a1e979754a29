//! Employee operations — range fragmentation

use super::{DistributionService, store_failure};
use crate::common::{ServiceError, ServiceResult};
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate, Role};
use crate::db::repository::employee;
use crate::services::saga::{self, SagaStep};

impl DistributionService {
    /// Insert an employee on the shard its id maps to
    pub async fn create_employee(&self, data: EmployeeCreate) -> ServiceResult<Employee> {
        let shard = self.router().shard_for_employee(data.emp_id)?;
        let db = self.shards().handle(shard)?;

        if employee::find_by_id(db, data.emp_id)
            .await
            .map_err(|e| store_failure("create_employee", shard, e))?
            .is_some()
        {
            return Err(ServiceError::Duplicate(format!(
                "Employee ID {} already exists",
                data.emp_id
            )));
        }

        let record = Employee::from_create(data);
        employee::insert(db, &record)
            .await
            .map_err(|e| store_failure("create_employee", shard, e))?;
        tracing::info!(emp_id = record.emp_id, shard, "Employee created");
        Ok(record)
    }

    /// Create an employee together with a replicated user account.
    ///
    /// A compensating-action sequence, not a transaction: after both
    /// uniqueness pre-checks pass, the employee is inserted first and the
    /// user account second; if the user step fails, the just-inserted
    /// employee is deleted again. The ordering decides which half of a
    /// failure leaves residue behind.
    pub async fn create_employee_with_user(
        &self,
        data: EmployeeCreate,
        username: &str,
        password: &str,
    ) -> ServiceResult<Employee> {
        if self.username_exists(username).await? {
            return Err(ServiceError::Duplicate(format!(
                "Username '{username}' already exists"
            )));
        }

        let shard = self.router().shard_for_employee(data.emp_id)?;
        let db = self.shards().handle(shard)?;
        if employee::find_by_id(db, data.emp_id)
            .await
            .map_err(|e| store_failure("create_employee_with_user", shard, e))?
            .is_some()
        {
            return Err(ServiceError::Duplicate(format!(
                "Employee ID {} already exists",
                data.emp_id
            )));
        }

        let record = Employee::from_create(data);
        let emp_id = record.emp_id;
        let record_ref = &record;

        let steps = vec![
            SagaStep::with_compensation(
                "insert_employee",
                Box::pin(async move {
                    employee::insert(db, record_ref)
                        .await
                        .map_err(|e| store_failure("create_employee_with_user", shard, e))
                }),
                Box::pin(async move {
                    employee::delete(db, emp_id)
                        .await
                        .map(|_| ())
                        .map_err(|e| store_failure("create_employee_with_user", shard, e))
                }),
            ),
            SagaStep::new(
                "create_user",
                Box::pin(async move {
                    let report = self
                        .create_user(username, password, Role::Employee, Some(emp_id))
                        .await?;
                    if report.is_full() {
                        Ok(())
                    } else {
                        Err(ServiceError::Store(format!(
                            "User replication incomplete on shards {:?}",
                            report.failed_shards()
                        )))
                    }
                }),
            ),
        ];
        saga::run(steps).await?;

        tracing::info!(emp_id, shard, username, "Employee and user account created");
        Ok(record)
    }

    pub async fn get_employee(&self, emp_id: u32) -> ServiceResult<Option<Employee>> {
        let shard = self.router().shard_for_employee(emp_id)?;
        let db = self.shards().handle(shard)?;
        employee::find_by_id(db, emp_id)
            .await
            .map_err(|e| store_failure("get_employee", shard, e))
    }

    /// Scatter-gather over every shard, globally sorted by id ascending
    pub async fn get_all_employees(&self) -> ServiceResult<Vec<Employee>> {
        let mut all = Vec::new();
        for (shard, db) in self.shards().all_handles() {
            let mut rows = employee::find_all(db)
                .await
                .map_err(|e| store_failure("get_all_employees", shard, e))?;
            all.append(&mut rows);
        }
        all.sort_by_key(|e| e.emp_id);
        Ok(all)
    }

    /// Single-shard update with modified-count semantics: writing a field's
    /// current value back reports `false`
    pub async fn update_employee(
        &self,
        emp_id: u32,
        data: EmployeeUpdate,
    ) -> ServiceResult<bool> {
        let shard = self.router().shard_for_employee(emp_id)?;
        let db = self.shards().handle(shard)?;
        employee::update(db, emp_id, &data)
            .await
            .map_err(|e| store_failure("update_employee", shard, e))
    }

    /// Single-shard delete. Leaves and salary records co-located with the
    /// employee are not cascaded.
    pub async fn delete_employee(&self, emp_id: u32) -> ServiceResult<bool> {
        let shard = self.router().shard_for_employee(emp_id)?;
        let db = self.shards().handle(shard)?;
        let deleted = employee::delete(db, emp_id)
            .await
            .map_err(|e| store_failure("delete_employee", shard, e))?;
        if deleted {
            tracing::info!(emp_id, shard, "Employee deleted");
        }
        Ok(deleted)
    }
}
