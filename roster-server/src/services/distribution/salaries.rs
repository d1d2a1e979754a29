//! Salary operations — derived fragmentation

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{DistributionService, store_failure};
use crate::common::{ServiceError, ServiceResult};
use crate::db::models::SalaryRecord;
use crate::db::repository::salary;

impl DistributionService {
    /// Period-based salary record (month name + year), co-located with the
    /// employee. Net salary is computed before the write.
    pub async fn add_salary_record(
        &self,
        emp_id: u32,
        month: &str,
        year: i32,
        base_salary: Decimal,
        bonus: Decimal,
        deductions: Decimal,
    ) -> ServiceResult<SalaryRecord> {
        let shard = self.router().shard_for_employee(emp_id)?;
        let db = self.shards().handle(shard)?;
        let record =
            SalaryRecord::for_period(emp_id, month, year, base_salary, bonus, deductions);
        let created = salary::insert(db, &record)
            .await
            .map_err(|e| store_failure("add_salary_record", shard, e))?;
        tracing::info!(emp_id, shard, month, year, "Salary record added");
        Ok(created)
    }

    /// Pay-date salary record. The date string is validated before any
    /// routing or store access.
    pub async fn add_salary_record_with_date(
        &self,
        emp_id: u32,
        pay_date: &str,
        base_salary: Decimal,
        allowances: Decimal,
        deductions: Decimal,
    ) -> ServiceResult<SalaryRecord> {
        let date = NaiveDate::parse_from_str(pay_date, "%Y-%m-%d").map_err(|_| {
            ServiceError::Validation(format!(
                "Malformed pay date '{pay_date}', expected YYYY-MM-DD"
            ))
        })?;

        let shard = self.router().shard_for_employee(emp_id)?;
        let db = self.shards().handle(shard)?;
        let record =
            SalaryRecord::for_pay_date(emp_id, date, base_salary, allowances, deductions);
        let created = salary::insert(db, &record)
            .await
            .map_err(|e| store_failure("add_salary_record_with_date", shard, e))?;
        tracing::info!(emp_id, shard, pay_date, "Salary record added");
        Ok(created)
    }

    pub async fn get_employee_salaries(&self, emp_id: u32) -> ServiceResult<Vec<SalaryRecord>> {
        let shard = self.router().shard_for_employee(emp_id)?;
        let db = self.shards().handle(shard)?;
        salary::find_by_employee(db, emp_id)
            .await
            .map_err(|e| store_failure("get_employee_salaries", shard, e))
    }

    /// Scatter-gather over every shard, most recent first: by pay date when
    /// present, otherwise by insert timestamp. Stable sort, so ties keep
    /// shard-iteration order.
    pub async fn get_all_salary_records(&self) -> ServiceResult<Vec<SalaryRecord>> {
        let mut all = Vec::new();
        for (shard, db) in self.shards().all_handles() {
            let mut rows = salary::find_all(db)
                .await
                .map_err(|e| store_failure("get_all_salary_records", shard, e))?;
            all.append(&mut rows);
        }
        all.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));
        Ok(all)
    }
}
