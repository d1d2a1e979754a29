//! Salary Record Model

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Salary record, co-located with its owning employee (derived
/// fragmentation). Net salary is computed at write time and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub emp_id: u32,
    /// Month name, e.g. "August"
    pub month: String,
    pub year: i32,
    /// Explicit pay date; absent for period-based records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_date: Option<NaiveDate>,
    pub base_salary: Decimal,
    pub bonus: Decimal,
    pub deductions: Decimal,
    pub net_salary: Decimal,
    pub created_at: DateTime<Utc>,
}

impl SalaryRecord {
    /// Period-based record (month name + year)
    pub fn for_period(
        emp_id: u32,
        month: impl Into<String>,
        year: i32,
        base_salary: Decimal,
        bonus: Decimal,
        deductions: Decimal,
    ) -> Self {
        Self {
            id: None,
            emp_id,
            month: month.into(),
            year,
            pay_date: None,
            base_salary,
            bonus,
            deductions,
            net_salary: base_salary + bonus - deductions,
            created_at: Utc::now(),
        }
    }

    /// Pay-date record; month and year derive from the date
    pub fn for_pay_date(
        emp_id: u32,
        pay_date: NaiveDate,
        base_salary: Decimal,
        allowances: Decimal,
        deductions: Decimal,
    ) -> Self {
        Self {
            id: None,
            emp_id,
            month: pay_date.format("%B").to_string(),
            year: pay_date.year(),
            pay_date: Some(pay_date),
            base_salary,
            bonus: allowances,
            deductions,
            net_salary: base_salary + allowances - deductions,
            created_at: Utc::now(),
        }
    }

    /// Sort key for "most recent first" listings: the pay date when present,
    /// otherwise the insert timestamp
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.pay_date
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_salary_for_period() {
        let rec = SalaryRecord::for_period(
            50,
            "May",
            2025,
            Decimal::from(5000),
            Decimal::from(200),
            Decimal::from(100),
        );
        assert_eq!(rec.net_salary, Decimal::from(5100));
        assert!(rec.pay_date.is_none());
        assert_eq!(rec.effective_date(), rec.created_at);
    }

    #[test]
    fn test_pay_date_derives_period() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 28).unwrap();
        let rec = SalaryRecord::for_pay_date(
            50,
            date,
            Decimal::from(5000),
            Decimal::from(200),
            Decimal::from(100),
        );
        assert_eq!(rec.month, "August");
        assert_eq!(rec.year, 2025);
        assert_eq!(rec.net_salary, Decimal::from(5100));
        assert_eq!(
            rec.effective_date(),
            date.and_time(NaiveTime::MIN).and_utc()
        );
    }
}
