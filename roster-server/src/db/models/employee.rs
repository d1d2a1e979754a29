//! Employee Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee record, range-fragmented: `emp_id` alone determines the owning
/// shard, so equality on the merged document is what "modified" means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub emp_id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub salary: Decimal,
    pub date_of_birth: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub emp_id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub salary: Decimal,
    pub date_of_birth: NaiveDate,
}

/// Update employee payload — `None` fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

impl Employee {
    pub fn from_create(data: EmployeeCreate) -> Self {
        Self {
            emp_id: data.emp_id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            department: data.department,
            position: data.position,
            salary: data.salary,
            date_of_birth: data.date_of_birth,
            created_at: Utc::now(),
        }
    }

    /// Merge an update into a copy of this record.
    ///
    /// The repository compares the result against the stored document to
    /// preserve modified-count semantics: writing a field's existing value
    /// back counts as "not updated".
    pub fn apply(&self, update: &EmployeeUpdate) -> Employee {
        let mut merged = self.clone();
        if let Some(ref name) = update.name {
            merged.name = name.clone();
        }
        if let Some(ref email) = update.email {
            merged.email = email.clone();
        }
        if let Some(ref phone) = update.phone {
            merged.phone = phone.clone();
        }
        if let Some(ref department) = update.department {
            merged.department = department.clone();
        }
        if let Some(ref position) = update.position {
            merged.position = position.clone();
        }
        if let Some(salary) = update.salary {
            merged.salary = salary;
        }
        if let Some(date_of_birth) = update.date_of_birth {
            merged.date_of_birth = date_of_birth;
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee::from_create(EmployeeCreate {
            emp_id: 42,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "600000000".into(),
            department: "IT".into(),
            position: "Engineer".into(),
            salary: Decimal::from(3000),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
        })
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let emp = sample();
        let merged = emp.apply(&EmployeeUpdate {
            position: Some("Lead Engineer".into()),
            salary: Some(Decimal::from(3500)),
            ..Default::default()
        });
        assert_eq!(merged.position, "Lead Engineer");
        assert_eq!(merged.salary, Decimal::from(3500));
        assert_eq!(merged.name, emp.name);
        assert_eq!(merged.created_at, emp.created_at);
    }

    #[test]
    fn test_apply_same_values_is_noop() {
        let emp = sample();
        let merged = emp.apply(&EmployeeUpdate {
            position: Some(emp.position.clone()),
            ..Default::default()
        });
        assert_eq!(merged, emp);
    }
}
