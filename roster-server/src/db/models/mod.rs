//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod user;

// Organization
pub mod department;
pub mod employee;

// Employee-owned records (derived fragmentation)
pub mod leave;
pub mod salary;

// Aggregates
pub mod replication;
pub mod stats;

// Re-exports
pub use department::{Department, DepartmentUpdate};
pub use employee::{Employee, EmployeeCreate, EmployeeUpdate};
pub use leave::{Leave, LeaveCreate, LeaveStatus};
pub use replication::{ReplicationReport, ShardOutcome, ShardWrite};
pub use salary::SalaryRecord;
pub use stats::DashboardStats;
pub use user::{Role, User};
