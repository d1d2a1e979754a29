//! Shard Router
//!
//! Pure range-fragmentation routing. Every employee id in
//! `[1, shard_count * range_width]` belongs to exactly one shard:
//! shard 0 owns `1..=W`, shard 1 owns `W+1..=2W`, and so on.

use thiserror::Error;

/// Routing error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Employee ID {id} is outside the valid range [1, {max}]")]
    OutOfRange { id: u32, max: u32 },
}

/// Maps employee ids to their owning shard.
///
/// Stateless beyond the shard count and range width, both fixed at startup,
/// so the service holds it by value.
#[derive(Debug, Clone, Copy)]
pub struct ShardRouter {
    shard_count: usize,
    range_width: u32,
}

impl ShardRouter {
    pub fn new(shard_count: usize, range_width: u32) -> Self {
        Self {
            shard_count,
            range_width,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    pub fn range_width(&self) -> u32 {
        self.range_width
    }

    /// Highest valid employee id
    pub fn max_employee_id(&self) -> u32 {
        self.shard_count as u32 * self.range_width
    }

    /// Owning shard for an employee id.
    ///
    /// Deterministic and total over the valid range; ids outside it fail
    /// before any store is contacted.
    pub fn shard_for_employee(&self, emp_id: u32) -> Result<usize, RouteError> {
        if emp_id < 1 || emp_id > self.max_employee_id() {
            return Err(RouteError::OutOfRange {
                id: emp_id,
                max: self.max_employee_id(),
            });
        }
        Ok(((emp_id - 1) / self.range_width) as usize)
    }

    /// All shard indices in stable ascending order.
    ///
    /// Replication writes and scatter-gather reads iterate in this order, so
    /// first-match scans always have a deterministic winner.
    pub fn all_shards(&self) -> impl Iterator<Item = usize> {
        0..self.shard_count
    }
}
