//! Roster Server - sharded employee-management data layer
//!
//! # Architecture
//!
//! Employee data is spread across a fixed set of independent embedded
//! document stores ("shards"). This crate is the distribution and
//! replication layer between a presentation front end and those stores:
//!
//! - **Shard Router** (`db/router`): pure range-fragmentation routing from
//!   employee id to owning shard
//! - **Connection Registry** (`db`): one live handle per shard, opened at
//!   startup, immutable afterwards
//! - **Distribution Service** (`services/distribution`): per-entity
//!   placement policy — replication for users and departments, range
//!   fragmentation for employees, derived fragmentation for leaves and
//!   salaries — plus scatter-gather reads and first-match multi-shard
//!   updates
//!
//! # Module structure
//!
//! ```text
//! roster-server/src/
//! ├── core/          # configuration
//! ├── common/        # error types, logging
//! ├── db/            # shard handles, router, models, repositories
//! └── services/      # distribution service, compensation sequences
//! ```

pub mod common;
pub mod core;
pub mod db;
pub mod services;

// Re-export public types
pub use common::{ServiceError, ServiceResult, init_logger, init_logger_with_file};
pub use core::Config;
pub use db::router::{RouteError, ShardRouter};
pub use db::{ShardSet, ShardSetError};
pub use services::DistributionService;
