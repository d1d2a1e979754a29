//! Service Layer
//!
//! Orchestration on top of the router, the connection registry, and the
//! per-collection repositories

pub mod distribution;
pub mod saga;

pub use distribution::DistributionService;
