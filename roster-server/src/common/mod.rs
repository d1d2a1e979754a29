//! Common Infrastructure
//!
//! Error types and logging shared by every layer

pub mod error;
pub mod logger;

pub use error::{ServiceError, ServiceResult};
pub use logger::{init_logger, init_logger_with_file};
