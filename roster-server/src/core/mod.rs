//! Core Module
//!
//! Process configuration

pub mod config;

pub use config::Config;
