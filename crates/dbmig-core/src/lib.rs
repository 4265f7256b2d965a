//! dbmig-core - Core library for dbmig
//!
//! This crate provides the shared leaf types of the migration runner:
//! environment-sourced connection settings, the `DateDir` year-month
//! value type, timestamped progress output, and the core error enum.

pub mod config;
pub mod date_dir;
pub mod error;
pub mod progress;

pub use config::DbConfig;
pub use date_dir::{DateDir, LEDGER_EPOCH};
pub use error::{CoreError, CoreResult};
pub use progress::progress;
