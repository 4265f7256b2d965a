//! dbmig-db - Database access layer for dbmig
//!
//! This crate provides the `Database` trait as the runner sees the
//! migration target (one connection, explicit transaction control, and
//! the `db_changes` ledger primitives), a MySQL backend over sqlx, and a
//! SQLite backend used by tests and local smoke runs.

pub mod connect;
pub mod error;
pub mod mysql;
pub mod sqlite;
pub mod traits;

pub use connect::{backoff_delay, MAX_ATTEMPTS};
pub use error::{DbError, DbResult};
pub use mysql::MySqlBackend;
pub use sqlite::SqliteBackend;
pub use traits::Database;
