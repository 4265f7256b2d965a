//! dbmig-runner - the migration run itself.
//!
//! Scans dated cohort directories for SQL files, checks the `db_changes`
//! ledger for work already done, applies each pending file inside its own
//! transaction, and stops the whole run on first failure so migrations
//! are never applied with gaps.

pub mod error;
pub mod executor;
pub mod ledger;
pub mod runner;
pub mod scanner;

pub use error::{RunnerError, RunnerResult};
pub use runner::{RunReport, Runner};
pub use scanner::MigrationFile;
