//! Error types for dbmig-runner

use dbmig_db::DbError;
use std::path::PathBuf;
use thiserror::Error;

/// Migration run errors. Every variant halts the run; there is no
/// skip-and-continue past a failed file.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// R001: A selected SQL file could not be read
    #[error("[R001] file {} is not readable: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// R002: Directory date outside the accepted range
    #[error("[R002] file {} has invalid date", path.display())]
    InvalidDate { path: PathBuf },

    /// R003: Ledger insert did not yield a usable id
    #[error("[R003] invalid last insert id for file {}", path.display())]
    LedgerWrite { path: PathBuf },

    /// R004: The SQL batch raised a database error
    #[error("[R004] file {} processing failed: {message}", path.display())]
    SqlExecution { path: PathBuf, message: String },

    /// R005: Ledger round-trip or transaction control failed
    #[error("[R005] {0}")]
    Db(#[from] DbError),
}

/// Result type alias for [`RunnerError`]
pub type RunnerResult<T> = Result<T, RunnerError>;
