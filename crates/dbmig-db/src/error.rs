//! Error types for dbmig-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection failed after exhausting the retry budget (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// SQL batch execution failed (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Ledger round-trip failed (D003)
    #[error("[D003] Ledger query failed: {0}")]
    QueryError(String),

    /// BEGIN/COMMIT/ROLLBACK failed (D004)
    #[error("[D004] Transaction control failed: {0}")]
    TransactionError(String),
}

/// Result type alias for [`DbError`]
pub type DbResult<T> = Result<T, DbError>;
