//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// The migration target database as the runner sees it: a single
/// connection with explicit transaction control and the `db_changes`
/// ledger primitives.
///
/// Methods take `&mut self` because every operation shares the one
/// connection; execution is strictly sequential by design.
#[async_trait]
pub trait Database: Send {
    /// Create the `db_changes` ledger table if it does not exist.
    async fn ensure_ledger(&mut self) -> DbResult<()>;

    /// Execute a multi-statement SQL batch on the connection. Runs inside
    /// the open transaction, if any.
    async fn execute_batch(&mut self, sql: &str) -> DbResult<()>;

    /// Open a transaction.
    async fn begin(&mut self) -> DbResult<()>;

    /// Commit the open transaction.
    async fn commit(&mut self) -> DbResult<()>;

    /// Roll back the open transaction.
    async fn rollback(&mut self) -> DbResult<()>;

    /// Whether a transaction opened by [`Database::begin`] is still open.
    fn in_transaction(&self) -> bool;

    /// `MAX(date_dir)` over all ledger rows, 0 when the ledger is empty.
    async fn max_date_dir(&mut self) -> DbResult<i64>;

    /// Ledger row id for `(file_name, date_dir)`, restricted to completed
    /// rows when `only_completed` is set.
    async fn find_change(
        &mut self,
        file_name: &str,
        date_dir: i64,
        only_completed: bool,
    ) -> DbResult<Option<i64>>;

    /// Insert a ledger row with `start_date = now`, returning its id.
    async fn insert_change(&mut self, file_name: &str, date_dir: i64) -> DbResult<i64>;

    /// Set `complete_date = now` on the row with this id.
    async fn mark_complete(&mut self, id: i64) -> DbResult<()>;

    /// Backend identifier for logging
    fn db_type(&self) -> &'static str;
}
