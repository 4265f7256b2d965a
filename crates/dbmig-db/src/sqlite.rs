//! SQLite backend, used by tests and local smoke runs.

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::path::Path;

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS db_changes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name TEXT NOT NULL,
    date_dir INTEGER NOT NULL,
    start_date TEXT NOT NULL,
    complete_date TEXT NULL,
    UNIQUE (file_name, date_dir)
)";

/// SQLite backend holding the single runner connection.
pub struct SqliteBackend {
    conn: SqliteConnection,
    in_tx: bool,
}

impl SqliteBackend {
    /// Open an in-memory database.
    pub async fn open_memory() -> DbResult<Self> {
        let conn = SqliteConnection::connect("sqlite::memory:")
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn,
            in_tx: false,
        })
    }

    /// Open (or create) a database file at `path`.
    pub async fn open(path: &Path) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn,
            in_tx: false,
        })
    }
}

#[async_trait]
impl Database for SqliteBackend {
    async fn ensure_ledger(&mut self) -> DbResult<()> {
        sqlx::query(CREATE_LEDGER)
            .execute(&mut self.conn)
            .await
            .map_err(|e| DbError::QueryError(format!("failed to create db_changes: {e}")))?;
        Ok(())
    }

    async fn execute_batch(&mut self, sql: &str) -> DbResult<()> {
        sqlx::Executor::execute(&mut self.conn, sqlx::raw_sql(sql))
            .await
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(())
    }

    async fn begin(&mut self) -> DbResult<()> {
        sqlx::query("BEGIN")
            .execute(&mut self.conn)
            .await
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;
        self.in_tx = true;
        Ok(())
    }

    async fn commit(&mut self) -> DbResult<()> {
        let result = sqlx::query("COMMIT").execute(&mut self.conn).await;
        self.in_tx = false;
        result
            .map(|_| ())
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))
    }

    async fn rollback(&mut self) -> DbResult<()> {
        let result = sqlx::query("ROLLBACK").execute(&mut self.conn).await;
        self.in_tx = false;
        result
            .map(|_| ())
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }

    fn in_transaction(&self) -> bool {
        self.in_tx
    }

    async fn max_date_dir(&mut self) -> DbResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COALESCE(MAX(date_dir), 0) FROM db_changes")
            .fetch_one(&mut self.conn)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(row.0)
    }

    async fn find_change(
        &mut self,
        file_name: &str,
        date_dir: i64,
        only_completed: bool,
    ) -> DbResult<Option<i64>> {
        let sql = if only_completed {
            "SELECT id FROM db_changes \
             WHERE file_name = ? AND date_dir = ? AND complete_date IS NOT NULL"
        } else {
            "SELECT id FROM db_changes WHERE file_name = ? AND date_dir = ?"
        };
        let row: Option<(i64,)> = sqlx::query_as(sql)
            .bind(file_name)
            .bind(date_dir)
            .fetch_optional(&mut self.conn)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(row.map(|r| r.0))
    }

    async fn insert_change(&mut self, file_name: &str, date_dir: i64) -> DbResult<i64> {
        let result = sqlx::query(
            "INSERT INTO db_changes (file_name, date_dir, start_date) \
             VALUES (?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(file_name)
        .bind(date_dir)
        .execute(&mut self.conn)
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(result.last_insert_rowid())
    }

    async fn mark_complete(&mut self, id: i64) -> DbResult<()> {
        sqlx::query("UPDATE db_changes SET complete_date = CURRENT_TIMESTAMP WHERE id = ?")
            .bind(id)
            .execute(&mut self.conn)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;
