//! MySQL migration target backend over sqlx.

use crate::connect::{backoff_delay, MAX_ATTEMPTS};
use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use dbmig_core::{progress, DbConfig};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS db_changes (
    id INT NOT NULL AUTO_INCREMENT,
    file_name VARCHAR(255) NOT NULL,
    date_dir INT NOT NULL,
    start_date DATETIME NOT NULL,
    complete_date DATETIME NULL,
    PRIMARY KEY (id),
    UNIQUE KEY uq_db_changes_file (file_name, date_dir)
)";

/// MySQL backend holding the single runner connection.
pub struct MySqlBackend {
    conn: MySqlConnection,
    in_tx: bool,
}

impl MySqlBackend {
    /// Connect as root with bounded retry and exponential backoff.
    ///
    /// Up to [`MAX_ATTEMPTS`] attempts; every failure is reported with
    /// the attempt number and reason. This is the only place in the
    /// process that sleeps.
    pub async fn connect(config: &DbConfig) -> DbResult<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .username("root")
            .password(&config.root_password)
            .database(&config.database)
            .charset("utf8mb4");

        let mut last_error = String::new();
        for attempt in 1..=MAX_ATTEMPTS {
            if attempt > 1 {
                let delay = backoff_delay(attempt);
                progress(&format!(
                    "Attempt {} failed. Retrying in {} seconds...",
                    attempt - 1,
                    delay.as_secs()
                ));
                tokio::time::sleep(delay).await;
            }
            match MySqlConnection::connect_with(&options).await {
                Ok(conn) => {
                    log::debug!("connected to {} on {}", config.database, config.host);
                    return Ok(Self {
                        conn,
                        in_tx: false,
                    });
                }
                Err(e) => {
                    last_error = e.to_string();
                    progress(&format!("Attempt {attempt} Error: {last_error}"));
                }
            }
        }
        Err(DbError::ConnectionError(format!(
            "failed to connect after {MAX_ATTEMPTS} attempts: {last_error}"
        )))
    }
}

#[async_trait]
impl Database for MySqlBackend {
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
        sqlx::query("START TRANSACTION")
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
        let result =
            sqlx::query("INSERT INTO db_changes (file_name, date_dir, start_date) VALUES (?, ?, NOW())")
                .bind(file_name)
                .bind(date_dir)
                .execute(&mut self.conn)
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(result.last_insert_id() as i64)
    }

    async fn mark_complete(&mut self, id: i64) -> DbResult<()> {
        sqlx::query("UPDATE db_changes SET complete_date = NOW() WHERE id = ?")
            .bind(id)
            .execute(&mut self.conn)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "mysql"
    }
}
