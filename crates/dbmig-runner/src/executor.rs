//! Migration executor: validate one SQL file, register it in the ledger,
//! and apply its batch inside the caller's transaction.

use crate::error::{RunnerError, RunnerResult};
use crate::ledger;
use crate::scanner::MigrationFile;
use dbmig_core::{progress, DateDir};
use dbmig_db::Database;
use std::fs;

/// A file validated and registered in the ledger, ready to execute.
pub struct Prepared {
    /// Ledger row id, newly inserted or resumed from an earlier attempt.
    pub id: i64,
    sql: String,
}

/// Validate `file` and create (or resume) its ledger row.
///
/// Runs before the per-file transaction opens, so the attempt record is
/// durable: a rolled-back execution leaves the row behind with a null
/// `complete_date`, and the next run picks up the same id. Rejected
/// files (unreadable, date out of range) leave no ledger trace.
pub async fn prepare(
    db: &mut dyn Database,
    file: &MigrationFile,
    now: DateDir,
) -> RunnerResult<Prepared> {
    let sql = fs::read_to_string(&file.path).map_err(|source| RunnerError::FileRead {
        path: file.path.clone(),
        source,
    })?;

    // Fixed lower bound, re-checked independently of the scanner's
    // dynamic floor.
    if !file.date_dir.is_due(now) {
        return Err(RunnerError::InvalidDate {
            path: file.path.clone(),
        });
    }

    let id = ledger::start_or_resume(db, file).await?;
    Ok(Prepared { id, sql })
}

/// Execute the prepared batch on the open transaction and mark the
/// ledger row complete.
///
/// The caller owns the transaction: on `Err` nothing has been marked
/// complete and the transaction must be rolled back.
pub async fn execute(
    db: &mut dyn Database,
    file: &MigrationFile,
    prepared: &Prepared,
) -> RunnerResult<()> {
    if !prepared.sql.trim().is_empty() {
        if let Err(e) = db.execute_batch(&prepared.sql).await {
            return Err(RunnerError::SqlExecution {
                path: file.path.clone(),
                message: e.to_string(),
            });
        }
    }

    ledger::mark_complete(db, prepared.id).await?;
    progress(&format!(
        "file {} processed successfully",
        file.path.display()
    ));
    Ok(())
}
