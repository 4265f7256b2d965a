//! Ledger store: `db_changes` bookkeeping on top of the [`Database`]
//! trait.

use crate::error::{RunnerError, RunnerResult};
use crate::scanner::MigrationFile;
use dbmig_db::Database;

/// Resume floor for the scanner: `MAX(date_dir)` across all ledger rows,
/// completed or not, 0 when the ledger is empty.
///
/// Deliberately not restricted to completed rows. If a run ever left an
/// incomplete row in one cohort while a later cohort was fully applied,
/// the floor would skip past the unfinished file on the next run. That
/// is a latent resumability bug in the recorded behavior, kept as-is
/// rather than silently redefined.
pub async fn resume_floor(db: &mut dyn Database) -> RunnerResult<i64> {
    Ok(db.max_date_dir().await?)
}

/// True iff the file has a ledger row with a non-null `complete_date`.
pub async fn is_completed(db: &mut dyn Database, file: &MigrationFile) -> RunnerResult<bool> {
    let id = db
        .find_change(&file.file_name, file.date_dir.value(), true)
        .await?;
    Ok(id.is_some())
}

/// Return the existing ledger row id for the file, or insert a fresh row
/// with `start_date = now`. An interrupted earlier attempt left its row
/// behind, so the same id is picked up again on resume.
pub async fn start_or_resume(db: &mut dyn Database, file: &MigrationFile) -> RunnerResult<i64> {
    if let Some(id) = db
        .find_change(&file.file_name, file.date_dir.value(), false)
        .await?
    {
        log::debug!("resuming ledger row {id} for {}", file.file_name);
        return Ok(id);
    }
    let id = db
        .insert_change(&file.file_name, file.date_dir.value())
        .await?;
    if id <= 0 {
        return Err(RunnerError::LedgerWrite {
            path: file.path.clone(),
        });
    }
    Ok(id)
}

/// Record successful execution.
pub async fn mark_complete(db: &mut dyn Database, id: i64) -> RunnerResult<()> {
    Ok(db.mark_complete(id).await?)
}
