//! Orchestrator: sequence scanner output through the executor inside
//! per-file transactions, stopping the whole run on first failure.

use crate::error::RunnerResult;
use crate::{executor, ledger, scanner};
use dbmig_core::{progress, DateDir};
use dbmig_db::Database;
use std::path::PathBuf;

/// Outcome of a run that was not halted by an error.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Files executed and marked complete during this run.
    pub applied: usize,
    /// Files skipped because the ledger already marks them complete.
    pub skipped: usize,
}

/// One full migration pass over a migrations root.
///
/// Applying file N+2 while N+1 failed would silently violate the
/// ordering guarantee, so the first failure rolls back its own
/// transaction and ends the run; earlier commits stand.
pub struct Runner<'a> {
    db: &'a mut dyn Database,
    root: PathBuf,
    now: DateDir,
}

impl<'a> Runner<'a> {
    pub fn new(db: &'a mut dyn Database, root: impl Into<PathBuf>) -> Self {
        Self {
            db,
            root: root.into(),
            now: DateDir::now(),
        }
    }

    /// Pin "now" instead of reading the clock. Used by tests and for
    /// replaying a historical deployment window.
    pub fn at(mut self, now: DateDir) -> Self {
        self.now = now;
        self
    }

    pub async fn run(&mut self) -> RunnerResult<RunReport> {
        let mut report = RunReport::default();

        if !self.root.exists() {
            // Nothing has shipped migrations yet; not a blocking error.
            progress("Migrations directory does not exist");
            return Ok(report);
        }

        self.db.ensure_ledger().await?;
        let floor = ledger::resume_floor(&mut *self.db).await?;
        log::debug!("resume floor {floor}, now {}", self.now);

        let files = scanner::scan(&self.root, floor, self.now);

        for file in &files {
            match self.process_file(file).await {
                Ok(true) => report.applied += 1,
                Ok(false) => report.skipped += 1,
                Err(e) => {
                    if self.db.in_transaction() {
                        let _ = self.db.rollback().await;
                    }
                    progress(&e.to_string());
                    progress("processing of files stopped due to errors");
                    return Err(e);
                }
            }
        }
        Ok(report)
    }

    /// Handle one scanned file; `Ok(true)` means it was applied, false
    /// that the ledger already marked it complete.
    async fn process_file(&mut self, file: &scanner::MigrationFile) -> RunnerResult<bool> {
        progress(&format!("Processing file {}", file.path.display()));
        if ledger::is_completed(&mut *self.db, file).await? {
            progress(&format!(
                "file {} has been already processed",
                file.path.display()
            ));
            return Ok(false);
        }

        // The ledger start row is written before the transaction opens so
        // a rolled-back execution still leaves the attempt on record.
        let prepared = executor::prepare(&mut *self.db, file, self.now).await?;

        self.db.begin().await?;
        executor::execute(&mut *self.db, file, &prepared).await?;
        self.db.commit().await?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
