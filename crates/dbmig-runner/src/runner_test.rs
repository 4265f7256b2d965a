//! End-to-end runner tests against the SQLite backend.

use crate::error::{RunnerError, RunnerResult};
use crate::runner::{RunReport, Runner};
use dbmig_core::DateDir;
use dbmig_db::{Database, SqliteBackend};
use std::fs;
use std::path::Path;

const NOW: DateDir = DateDir::new(202608);

async fn open_db() -> SqliteBackend {
    SqliteBackend::open_memory().await.unwrap()
}

async fn run(db: &mut SqliteBackend, root: &Path) -> RunnerResult<RunReport> {
    Runner::new(db, root).at(NOW).run().await
}

fn add_file(root: &Path, dir: &str, name: &str, sql: &str) {
    let dir_path = root.join(dir);
    fs::create_dir_all(&dir_path).unwrap();
    fs::write(dir_path.join(name), sql).unwrap();
}

// ── Happy path and idempotency ─────────────────────────────────────────

#[tokio::test]
async fn applies_file_and_records_completion() {
    let tmp = tempfile::tempdir().unwrap();
    add_file(tmp.path(), "202509", "001_init.sql", "CREATE TABLE t1 (id INTEGER);");
    let mut db = open_db().await;

    let report = run(&mut db, tmp.path()).await.unwrap();
    assert_eq!(report, RunReport { applied: 1, skipped: 0 });

    // Ledger row is complete and the DDL was committed.
    assert!(db.find_change("001_init.sql", 202509, true).await.unwrap().is_some());
    db.execute_batch("INSERT INTO t1 VALUES (1)").await.unwrap();
}

#[tokio::test]
async fn second_run_never_reexecutes_completed_files() {
    let tmp = tempfile::tempdir().unwrap();
    add_file(tmp.path(), "202509", "001_init.sql", "CREATE TABLE t1 (id INTEGER);");
    let mut db = open_db().await;
    run(&mut db, tmp.path()).await.unwrap();

    // If the runner re-executed the file, this content would now fail.
    add_file(tmp.path(), "202509", "001_init.sql", "THIS IS NOT SQL");

    let report = run(&mut db, tmp.path()).await.unwrap();
    assert_eq!(report, RunReport { applied: 0, skipped: 1 });
}

#[tokio::test]
async fn empty_file_is_marked_complete_without_execution() {
    let tmp = tempfile::tempdir().unwrap();
    add_file(tmp.path(), "202509", "001_noop.sql", "  \n");
    let mut db = open_db().await;

    let report = run(&mut db, tmp.path()).await.unwrap();
    assert_eq!(report.applied, 1);
    assert!(db.find_change("001_noop.sql", 202509, true).await.unwrap().is_some());
}

#[tokio::test]
async fn missing_migrations_directory_is_success() {
    let tmp = tempfile::tempdir().unwrap();
    let mut db = open_db().await;

    let report = run(&mut db, &tmp.path().join("migrations")).await.unwrap();
    assert_eq!(report, RunReport::default());

    // The run returned before touching the database at all.
    assert!(db.max_date_dir().await.is_err());
}

// ── Fail-fast and resume ───────────────────────────────────────────────

#[tokio::test]
async fn failure_halts_run_and_preserves_earlier_commit() {
    let tmp = tempfile::tempdir().unwrap();
    add_file(tmp.path(), "202509", "001_ok.sql", "CREATE TABLE t1 (id INTEGER);");
    add_file(tmp.path(), "202509", "002_bad.sql", "THIS IS NOT SQL");
    let mut db = open_db().await;

    let err = run(&mut db, tmp.path()).await.unwrap_err();
    assert!(matches!(err, RunnerError::SqlExecution { .. }), "{err}");
    assert!(!db.in_transaction());

    // First file committed and complete; second attempted but incomplete.
    db.execute_batch("INSERT INTO t1 VALUES (1)").await.unwrap();
    assert!(db.find_change("001_ok.sql", 202509, true).await.unwrap().is_some());
    assert!(db.find_change("002_bad.sql", 202509, true).await.unwrap().is_none());
    assert!(db.find_change("002_bad.sql", 202509, false).await.unwrap().is_some());
}

#[tokio::test]
async fn resume_reuses_the_same_ledger_row() {
    let tmp = tempfile::tempdir().unwrap();
    add_file(tmp.path(), "202509", "001_flaky.sql", "THIS IS NOT SQL");
    let mut db = open_db().await;

    run(&mut db, tmp.path()).await.unwrap_err();
    let first_id = db
        .find_change("001_flaky.sql", 202509, false)
        .await
        .unwrap()
        .unwrap();

    add_file(tmp.path(), "202509", "001_flaky.sql", "CREATE TABLE t2 (id INTEGER);");
    let report = run(&mut db, tmp.path()).await.unwrap();
    assert_eq!(report.applied, 1);

    let resumed_id = db
        .find_change("001_flaky.sql", 202509, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resumed_id, first_id);
}

#[tokio::test]
async fn later_files_are_not_attempted_after_a_failure() {
    let tmp = tempfile::tempdir().unwrap();
    add_file(tmp.path(), "202509", "001_bad.sql", "THIS IS NOT SQL");
    add_file(tmp.path(), "202510", "001_later.sql", "CREATE TABLE t3 (id INTEGER);");
    let mut db = open_db().await;

    run(&mut db, tmp.path()).await.unwrap_err();
    assert!(db.find_change("001_later.sql", 202510, false).await.unwrap().is_none());
}

// ── Scanner bounds seen end to end ─────────────────────────────────────

#[tokio::test]
async fn floor_skips_cohorts_below_ledger_maximum() {
    let tmp = tempfile::tempdir().unwrap();
    add_file(tmp.path(), "202509", "001_old.sql", "CREATE TABLE t4 (id INTEGER);");
    add_file(tmp.path(), "202510", "001_new.sql", "CREATE TABLE t5 (id INTEGER);");

    let mut db = open_db().await;
    db.ensure_ledger().await.unwrap();
    // An incomplete row in 202510 raises the floor past 202509.
    db.insert_change("000_seed.sql", 202510).await.unwrap();

    let report = run(&mut db, tmp.path()).await.unwrap();
    assert_eq!(report.applied, 1);

    // The unprocessed 202509 file was never considered.
    assert!(db.find_change("001_old.sql", 202509, false).await.unwrap().is_none());
    assert!(db.find_change("001_new.sql", 202510, true).await.unwrap().is_some());
}

#[tokio::test]
async fn pre_epoch_cohort_fails_the_strict_date_check() {
    let tmp = tempfile::tempdir().unwrap();
    // Passes the scanner's pattern and bounds, but predates the ledger
    // epoch the executor enforces.
    add_file(tmp.path(), "202507", "001_early.sql", "CREATE TABLE t6 (id INTEGER);");
    let mut db = open_db().await;

    let err = run(&mut db, tmp.path()).await.unwrap_err();
    assert!(matches!(err, RunnerError::InvalidDate { .. }), "{err}");

    // Rejected before any ledger mutation.
    assert!(db.find_change("001_early.sql", 202507, false).await.unwrap().is_none());
}
