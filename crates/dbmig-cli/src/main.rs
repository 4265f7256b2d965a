//! dbmig - database migration runner
//!
//! Exit status is 0 on success, including the "nothing to do" and "no
//! migrations directory" cases, and non-zero on any failure. All
//! user-visible output is timestamped lines on stdout.

use clap::Parser;
use dbmig_core::{progress, DbConfig};
use dbmig_db::MySqlBackend;
use dbmig_runner::Runner;
use std::process::ExitCode;

mod cli;

use cli::Cli;

const MIGRATIONS_ROOT: &str = "migrations";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    progress("Starting database migrations...");

    let config = match DbConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Reported, not retried; the run fails without crashing.
            log::debug!("{e}");
            progress("Missing environment variables");
            progress("Database migrations failed.");
            return ExitCode::FAILURE;
        }
    };

    let mut db = match MySqlBackend::connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            progress(&e.to_string());
            progress("Database migrations failed.");
            return ExitCode::FAILURE;
        }
    };

    match Runner::new(&mut db, MIGRATIONS_ROOT).run().await {
        Ok(report) => {
            progress(&format!(
                "Database migrations completed successfully ({} applied, {} skipped).",
                report.applied, report.skipped
            ));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("run halted: {e}");
            progress("Database migrations failed.");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
