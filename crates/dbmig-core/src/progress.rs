//! Timestamped progress lines on stdout.
//!
//! The runner's user-visible surface is line-oriented: one
//! `YYYY-MM-DD HH:MM:SS - message` line per phase transition, per file
//! processed or skipped, and per error. Anything beyond that goes through
//! the `log` facade instead.

use chrono::Local;

/// Print one timestamped progress line.
pub fn progress(message: &str) {
    println!("{} - {}", Local::now().format("%Y-%m-%d %H:%M:%S"), message);
}
