//! Directory scanner: enumerate eligible dated directories and the SQL
//! files inside them, in deterministic order.

use dbmig_core::{progress, DateDir};
use std::path::{Path, PathBuf};

/// A SQL file selected for execution, derived from filesystem state each
/// run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Base name of the SQL file.
    pub file_name: String,
    /// Year-month parsed from the enclosing directory name.
    pub date_dir: DateDir,
    /// Location to read the SQL text from.
    pub path: PathBuf,
}

/// List every eligible migration file under `root`.
///
/// A directory is included when its name parses as a dated cohort (see
/// [`DateDir::from_dir_name`]) and its value lies in `floor..=now`;
/// otherwise it is skipped entirely. The result is directory-major,
/// file-minor, both ascending, which is chronological order because the
/// names are fixed-width. Non-regular entries and unreadable paths are
/// ignored.
pub fn scan(root: &Path, floor: i64, now: DateDir) -> Vec<MigrationFile> {
    let mut files = Vec::new();

    let pattern = root.join("20????");
    let mut dirs: Vec<PathBuf> = match glob::glob(&pattern.to_string_lossy()) {
        Ok(paths) => paths.flatten().collect(),
        Err(e) => {
            log::warn!("bad directory pattern {}: {e}", pattern.display());
            return files;
        }
    };
    dirs.sort();

    for dir in dirs {
        if !dir.is_dir() {
            continue;
        }
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date_dir) = DateDir::from_dir_name(name, now) else {
            continue;
        };
        if date_dir > now || date_dir.value() < floor {
            continue;
        }
        progress(&format!("Processing directory {}", dir.display()));

        let mut sql_files: Vec<PathBuf> = match glob::glob(&dir.join("*.sql").to_string_lossy()) {
            Ok(paths) => paths.flatten().collect(),
            Err(_) => continue,
        };
        sql_files.sort();

        for path in sql_files {
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            files.push(MigrationFile {
                file_name: file_name.to_string(),
                date_dir,
                path,
            });
        }
    }
    files
}

#[cfg(test)]
#[path = "scanner_test.rs"]
mod tests;
