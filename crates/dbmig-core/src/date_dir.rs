//! `DateDir` - the `YYYYMM` integer naming a migration cohort directory.

use chrono::{Datelike, Local};
use std::fmt;

/// Earliest cohort the ledger tracks. The executor refuses anything dated
/// at or before this, independently of the scanner's dynamic floor.
pub const LEDGER_EPOCH: i64 = 202508;

/// A year-month in `YYYYMM` integer form.
///
/// Fixed-width and zero-padded, so lexicographic directory order equals
/// chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateDir(i64);

impl DateDir {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The current year-month from the local clock.
    pub fn now() -> Self {
        let today = Local::now();
        Self(i64::from(today.year()) * 100 + i64::from(today.month()))
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Parse a directory name as a dated cohort.
    ///
    /// Accepts exactly six digits of the shape `20[2-D]\d` followed by a
    /// month `01`-`12`, where `D` is the decade digit of `now`: that is,
    /// syntactically a year-month between 2020-01 and the end of the
    /// current decade. Anything else (including a plausible-looking name
    /// like `2021-01`) is not a cohort at all.
    pub fn from_dir_name(name: &str, now: DateDir) -> Option<DateDir> {
        let bytes = name.as_bytes();
        if bytes.len() != 6 || !bytes.iter().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !name.starts_with("20") {
            return None;
        }
        let decade = i64::from(bytes[2] - b'0');
        let current_decade = (now.0 / 100 % 100) / 10;
        if decade < 2 || decade > current_decade {
            return None;
        }
        let month: i64 = name[4..6].parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        name.parse().ok().map(DateDir)
    }

    /// Strict executor-side check: after [`LEDGER_EPOCH`] and not in the
    /// future.
    pub fn is_due(self, now: DateDir) -> bool {
        self.0 > LEDGER_EPOCH && self.0 <= now.0
    }
}

impl fmt::Display for DateDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

#[cfg(test)]
#[path = "date_dir_test.rs"]
mod tests;
