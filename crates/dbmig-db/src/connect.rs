//! Bounded retry with exponential backoff for connection establishment.
//!
//! The delay schedule lives here as a pure function so the timing table
//! is testable without sleeping; [`crate::MySqlBackend::connect`] drives
//! the actual attempts.

use std::time::Duration;

/// Maximum connection attempts before giving up.
pub const MAX_ATTEMPTS: u32 = 5;

/// Cap on any single backoff delay, in seconds.
pub const MAX_BACKOFF_SECS: u64 = 30;

/// Delay slept before `attempt` (1-based).
///
/// The first attempt never waits; attempts 2-5 wait 2, 4, 8 and 16
/// seconds. From attempt 6 onward the delay is capped at 30 seconds,
/// though the default budget never reaches that far.
pub fn backoff_delay(attempt: u32) -> Duration {
    if attempt <= 1 {
        return Duration::ZERO;
    }
    let secs = 2u64.saturating_pow(attempt - 1);
    Duration::from_secs(secs.min(MAX_BACKOFF_SECS))
}
