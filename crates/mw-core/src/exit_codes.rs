//! Exit status mapping for the mw-core CLI.
//!
//! The process exit status carries the numeric session result: the final
//! event count on success (0 means success with zero events), the -1
//! sentinel on operational failure.

use crate::stats::RunStatistics;
use mw_common::Result;

/// Sentinel exit status for operational failures (255 once truncated by the
/// operating system).
pub const SENTINEL_FAILURE: i32 = -1;

/// Map a session outcome to the process exit status.
pub fn from_outcome(outcome: &Result<RunStatistics>) -> i32 {
    match outcome {
        Ok(stats) => stats.count as i32,
        Err(_) => SENTINEL_FAILURE,
    }
}
