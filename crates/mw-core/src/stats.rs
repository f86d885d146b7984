//! Run statistics for one monitoring or replay session.
//!
//! Replaces the loosely-keyed per-session counters of older tooling with a
//! value type with named fields and explicit update rules.

use chrono::{Local, TimeZone};
use serde::Serialize;

/// Timestamp rendering used in the results log and the summary block.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d|%H:%M:%S";

/// Counters and timestamps describing one session.
///
/// Owned exclusively by a single active run or replay invocation; a fresh
/// instance is created at the start of every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Number of matched `#BR` events observed so far.
    pub count: u64,

    /// Unix seconds at session start (run) or first recorded row (replay).
    pub begin_epoch: i64,

    /// Unix seconds of the most recent event.
    pub end_epoch: i64,

    /// `end_epoch - begin_epoch`, recomputed on every update.
    pub elapsed_secs: i64,

    /// Human-readable rendering of `end_epoch`; empty when unset.
    pub display_timestamp: String,
}

impl RunStatistics {
    /// Fresh statistics for a live run: begin and end pinned to `now`.
    pub fn start(now: i64) -> Self {
        Self {
            count: 0,
            begin_epoch: now,
            end_epoch: now,
            elapsed_secs: 0,
            display_timestamp: format_epoch(now),
        }
    }

    /// Record one matched event observed at `now`.
    pub fn record_event(&mut self, now: i64) {
        self.count += 1;
        self.end_epoch = now;
        self.elapsed_secs = self.end_epoch - self.begin_epoch;
        self.display_timestamp = format_epoch(now);
    }

    /// Statistics reconstructed from persisted rows.
    ///
    /// A zero-row log leaves every field at zero with an empty display
    /// timestamp, unlike a zero-event live run which pins begin/end to the
    /// session start time. The asymmetry is observable behavior and is kept
    /// as is.
    pub fn from_replay(count: u64, begin_epoch: i64, end_epoch: i64, elapsed_secs: i64) -> Self {
        if count == 0 {
            return Self::default();
        }
        Self {
            count,
            begin_epoch,
            end_epoch,
            elapsed_secs,
            display_timestamp: format_epoch(end_epoch),
        }
    }
}

/// Current Unix time in whole seconds.
pub fn epoch_now() -> i64 {
    Local::now().timestamp()
}

/// Render epoch seconds as local `%Y-%m-%d|%H:%M:%S`.
pub fn format_epoch(epoch: i64) -> String {
    Local
        .timestamp_opt(epoch, 0)
        .single()
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}
