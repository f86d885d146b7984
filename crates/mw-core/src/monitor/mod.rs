//! The run use case: supervise a workload and record `#BR` events.
//!
//! A session pulls lines from the supervisor one at a time (the sole
//! suspension point), scans each through the matcher, and on a well-formed
//! match updates the statistics and appends a record to the results log.
//! The stop threshold is checked immediately after each counted event; the
//! remaining output is then left undrained and the child is reaped by wait.

pub mod matcher;
pub mod supervisor;

pub use matcher::{EventMatcher, Scan, BR_PATTERN};
pub use supervisor::ProcessSupervisor;

use crate::codec::{EventRecord, LogWriter};
use crate::stats::{epoch_now, RunStatistics};
use mw_common::{Error, Result};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Immutable configuration for one monitoring session.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Workload command: program followed by its arguments.
    pub command: Vec<String>,

    /// Stop after this many counted events; 0 monitors until the stream
    /// ends.
    pub stop_threshold: u64,

    /// Echo every workload output line verbatim to stdout.
    pub verbose: bool,

    /// Path of the CSV results log.
    pub log_path: PathBuf,
}

impl MonitorConfig {
    /// Build a config; surrounding whitespace on the log path is trimmed.
    pub fn new(command: Vec<String>, stop_threshold: u64, verbose: bool, log_path: &str) -> Self {
        Self {
            command,
            stop_threshold,
            verbose,
            log_path: PathBuf::from(log_path.trim()),
        }
    }
}

/// One run of the monitoring engine.
///
/// Owns its log file and child process exclusively; independent sessions
/// with their own command and log path can run concurrently.
pub struct MonitorSession {
    config: MonitorConfig,
}

impl MonitorSession {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    /// Execute the workload and record every well-formed `#BR` event.
    ///
    /// Returns the session statistics; a fresh instance is created per
    /// call. Log and spawn failures abort the run; partial log content up
    /// to the failure stays on disk.
    pub fn run(&self) -> Result<RunStatistics> {
        let mut stats = RunStatistics::start(epoch_now());
        let mut writer = LogWriter::create(&self.config.log_path).map_err(Error::LogIo)?;
        let matcher = EventMatcher::new();
        let mut supervisor = ProcessSupervisor::spawn(&self.config.command)?;

        while let Some(line) = supervisor.next_line() {
            if self.config.verbose {
                println!("{line}");
            }
            match matcher.scan(&line) {
                Scan::NoMatch => {}
                Scan::Malformed => {
                    warn!(line = %line, "malformed #BR line dropped");
                }
                Scan::Event { status, address } => {
                    stats.record_event(epoch_now());
                    let record = EventRecord {
                        datetime: stats.display_timestamp.clone(),
                        elapsed: stats.elapsed_secs,
                        count: stats.count,
                        status,
                        address,
                        epoch: stats.end_epoch,
                    };
                    writer.append(&record).map_err(Error::LogIo)?;
                    info!(
                        timestamp = %record.datetime,
                        elapsed = record.elapsed,
                        count = record.count,
                        "#BR event recorded"
                    );
                    if self.config.stop_threshold > 0 && stats.count >= self.config.stop_threshold
                    {
                        info!(
                            threshold = self.config.stop_threshold,
                            "stop threshold reached"
                        );
                        break;
                    }
                }
            }
        }

        match supervisor.wait() {
            Ok(status) => debug!(?status, "workload exited"),
            Err(err) => warn!(error = %err, "failed to reap workload"),
        }
        Ok(stats)
    }
}
