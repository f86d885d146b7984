//! MPX Watch core engine.
//!
//! Supervises a workload, scans its merged output stream for Intel MPX
//! `#BR` bound-range exception reports, records each event to a CSV results
//! log, and replays existing logs into the same statistics shape.
//!
//! # Running a workload
//!
//! ```ignore
//! use mw_core::monitor::{MonitorConfig, MonitorSession};
//!
//! let config = MonitorConfig::new(vec!["./test01".into()], 0, false, "results.csv");
//! let stats = MonitorSession::new(config).run()?;
//! let summary = mw_core::report::render_summary(&stats, std::path::Path::new("results.csv"));
//! ```
//!
//! # Replaying a log
//!
//! ```ignore
//! let stats = mw_core::replay::replay(std::path::Path::new("results.csv"))?;
//! ```

pub mod capabilities;
pub mod codec;
pub mod exec;
pub mod exit_codes;
pub mod fsutil;
pub mod logging;
pub mod monitor;
pub mod replay;
pub mod report;
pub mod stats;

pub use mw_common::{Error, Result};

/// Default path for the CSV results log.
pub const DEFAULT_LOG_PATH: &str = "results.csv";
