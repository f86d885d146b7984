//! Error types for MPX Watch.

use thiserror::Error;

/// Result type alias for MPX Watch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified fatal error type for MPX Watch.
///
/// Only conditions that abort the current run or replay live here.
/// Recoverable anomalies (a malformed `#BR` line, an undecodable output
/// line) are handled at the point of detection and never become an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("invalid workload command: {reason}")]
    InvalidCommand { reason: String },

    // Workload errors (20-29)
    #[error("failed to spawn workload '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // Log I/O errors (30-39)
    #[error("results log I/O error: {0}")]
    LogIo(#[source] std::io::Error),

    // Replay errors (40-49)
    #[error("malformed log row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

impl Error {
    /// Returns the stable error code for this error type.
    /// Used for diagnostic reporting on the error stream.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidCommand { .. } => 10,
            Error::Spawn { .. } => 20,
            Error::LogIo(_) => 30,
            Error::MalformedRow { .. } => 40,
        }
    }
}
