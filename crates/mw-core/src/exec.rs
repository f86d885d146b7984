//! Command execution primitive.
//!
//! Narrow free-function interface for running a program and capturing its
//! output, consumed by the capability probe. No shell interpretation.

use std::process::Command;
use tracing::debug;

/// Captured output of one executed command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Captured standard output, lossily decoded.
    pub stdout: String,

    /// Exit status code; -1 when the process was terminated by a signal.
    pub exit_code: i32,
}

impl CommandOutput {
    /// Whether the command exited zero and produced non-blank output.
    pub fn valid(&self) -> bool {
        self.exit_code == 0 && !self.stdout.trim().is_empty()
    }
}

/// Run `program` with `args` and capture its output.
///
/// Returns `None` when the program cannot be started (missing binary,
/// permission).
pub fn run_capture(program: &str, args: &[&str]) -> Option<CommandOutput> {
    match Command::new(program).args(args).output() {
        Ok(output) => Some(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        }),
        Err(err) => {
            debug!(program, error = %err, "command could not be started");
            None
        }
    }
}
