//! Workload process supervision.
//!
//! Spawns the workload with no shell interpretation and exposes its merged
//! stdout/stderr as a blocking sequence of decoded lines. The merge happens
//! at the pipe level (both streams share one write end), so lines arrive in
//! the exact order the child emitted them.

use mw_common::{Error, Result};
use std::io::{self, BufRead, BufReader, PipeReader};
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::debug;

/// A supervised child process and its merged output stream.
#[derive(Debug)]
pub struct ProcessSupervisor {
    child: Child,
    reader: BufReader<PipeReader>,
}

impl ProcessSupervisor {
    /// Spawn `command` (program followed by its arguments).
    pub fn spawn(command: &[String]) -> Result<Self> {
        let (program, args) = command.split_first().ok_or(Error::InvalidCommand {
            reason: "empty command".into(),
        })?;

        let (reader, stdout_writer) = io::pipe().map_err(|e| spawn_error(program, e))?;
        let stderr_writer = stdout_writer
            .try_clone()
            .map_err(|e| spawn_error(program, e))?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(stdout_writer)
            .stderr(stderr_writer);
        let child = cmd.spawn().map_err(|e| spawn_error(program, e))?;
        // The parent's copies of the write end must close here, or the
        // reader never observes EOF.
        drop(cmd);

        Ok(Self {
            child,
            reader: BufReader::new(reader),
        })
    }

    /// Next decoded line, without its trailing newline.
    ///
    /// Blocks until the workload emits a line or closes its output; `None`
    /// at end of stream. Lines that are not valid UTF-8 are dropped and
    /// iteration continues.
    pub fn next_line(&mut self) -> Option<String> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => return None,
                Ok(_) => match std::str::from_utf8(&buf) {
                    Ok(line) => return Some(line.trim_end_matches(['\r', '\n']).to_string()),
                    Err(_) => {
                        debug!("dropping undecodable output line");
                        continue;
                    }
                },
                Err(err) => {
                    debug!(error = %err, "output stream read failed");
                    return None;
                }
            }
        }
    }

    /// Wait for the workload to exit and release the stream.
    pub fn wait(mut self) -> io::Result<ExitStatus> {
        self.child.wait()
    }
}

fn spawn_error(program: &str, source: io::Error) -> Error {
    Error::Spawn {
        program: program.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".into(), "-c".into(), script.into()]
    }

    #[test]
    fn test_yields_lines_in_order() {
        let mut sup = ProcessSupervisor::spawn(&sh("echo one; echo two")).expect("spawn");
        assert_eq!(sup.next_line().as_deref(), Some("one"));
        assert_eq!(sup.next_line().as_deref(), Some("two"));
        assert_eq!(sup.next_line(), None);
        assert!(sup.wait().expect("wait").success());
    }

    #[test]
    fn test_stderr_is_merged() {
        let mut sup =
            ProcessSupervisor::spawn(&sh("echo out; echo err 1>&2; echo tail")).expect("spawn");
        let mut lines = Vec::new();
        while let Some(line) = sup.next_line() {
            lines.push(line);
        }
        assert_eq!(lines, ["out", "err", "tail"]);
        let _ = sup.wait();
    }

    #[test]
    fn test_undecodable_line_is_skipped() {
        let mut sup =
            ProcessSupervisor::spawn(&sh("printf '\\377\\376\\n'; echo ok")).expect("spawn");
        assert_eq!(sup.next_line().as_deref(), Some("ok"));
        assert_eq!(sup.next_line(), None);
        let _ = sup.wait();
    }

    #[test]
    fn test_spawn_failure() {
        let err = ProcessSupervisor::spawn(&["/definitely/not/a/binary".into()]).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn test_empty_command() {
        let err = ProcessSupervisor::spawn(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidCommand { .. }));
    }
}
