//! MPX Watch CLI.
//!
//! Runs a workload while recording `#BR` events (`--cmd`), or replays an
//! existing results log (the default mode). The exit status carries the
//! numeric result: the final event count on success, 255 (the -1 sentinel)
//! on operational failure.

use clap::Parser;
use mw_core::monitor::{MonitorConfig, MonitorSession};
use mw_core::stats::RunStatistics;
use mw_core::{capabilities, exit_codes, logging, replay, report, DEFAULT_LOG_PATH};
use mw_core::{Error, Result};
use std::path::PathBuf;
use std::process;
use tracing::{error, warn};

#[derive(Parser, Debug)]
#[command(
    name = "mw-core",
    about = "Detect MPX #BR events while running a workload"
)]
struct Cli {
    /// Command line of the workload to execute
    #[arg(short = 'c', long = "cmd", value_name = "'cmd'")]
    cmd: Option<String>,

    /// Path to the output csv results log
    #[arg(short = 'l', long = "log", value_name = "path", default_value = DEFAULT_LOG_PATH)]
    log: String,

    /// Path to read an existing csv results log
    #[arg(short = 'r', long = "rlog", value_name = "path", default_value = DEFAULT_LOG_PATH)]
    rlog: String,

    /// Stop after reaching this #BR count (0 = unbounded)
    #[arg(short = 's', long = "stop", value_name = "n", default_value_t = 0)]
    stop: u64,

    /// Enable verbose mode to show everything
    #[arg(short = 'V')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let (outcome, log_path) = match cli.cmd.as_deref() {
        Some(cmdline) => run_mode(&cli, cmdline),
        None => replay_mode(&cli),
    };

    match &outcome {
        Ok(stats) => print!("{}", report::render_summary(stats, &log_path)),
        Err(err) => error!(code = err.code(), error = %err, "operation failed"),
    }
    process::exit(exit_codes::from_outcome(&outcome));
}

/// Execute the workload and record events to `--log`.
fn run_mode(cli: &Cli, cmdline: &str) -> (Result<RunStatistics>, PathBuf) {
    let log_path = PathBuf::from(cli.log.trim());

    let command = match shell_words::split(cmdline) {
        Ok(command) if !command.is_empty() => command,
        Ok(_) => {
            let err = Error::InvalidCommand {
                reason: "empty command".into(),
            };
            return (Err(err), log_path);
        }
        Err(err) => {
            let err = Error::InvalidCommand {
                reason: err.to_string(),
            };
            return (Err(err), log_path);
        }
    };

    if !capabilities::detect().has_mpx() {
        warn!("MPX support not detected on this host; #BR events are unlikely");
    }

    let config = MonitorConfig::new(command, cli.stop, cli.verbose, &cli.log);
    (MonitorSession::new(config).run(), log_path)
}

/// Replay the existing log named by `--rlog`.
fn replay_mode(cli: &Cli) -> (Result<RunStatistics>, PathBuf) {
    let log_path = PathBuf::from(cli.rlog.trim());
    (replay::replay(&log_path), log_path)
}
