//! Library-level integration tests for the run/record/replay engine.
//!
//! Workloads are small `sh -c` scripts that print `#BR` report lines the
//! way an MPX-enabled runtime would.

use mw_core::codec;
use mw_core::fsutil;
use mw_core::monitor::{MonitorConfig, MonitorSession};
use mw_core::replay::replay;
use mw_core::{Error, Result};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn sh(script: &str) -> Vec<String> {
    vec!["sh".into(), "-c".into(), script.into()]
}

/// Script printing `n` well-formed `#BR` report lines.
fn br_script(n: usize) -> String {
    format!(
        "i=0; while [ $i -lt {n} ]; do \
         echo \"Saw a #BR! status 0 at 0x401020\"; i=$((i+1)); done"
    )
}

fn run(command: Vec<String>, stop: u64, log: &Path) -> Result<mw_core::stats::RunStatistics> {
    let config = MonitorConfig::new(command, stop, false, &log.to_string_lossy());
    MonitorSession::new(config).run()
}

fn data_rows(log: &Path) -> Vec<codec::EventRecord> {
    let contents = fs::read_to_string(log).expect("read log");
    contents
        .lines()
        .skip(1)
        .enumerate()
        .map(|(i, line)| codec::decode_record(line, i + 2).expect("decode row"))
        .collect()
}

#[test]
fn test_six_events_within_three_seconds() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("results.csv");

    let sts = run(sh(&br_script(6)), 0, &log).expect("run");
    assert_eq!(sts.count, 6);
    assert!(sts.elapsed_secs < 3);
    assert_ne!(sts.begin_epoch, 0);
    assert_ne!(sts.end_epoch, 0);

    let contents = fs::read_to_string(&log).expect("read log");
    assert_eq!(contents.lines().count(), 7);
    assert!(contents.starts_with("datetime,elapsed,count,status,address,epoch\n"));
}

#[test]
fn test_run_replay_round_trip() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("results.csv");

    let live = run(sh(&br_script(6)), 0, &log).expect("run");
    let replayed = replay(&log).expect("replay");

    assert_eq!(replayed.count, live.count);
    assert_eq!(replayed.end_epoch, live.end_epoch);
    assert_eq!(replayed.elapsed_secs, live.elapsed_secs);
    assert_eq!(replayed.display_timestamp, live.display_timestamp);

    fsutil::remove_if_exists(&log).expect("cleanup");
    assert!(!fsutil::is_file(&log));
}

#[test]
fn test_stop_threshold_enforced() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("results.csv");

    let sts = run(sh(&br_script(100)), 1, &log).expect("run");
    assert_eq!(sts.count, 1);
    assert_eq!(data_rows(&log).len(), 1);
}

#[test]
fn test_zero_event_run_and_replay_asymmetry() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("results.csv");

    let live = run(sh("echo no events here"), 0, &log).expect("run");
    assert_eq!(live.count, 0);
    // A live run pins begin/end to the session start even with no events.
    assert_ne!(live.begin_epoch, 0);
    assert_eq!(live.begin_epoch, live.end_epoch);
    assert!(!live.display_timestamp.is_empty());

    let replayed = replay(&log).expect("replay");
    assert_eq!(replayed.count, 0);
    // The replay of that same log leaves everything at zero.
    assert_eq!(replayed.begin_epoch, 0);
    assert_eq!(replayed.end_epoch, 0);
    assert!(replayed.display_timestamp.is_empty());
}

#[test]
fn test_malformed_line_does_not_count_or_abort() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("results.csv");

    let script = "echo \"Saw a #BR! truncated\"; \
                  echo \"Saw a #BR! status 0 at 0x401020\"";
    let sts = run(sh(script), 0, &log).expect("run");
    assert_eq!(sts.count, 1);
    assert_eq!(data_rows(&log).len(), 1);
}

#[test]
fn test_sequence_numbers_are_monotonic() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("results.csv");

    run(sh(&br_script(5)), 0, &log).expect("run");
    let counts: Vec<u64> = data_rows(&log).iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_events_on_stderr_are_seen() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("results.csv");

    let script = "echo \"Saw a #BR! status 0 at 0x401020\" 1>&2";
    let sts = run(sh(script), 0, &log).expect("run");
    assert_eq!(sts.count, 1);
}

#[test]
fn test_spawn_failure_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("results.csv");

    let err = run(vec!["/definitely/not/a/binary".into()], 0, &log).unwrap_err();
    assert!(matches!(err, Error::Spawn { .. }));
    // The log was already created with its header before the spawn.
    let contents = fs::read_to_string(&log).expect("read log");
    assert_eq!(contents.lines().count(), 1);
}

#[test]
fn test_replay_of_missing_log_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let err = replay(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, Error::LogIo(_)));
}

#[test]
fn test_recorded_fields_match_the_line() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("results.csv");

    let script = "echo \"Saw a #BR! status 7 at 0xdeadbeef\"";
    run(sh(script), 0, &log).expect("run");

    let rows = data_rows(&log);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "7");
    assert_eq!(rows[0].address, "0xdeadbeef");
    assert_eq!(rows[0].count, 1);
    assert_ne!(rows[0].epoch, 0);
}
