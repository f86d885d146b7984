//! The read use case: reconstruct statistics from an existing results log.

use crate::codec;
use crate::stats::RunStatistics;
use mw_common::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Load `path` and rebuild the statistics the recording run produced.
///
/// The first row is skipped as the header; every remaining row is one event
/// record in file order. `begin` comes from the first row's epoch, `end` and
/// `elapsed` from the last row (the persisted elapsed value is trusted, not
/// recomputed). A zero-row log yields all-zero statistics. Any malformed row
/// fails the whole replay; there is no partial result.
pub fn replay(path: &Path) -> Result<RunStatistics> {
    let file = File::open(path).map_err(Error::LogIo)?;
    let reader = BufReader::new(file);

    let mut count: u64 = 0;
    let mut begin_epoch = 0i64;
    let mut last: Option<codec::EventRecord> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::LogIo)?;
        if index == 0 {
            // Header row, skipped blindly.
            continue;
        }
        let record = codec::decode_record(&line, index + 1)?;
        if count == 0 {
            begin_epoch = record.epoch;
        }
        count += 1;
        last = Some(record);
    }

    debug!(count, path = %path.display(), "results log replayed");
    Ok(match last {
        Some(last) => RunStatistics::from_replay(count, begin_epoch, last.epoch, last.elapsed),
        None => RunStatistics::default(),
    })
}
