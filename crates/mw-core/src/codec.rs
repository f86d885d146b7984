//! Event log codec.
//!
//! One `#BR` event per comma-delimited row, fixed column order, literal
//! header as the first row. A field containing the delimiter or a quote is
//! wrapped in double quotes with inner quotes doubled; decoding is the exact
//! inverse. Rows that do not decode to exactly the fixed columns are
//! rejected, which the replay path treats as fatal.

use mw_common::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Fixed column order of the results log.
pub const LOG_COLUMNS: [&str; 6] = ["datetime", "elapsed", "count", "status", "address", "epoch"];

/// One matched `#BR` event, immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Formatted local datetime of the match.
    pub datetime: String,

    /// Seconds since session start at the time of the match.
    pub elapsed: i64,

    /// 1-based sequence number; doubles as the row's position.
    pub count: u64,

    /// Status token extracted from the matched line.
    pub status: String,

    /// Address token extracted from the matched line.
    pub address: String,

    /// Unix seconds of the match.
    pub epoch: i64,
}

/// The literal header row.
pub fn header_row() -> String {
    LOG_COLUMNS.join(",")
}

/// Serialize one record as a log row (no trailing newline).
pub fn encode_record(record: &EventRecord) -> String {
    [
        encode_field(&record.datetime),
        record.elapsed.to_string(),
        record.count.to_string(),
        encode_field(&record.status),
        encode_field(&record.address),
        record.epoch.to_string(),
    ]
    .join(",")
}

/// Decode one data row. `line` is the 1-based line number used in errors.
pub fn decode_record(row: &str, line: usize) -> Result<EventRecord> {
    let fields = split_row(row);
    if fields.len() != LOG_COLUMNS.len() {
        return Err(Error::MalformedRow {
            line,
            reason: format!("expected {} columns, got {}", LOG_COLUMNS.len(), fields.len()),
        });
    }
    Ok(EventRecord {
        datetime: fields[0].clone(),
        elapsed: parse_numeric(&fields[1], "elapsed", line)?,
        count: parse_numeric(&fields[2], "count", line)?,
        status: fields[3].clone(),
        address: fields[4].clone(),
        epoch: parse_numeric(&fields[5], "epoch", line)?,
    })
}

fn parse_numeric<T: std::str::FromStr>(field: &str, name: &str, line: usize) -> Result<T> {
    field.parse().map_err(|_| Error::MalformedRow {
        line,
        reason: format!("non-numeric {name} field '{field}'"),
    })
}

fn encode_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split a row into fields, honoring double-quote escaping.
fn split_row(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}

/// Append-only writer for the results log.
///
/// Writes the header at construction and flushes after every record so that
/// partial logs survive an aborted run.
pub struct LogWriter {
    inner: BufWriter<File>,
}

impl LogWriter {
    /// Create (truncating) the log at `path` and write the header row.
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        let mut inner = BufWriter::new(file);
        writeln!(inner, "{}", header_row())?;
        inner.flush()?;
        Ok(Self { inner })
    }

    /// Append one record row.
    pub fn append(&mut self, record: &EventRecord) -> std::io::Result<()> {
        writeln!(self.inner, "{}", encode_record(record))?;
        self.inner.flush()
    }
}
