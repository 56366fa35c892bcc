//! Bank range file loader.
//!
//! # Supported Format
//!
//! One record per line, no header row:
//!
//! ```text
//! TestBank,800000,800999
//! Bank Ltd,400000,400099
//! ```
//!
//! Each line is split on the first two commas into name, lower bound and
//! upper bound. Only the line ending (`\n` or `\r\n`) is removed; names are
//! kept exactly as written and bounds must be plain digits. Lines are parsed
//! independently: any line that does not produce a valid [`BankRange`]
//! (including a blank line) is skipped and reported, and loading continues
//! with the next line. Loading only fails when the source itself cannot be
//! read.

use super::{BankDirectory, BankRange, Bound, DirectoryError, RecordError};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A record that was left out of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number in the source.
    pub line: u64,
    /// Why the record was rejected.
    pub error: RecordError,
}

/// Result of loading a range source: the directory plus what was skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Ranges that loaded successfully, in source order.
    pub directory: BankDirectory,
    /// Records that were rejected, in source order.
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    /// Discards the skipped-record list.
    pub fn into_directory(self) -> BankDirectory {
        self.directory
    }
}

/// Loads bank range files into a [`BankDirectory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeLoader;

impl RangeLoader {
    /// Creates a loader.
    pub fn new() -> Self {
        Self
    }

    /// Loads ranges from a file.
    ///
    /// ```rust,ignore
    /// use bank_card_validator::directory::RangeLoader;
    ///
    /// let report = RangeLoader::new().load_file("banks.txt")?;
    /// for skipped in &report.skipped {
    ///     eprintln!("line {}: {}", skipped.line, skipped.error);
    /// }
    /// ```
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<LoadReport, DirectoryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DirectoryError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loading bank ranges");
        self.load_report(file)
    }

    /// Loads ranges from a reader, returning the directory and every skipped record.
    pub fn load_report<R: Read>(&self, reader: R) -> Result<LoadReport, DirectoryError> {
        let mut reader = BufReader::new(reader);
        let mut report = LoadReport::default();
        let mut buf = Vec::new();
        let mut line: u64 = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line += 1;

            let parsed = match std::str::from_utf8(strip_line_ending(&buf)) {
                Ok(text) => parse_line(text),
                Err(err) => Err(RecordError::Unreadable(err.to_string())),
            };

            match parsed {
                Ok(range) => report.directory.push(range),
                Err(error) => {
                    tracing::warn!(line, %error, "skipping malformed bank range record");
                    report.skipped.push(SkippedRecord { line, error });
                }
            }
        }

        let overlaps = report.directory.overlaps();
        if !overlaps.is_empty() {
            tracing::warn!(
                pairs = overlaps.len(),
                "bank ranges overlap; the first range in file order wins"
            );
        }

        tracing::info!(
            ranges = report.directory.ranges().len(),
            skipped = report.skipped.len(),
            "loaded bank directory"
        );

        Ok(report)
    }

    /// Loads ranges from a string.
    pub fn parse(&self, source: &str) -> Result<LoadReport, DirectoryError> {
        self.load_report(source.as_bytes())
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Turns one `name,from,to` line into a range.
///
/// Only the first two commas separate fields, so anything after the second
/// comma belongs to the upper bound (and fails to parse).
fn parse_line(line: &str) -> Result<BankRange, RecordError> {
    let fields: Vec<&str> = line.splitn(3, ',').collect();
    let [name, from, to] = fields.as_slice() else {
        return Err(RecordError::FieldCount {
            found: fields.len(),
        });
    };

    let from = parse_bound(Bound::From, from)?;
    let to = parse_bound(Bound::To, to)?;
    BankRange::new(*name, from, to)
}

fn parse_bound(bound: Bound, value: &str) -> Result<u32, RecordError> {
    // `u32::from_str` accepts a leading '+'; bounds are plain digits only.
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordError::InvalidBound {
            bound,
            value: value.to_string(),
        });
    }

    value.parse::<u32>().map_err(|_| RecordError::InvalidBound {
        bound,
        value: value.to_string(),
    })
}
