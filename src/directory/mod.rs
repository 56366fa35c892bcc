//! BIN (Bank Identification Number) range directory.
//!
//! A [`BankDirectory`] maps the first six digits of a card number to the
//! name of the issuing bank. Ranges are kept in source order and the first
//! range containing a BIN wins; overlapping ranges are allowed and can be
//! listed with [`BankDirectory::overlaps`].
//!
//! # Example
//!
//! ```
//! use bank_card_validator::directory::{BankDirectory, BankLookup, UNKNOWN_BANK};
//!
//! let directory = BankDirectory::parse("TestBank,800000,800999\nOther,400000,499999\n")?;
//! assert_eq!(directory.len(), 2);
//! assert_eq!(directory.identify(800456), "TestBank");
//! assert_eq!(directory.identify(123456), UNKNOWN_BANK);
//! # Ok::<(), bank_card_validator::directory::DirectoryError>(())
//! ```

mod loader;

pub use loader::{LoadReport, RangeLoader, SkippedRecord};

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Name reported when no range contains a BIN.
pub const UNKNOWN_BANK: &str = "Unknown bank";

/// Largest value a 6-digit BIN can take.
pub const MAX_BIN: u32 = 999_999;

/// Trait for BIN directory implementations.
///
/// The interactive session depends on this trait rather than on
/// [`BankDirectory`] directly, so tests can supply their own lookup.
pub trait BankLookup: Send + Sync {
    /// Returns the first range containing `bin`, if any.
    fn find(&self, bin: u32) -> Option<&BankRange>;

    /// Returns the bank name for `bin`, or [`UNKNOWN_BANK`].
    fn identify(&self, bin: u32) -> &str {
        self.find(bin).map_or(UNKNOWN_BANK, BankRange::name)
    }

    /// Returns the number of ranges.
    fn len(&self) -> usize;

    /// Returns true if there are no ranges.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An inclusive range of 6-digit BINs assigned to one bank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BankRange {
    name: String,
    from: u32,
    to: u32,
}

impl BankRange {
    /// Creates a range, checking that `from <= to <= 999999`.
    pub fn new(name: impl Into<String>, from: u32, to: u32) -> Result<Self, RecordError> {
        for (bound, value) in [(Bound::From, from), (Bound::To, to)] {
            if value > MAX_BIN {
                return Err(RecordError::BoundOutOfRange { bound, value });
            }
        }
        if from > to {
            return Err(RecordError::InvertedRange { from, to });
        }

        Ok(Self {
            name: name.into(),
            from,
            to,
        })
    }

    /// Name of the issuing bank.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive lower bound.
    #[inline]
    pub const fn bin_from(&self) -> u32 {
        self.from
    }

    /// Inclusive upper bound.
    #[inline]
    pub const fn bin_to(&self) -> u32 {
        self.to
    }

    /// Checks if a BIN falls within this range.
    #[inline]
    pub const fn contains(&self, bin: u32) -> bool {
        bin >= self.from && bin <= self.to
    }

    /// Checks if two ranges share at least one BIN.
    #[inline]
    pub const fn overlaps(&self, other: &BankRange) -> bool {
        self.from <= other.to && other.from <= self.to
    }
}

impl fmt::Display for BankRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:06}-{:06})", self.name, self.from, self.to)
    }
}

/// Ordered, read-only collection of BIN ranges.
///
/// Built once at startup and then shared by reference; lookups scan the
/// ranges in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankDirectory {
    ranges: Vec<BankRange>,
}

impl BankDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from ranges, keeping their order.
    pub fn from_ranges(ranges: Vec<BankRange>) -> Self {
        Self { ranges }
    }

    /// Loads a directory from a range file.
    ///
    /// Malformed lines are skipped and logged. Fails only if the file
    /// cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        RangeLoader::new()
            .load_file(path)
            .map(LoadReport::into_directory)
    }

    /// Loads a directory from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        RangeLoader::new()
            .load_report(reader)
            .map(LoadReport::into_directory)
    }

    /// Loads a directory from a string.
    pub fn parse(source: &str) -> Result<Self, DirectoryError> {
        Self::from_reader(source.as_bytes())
    }

    /// Appends a range after all existing ones.
    pub fn push(&mut self, range: BankRange) {
        self.ranges.push(range);
    }

    /// Returns the ranges in insertion order.
    #[inline]
    pub fn ranges(&self) -> &[BankRange] {
        &self.ranges
    }

    /// Returns an iterator over the ranges in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, BankRange> {
        self.ranges.iter()
    }

    /// Lists index pairs `(earlier, later)` of ranges that overlap.
    ///
    /// For any BIN in an overlap only the earlier range is ever returned by
    /// [`BankLookup::find`].
    pub fn overlaps(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.ranges.iter().enumerate() {
            for (j, b) in self.ranges.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

impl BankLookup for BankDirectory {
    fn find(&self, bin: u32) -> Option<&BankRange> {
        let found = self.ranges.iter().find(|range| range.contains(bin));
        tracing::debug!(bin, matched = found.is_some(), "BIN lookup");
        found
    }

    fn len(&self) -> usize {
        self.ranges.len()
    }
}

impl FromIterator<BankRange> for BankDirectory {
    fn from_iter<I: IntoIterator<Item = BankRange>>(iter: I) -> Self {
        Self::from_ranges(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BankDirectory {
    type Item = &'a BankRange;
    type IntoIter = std::slice::Iter<'a, BankRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Which bound of a range record a problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// The inclusive lower bound (second field).
    From,
    /// The inclusive upper bound (third field).
    To,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => write!(f, "from"),
            Self::To => write!(f, "to"),
        }
    }
}

/// Why a single range record was rejected.
///
/// These never abort loading; the record is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The record did not have exactly three fields.
    FieldCount {
        /// Number of fields found.
        found: usize,
    },

    /// A bound is not a non-negative integer.
    InvalidBound {
        /// Which bound.
        bound: Bound,
        /// The text that failed to parse.
        value: String,
    },

    /// A bound is above 999999.
    BoundOutOfRange {
        /// Which bound.
        bound: Bound,
        /// The parsed value.
        value: u32,
    },

    /// The lower bound is greater than the upper bound.
    InvertedRange {
        /// Lower bound.
        from: u32,
        /// Upper bound.
        to: u32,
    },

    /// The line could not be decoded (e.g. invalid UTF-8).
    Unreadable(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { found } => {
                write!(f, "expected 3 fields (name,from,to), found {}", found)
            }
            Self::InvalidBound { bound, value } => {
                write!(f, "'{}' bound is not an integer: {:?}", bound, value)
            }
            Self::BoundOutOfRange { bound, value } => {
                write!(
                    f,
                    "'{}' bound {} is outside the 6-digit BIN space (0-{})",
                    bound, value, MAX_BIN
                )
            }
            Self::InvertedRange { from, to } => {
                write!(f, "range start {} is greater than range end {}", from, to)
            }
            Self::Unreadable(reason) => write!(f, "unreadable record: {}", reason),
        }
    }
}

impl std::error::Error for RecordError {}

/// Error that prevents a directory from being loaded at all.
#[derive(Debug)]
pub enum DirectoryError {
    /// The range file could not be opened.
    Open {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Reading from the source failed part way through.
    Read(io::Error),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open bank range file {}: {}", path.display(), source)
            }
            Self::Read(e) => write!(f, "error reading bank ranges: {}", e),
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Read(e) => Some(e),
        }
    }
}

impl From<io::Error> for DirectoryError {
    fn from(err: io::Error) -> Self {
        Self::Read(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(name: &str, from: u32, to: u32) -> BankRange {
        BankRange::new(name, from, to).unwrap()
    }

    fn sample_directory() -> BankDirectory {
        BankDirectory::from_ranges(vec![
            range("TestBank", 800000, 800999),
            range("Wide Bank", 400000, 499999),
            range("Narrow Bank", 453200, 453299),
        ])
    }

    #[test]
    fn test_bank_range_contains() {
        let r = range("TestBank", 800000, 800999);
        assert!(r.contains(800000));
        assert!(r.contains(800456));
        assert!(r.contains(800999));
        assert!(!r.contains(799999));
        assert!(!r.contains(801000));
    }

    #[test]
    fn test_bank_range_single_bin() {
        let r = range("Single", 123456, 123456);
        assert!(r.contains(123456));
        assert!(!r.contains(123457));
    }

    #[test]
    fn test_bank_range_invariants() {
        assert_eq!(
            BankRange::new("Bad", 500, 400).unwrap_err(),
            RecordError::InvertedRange { from: 500, to: 400 }
        );
        assert_eq!(
            BankRange::new("Bad", 0, 1_000_000).unwrap_err(),
            RecordError::BoundOutOfRange {
                bound: Bound::To,
                value: 1_000_000
            }
        );
        assert!(BankRange::new("Edge", 0, MAX_BIN).is_ok());
    }

    #[test]
    fn test_identify() {
        let directory = sample_directory();
        assert_eq!(directory.identify(800456), "TestBank");
        assert_eq!(directory.identify(410000), "Wide Bank");
        assert_eq!(directory.identify(123456), UNKNOWN_BANK);
    }

    #[test]
    fn test_first_match_wins() {
        let directory = sample_directory();
        // 453201 is in both "Wide Bank" and "Narrow Bank"; the earlier range wins.
        assert_eq!(directory.identify(453201), "Wide Bank");
        assert_eq!(directory.find(453201).map(BankRange::bin_from), Some(400000));
    }

    #[test]
    fn test_overlaps() {
        let directory = sample_directory();
        assert_eq!(directory.overlaps(), vec![(1, 2)]);

        let disjoint: BankDirectory = vec![range("A", 0, 9), range("B", 10, 19)]
            .into_iter()
            .collect();
        assert!(disjoint.overlaps().is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let directory = BankDirectory::new();
        assert!(directory.is_empty());
        assert_eq!(directory.identify(0), UNKNOWN_BANK);
    }

    #[test]
    fn test_push_keeps_order() {
        let mut directory = BankDirectory::new();
        directory.push(range("First", 100000, 199999));
        directory.push(range("Second", 100000, 199999));

        let names: Vec<&str> = directory.iter().map(BankRange::name).collect();
        assert_eq!(names, ["First", "Second"]);
        assert_eq!(directory.identify(150000), "First");
    }

    #[test]
    fn test_range_display() {
        assert_eq!(range("Tiny", 1, 42).to_string(), "Tiny (000001-000042)");
    }

    #[test]
    fn test_record_error_display() {
        assert_eq!(
            RecordError::FieldCount { found: 2 }.to_string(),
            "expected 3 fields (name,from,to), found 2"
        );
        assert_eq!(
            RecordError::InvalidBound {
                bound: Bound::From,
                value: "abc".to_string()
            }
            .to_string(),
            "'from' bound is not an integer: \"abc\""
        );
    }

    #[test]
    fn test_directory_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BankDirectory>();
        assert_send_sync::<DirectoryError>();
    }
}
