//! Memory and Loader Error definitions.
//!
//! This module defines the error handling for the simulator's outer surfaces. It provides:
//! 1. **Memory Errors:** Out-of-range byte and word accesses against the flat memory store.
//! 2. **Load Errors:** Fatal problems found while reading an object file, with line context.
//! 3. **Line Errors:** The specific reason a single object-file line was rejected.
//!
//! Runtime status codes (`HLT`, `ADR`, `INS`) are not errors; they are values carried
//! through the pipeline by [`Stat`](crate::core::arch::stat::Stat).

use thiserror::Error;

/// Error returned by a main memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Part of the accessed range lies outside `[0, capacity)`.
    #[error("access of {len} byte(s) at {addr:#x} is outside memory of {capacity:#x} bytes")]
    OutOfRange {
        /// First address of the access.
        addr: u64,
        /// Number of bytes accessed.
        len: u64,
        /// Memory capacity in bytes.
        capacity: usize,
    },
}

/// Reason a single object-file line was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LineError {
    /// The line has no `|` separating the encoding from the source text.
    #[error("missing '|' separator")]
    MissingSeparator,

    /// The line has an address but no `:` after it.
    #[error("missing ':' after address")]
    MissingColon,

    /// The address is not of the form `0xHHH`.
    #[error("malformed address")]
    BadAddress,

    /// The data field contains a character that is not a hex digit.
    #[error("invalid character {0:?} in data")]
    BadData(char),

    /// A data token has an odd number of hex digits.
    #[error("odd number of hex digits in data")]
    OddDigits,

    /// The address does not lie beyond the bytes stored by earlier lines.
    #[error("address {addr:#x} overlaps or precedes earlier data ending at {last:#x}")]
    OutOfOrder {
        /// Address given on this line.
        addr: u64,
        /// Last address written by a previous line.
        last: u64,
    },

    /// The data would extend past the end of memory.
    #[error("{len} byte(s) at {addr:#x} exceed memory capacity {capacity:#x}")]
    OutOfRange {
        /// Address given on this line.
        addr: u64,
        /// Number of data bytes on this line.
        len: u64,
        /// Memory capacity in bytes.
        capacity: usize,
    },
}

/// Error returned when an object file cannot be loaded.
///
/// Loading aborts on the first error and leaves memory untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file name does not end in `.yo`.
    #[error("'{0}' is not an object file (expected a .yo extension)")]
    BadFileName(String),

    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of the file is malformed.
    #[error("error on line {line}: {kind}: {text}")]
    Line {
        /// One-based line number.
        line: usize,
        /// Text of the offending line.
        text: String,
        /// What was wrong with it.
        kind: LineError,
    },
}

impl From<MemoryError> for LineError {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::OutOfRange {
                addr,
                len,
                capacity,
            } => Self::OutOfRange {
                addr,
                len,
                capacity,
            },
        }
    }
}
