//! Object File Loader.
//!
//! This module reads Y86-64 object files (`.yo`) into main memory. It performs:
//! 1. **File Checks:** The name must end in `.yo`; the file must be readable text.
//! 2. **Line Parsing:** Every line is `0xADDR: HEXDATA | source`, an address-only line, or a
//!    line that is blank up to the `|`.
//! 3. **Validation:** Addresses must increase past every byte already placed and data must
//!    fit in memory.
//! 4. **Atomic Load:** The whole file is validated before the first byte is written, so a
//!    rejected file leaves memory untouched.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::common::error::{LineError, LoadError};
use crate::memory::Memory;

/// Extension required on object file names.
pub const OBJECT_EXTENSION: &str = ".yo";

/// One parsed line that carries data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRecord {
    /// One-based line number in the file (0 when parsed standalone).
    pub line: usize,
    /// Address of the first byte.
    pub addr: u64,
    /// Bytes to place at `addr`.
    pub bytes: Vec<u8>,
}

/// Checks that `path` names an object file.
///
/// The final path component must be longer than the `.yo` extension and end with it.
///
/// # Errors
///
/// Returns [`LoadError::BadFileName`] if the name is not of that form.
pub fn check_file_name(path: &Path) -> Result<(), LoadError> {
    let valid = path.file_name().is_some_and(|name| {
        let name = name.to_string_lossy();
        name.len() > OBJECT_EXTENSION.len() && name.ends_with(OBJECT_EXTENSION)
    });
    if valid {
        Ok(())
    } else {
        Err(LoadError::BadFileName(path.display().to_string()))
    }
}

/// Parses one object-file line.
///
/// # Arguments
///
/// * `line` - Line text without its terminator.
///
/// # Returns
///
/// `Ok(None)` for lines that place no data (comment-only or address-only lines) and
/// `Ok(Some(record))` for data lines.
///
/// # Errors
///
/// Returns the reason the line is malformed. Every line, blank ones included, needs a `|`.
pub fn parse_line(line: &str) -> Result<Option<ObjectRecord>, LineError> {
    let (code, _source) = line.split_once('|').ok_or(LineError::MissingSeparator)?;
    if code.trim().is_empty() {
        return Ok(None);
    }

    let rest = code.strip_prefix("0x").ok_or(LineError::BadAddress)?;
    let (addr_text, data_text) = rest.split_once(':').ok_or(LineError::MissingColon)?;
    if addr_text.is_empty() || !addr_text.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LineError::BadAddress);
    }
    let addr = u64::from_str_radix(addr_text, 16).map_err(|_| LineError::BadAddress)?;

    if let Some(bad) = data_text
        .chars()
        .find(|c| !c.is_ascii_hexdigit() && !c.is_whitespace())
    {
        return Err(LineError::BadData(bad));
    }

    let mut bytes = Vec::new();
    for token in data_text.split_whitespace() {
        if token.len() % 2 != 0 {
            return Err(LineError::OddDigits);
        }
        for pair in token.as_bytes().chunks(2) {
            let hex = std::str::from_utf8(pair).map_err(|_| LineError::OddDigits)?;
            let byte = u8::from_str_radix(hex, 16).map_err(|_| LineError::OddDigits)?;
            bytes.push(byte);
        }
    }

    if bytes.is_empty() {
        Ok(None)
    } else {
        Ok(Some(ObjectRecord {
            line: 0,
            addr,
            bytes,
        }))
    }
}

/// Parses and validates a whole object file's text.
///
/// # Arguments
///
/// * `text` - File contents.
/// * `capacity` - Size of the memory the data must fit in.
///
/// # Returns
///
/// The data records in file order.
///
/// # Errors
///
/// Returns [`LoadError::Line`] for the first malformed, out-of-order, or oversized line,
/// with its one-based line number.
pub fn parse_object(text: &str, capacity: usize) -> Result<Vec<ObjectRecord>, LoadError> {
    let mut records = Vec::new();
    let mut last: Option<u64> = None;

    for (idx, line) in text.lines().enumerate() {
        let fail = |kind: LineError| LoadError::Line {
            line: idx + 1,
            text: line.to_string(),
            kind,
        };
        let Some(mut record) = parse_line(line).map_err(fail)? else {
            continue;
        };
        record.line = idx + 1;

        let len = record.bytes.len() as u64;
        if let Some(last) = last
            && record.addr <= last
        {
            return Err(fail(LineError::OutOfOrder {
                addr: record.addr,
                last,
            }));
        }
        let end = record
            .addr
            .checked_add(len)
            .filter(|&end| end <= capacity as u64)
            .ok_or_else(|| {
                fail(LineError::OutOfRange {
                    addr: record.addr,
                    len,
                    capacity,
                })
            })?;
        last = Some(end - 1);
        records.push(record);
    }
    Ok(records)
}

/// Loads object-file text into memory.
///
/// # Arguments
///
/// * `text` - File contents.
/// * `mem` - Destination memory; untouched if any line is rejected.
///
/// # Returns
///
/// The number of bytes placed.
///
/// # Errors
///
/// Returns [`LoadError::Line`] if any line is rejected.
pub fn load_object_str(text: &str, mem: &mut Memory) -> Result<usize, LoadError> {
    let records = parse_object(text, mem.capacity())?;
    let lines: Vec<&str> = text.lines().collect();
    let mut total = 0;
    for record in &records {
        mem.load(record.addr, &record.bytes)
            .map_err(|e| LoadError::Line {
                line: record.line,
                text: lines
                    .get(record.line.saturating_sub(1))
                    .map_or_else(String::new, |l| (*l).to_string()),
                kind: e.into(),
            })?;
        total += record.bytes.len();
        debug!("loaded {} byte(s) at {:#x}", record.bytes.len(), record.addr);
    }
    Ok(total)
}

/// Loads an object file from disk into memory.
///
/// # Arguments
///
/// * `path` - Path to a `.yo` file.
/// * `mem` - Destination memory; untouched on any error.
///
/// # Returns
///
/// The number of bytes placed.
///
/// # Errors
///
/// Returns [`LoadError::BadFileName`] for a name without the `.yo` extension,
/// [`LoadError::Io`] if the file cannot be read, or [`LoadError::Line`] for a bad line.
pub fn load_object_file(path: impl AsRef<Path>, mem: &mut Memory) -> Result<usize, LoadError> {
    let path = path.as_ref();
    check_file_name(path)?;
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let total = load_object_str(&text, mem)?;
    info!("loaded {} byte(s) from {}", total, path.display());
    Ok(total)
}
