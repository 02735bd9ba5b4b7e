//! Main Memory.
//!
//! This module implements the flat byte-addressable store shared by instruction fetch and
//! data access. It provides:
//! 1. **Byte Access:** Bounds-checked single-byte reads and writes.
//! 2. **Word Access:** 8-byte little-endian reads and writes that are all-or-nothing.
//! 3. **Bulk Load:** Placing validated object-file data at an address.
//! 4. **Diffing:** Reporting the words that differ from an earlier image.

use crate::common::constants::WORD_SIZE;
use crate::common::error::MemoryError;

/// Flat memory of `capacity` bytes addressed from zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory.
    ///
    /// # Arguments
    ///
    /// * `size` - Capacity in bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Checks that `[addr, addr + len)` lies inside memory and returns it as a slice range.
    ///
    /// # Arguments
    ///
    /// * `addr` - First byte of the access.
    /// * `len` - Number of bytes accessed.
    ///
    /// # Returns
    ///
    /// The `usize` range of the access.
    ///
    /// # Errors
    ///
    /// `MemoryError::OutOfRange` if any byte falls outside, including when `addr + len`
    /// overflows.
    pub fn check_range(&self, addr: u64, len: u64) -> Result<std::ops::Range<usize>, MemoryError> {
        let err = MemoryError::OutOfRange {
            addr,
            len,
            capacity: self.capacity(),
        };
        let end = addr.checked_add(len).ok_or(err)?;
        let start = usize::try_from(addr).map_err(|_| err)?;
        let end = usize::try_from(end).map_err(|_| err)?;
        if end > self.capacity() {
            return Err(err);
        }
        Ok(start..end)
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// `MemoryError::OutOfRange` if `addr` is past the end of memory.
    pub fn get_byte(&self, addr: u64) -> Result<u8, MemoryError> {
        let range = self.check_range(addr, 1)?;
        Ok(self.data[range.start])
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// `MemoryError::OutOfRange` if `addr` is past the end of memory.
    pub fn put_byte(&mut self, addr: u64, byte: u8) -> Result<(), MemoryError> {
        let range = self.check_range(addr, 1)?;
        self.data[range.start] = byte;
        Ok(())
    }

    /// Reads an 8-byte little-endian word.
    ///
    /// # Errors
    ///
    /// `MemoryError::OutOfRange` if any of the eight bytes is out of range; nothing is read.
    pub fn get_long(&self, addr: u64) -> Result<u64, MemoryError> {
        let range = self.check_range(addr, WORD_SIZE)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[range]);
        Ok(u64::from_le_bytes(bytes))
    }

    /// Writes an 8-byte little-endian word.
    ///
    /// # Errors
    ///
    /// `MemoryError::OutOfRange` if any of the eight bytes is out of range; memory is left
    /// unchanged.
    pub fn put_long(&mut self, addr: u64, val: u64) -> Result<(), MemoryError> {
        let range = self.check_range(addr, WORD_SIZE)?;
        self.data[range].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Copies `bytes` into memory starting at `addr`.
    ///
    /// # Arguments
    ///
    /// * `addr` - Destination address.
    /// * `bytes` - Data to store.
    ///
    /// # Errors
    ///
    /// `MemoryError::OutOfRange` if the data does not fit; nothing is written.
    pub fn load(&mut self, addr: u64, bytes: &[u8]) -> Result<(), MemoryError> {
        let range = self.check_range(addr, bytes.len() as u64)?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Raw view of the whole memory.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Lists the aligned 8-byte words whose contents differ from `before`.
    ///
    /// # Arguments
    ///
    /// * `before` - An earlier image of this memory (typically right after loading).
    ///
    /// # Returns
    ///
    /// `(address, old, new)` triples in ascending address order. A trailing partial word is
    /// compared zero-extended.
    pub fn changed_words(&self, before: &Self) -> Vec<(u64, u64, u64)> {
        let word = WORD_SIZE as usize;
        self.data
            .chunks(word)
            .zip(before.data.chunks(word))
            .enumerate()
            .filter(|(_, (now, then))| now != then)
            .map(|(i, (now, then))| ((i * word) as u64, le_word(then), le_word(now)))
            .collect()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(crate::common::constants::MEM_SIZE)
    }
}

/// Assembles up to eight little-endian bytes into a word.
fn le_word(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}
