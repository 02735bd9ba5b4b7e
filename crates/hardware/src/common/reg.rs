//! Register Identifiers and Register File.
//!
//! This module provides the `RegisterFile` struct and the `RegId` index type. It provides:
//! 1. **Typed Indexing:** `RegId` covers exactly the sixteen encodable register nibbles,
//!    fifteen real registers plus the `RNONE` sentinel.
//! 2. **Sentinel Semantics:** Reads of `RNONE` return zero and writes to it are ignored.
//! 3. **Observability:** Snapshots for final-state reporting and state comparison.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::common::constants::NUM_REGS;

/// Register identifier as encoded in an instruction's register-specifier byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum RegId {
    /// `%rax`
    Rax = 0x0,
    /// `%rcx`
    Rcx = 0x1,
    /// `%rdx`
    Rdx = 0x2,
    /// `%rbx`
    Rbx = 0x3,
    /// `%rsp`, the stack pointer used implicitly by push/pop/call/ret.
    Rsp = 0x4,
    /// `%rbp`
    Rbp = 0x5,
    /// `%rsi`
    Rsi = 0x6,
    /// `%rdi`
    Rdi = 0x7,
    /// `%r8`
    R8 = 0x8,
    /// `%r9`
    R9 = 0x9,
    /// `%r10`
    R10 = 0xA,
    /// `%r11`
    R11 = 0xB,
    /// `%r12`
    R12 = 0xC,
    /// `%r13`
    R13 = 0xD,
    /// `%r14`
    R14 = 0xE,
    /// No register. Never indexes the register array; bubbled register fields hold it.
    #[default]
    Rnone = 0xF,
}

impl RegId {
    /// All real registers in encoding order.
    pub const ALL: [Self; NUM_REGS] = [
        Self::Rax,
        Self::Rcx,
        Self::Rdx,
        Self::Rbx,
        Self::Rsp,
        Self::Rbp,
        Self::Rsi,
        Self::Rdi,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::R13,
        Self::R14,
    ];

    /// Converts the low four bits of `nibble` into a register id.
    ///
    /// Every nibble value is a valid encoding, so this never fails.
    pub fn from_nibble(nibble: u8) -> Self {
        Self::try_from(nibble & 0xF).unwrap_or(Self::Rnone)
    }

    /// Array index of this register, or `None` for the sentinel.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Rnone => None,
            reg => Some(u8::from(reg) as usize),
        }
    }

    /// Returns `true` if this is the `RNONE` sentinel.
    pub fn is_none(self) -> bool {
        self == Self::Rnone
    }

    /// Assembly name of the register (e.g. `%rsp`), or `----` for the sentinel.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rax => "%rax",
            Self::Rcx => "%rcx",
            Self::Rdx => "%rdx",
            Self::Rbx => "%rbx",
            Self::Rsp => "%rsp",
            Self::Rbp => "%rbp",
            Self::Rsi => "%rsi",
            Self::Rdi => "%rdi",
            Self::R8 => "%r8",
            Self::R9 => "%r9",
            Self::R10 => "%r10",
            Self::R11 => "%r11",
            Self::R12 => "%r12",
            Self::R13 => "%r13",
            Self::R14 => "%r14",
            Self::Rnone => "----",
        }
    }
}

impl fmt::Display for RegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Program-visible register file.
///
/// Written only by the Writeback stage during the commit phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u64; NUM_REGS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register to read. `RegId::Rnone` reads as 0.
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the register.
    pub fn read(&self, reg: RegId) -> u64 {
        reg.index().map_or(0, |idx| self.regs[idx])
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register to write. Writes to `RegId::Rnone` are ignored.
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, reg: RegId, val: u64) {
        if let Some(idx) = reg.index() {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of all register values in encoding order.
    pub fn snapshot(&self) -> [u64; NUM_REGS] {
        self.regs
    }
}
