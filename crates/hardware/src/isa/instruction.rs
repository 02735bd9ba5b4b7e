//! Instruction encoding tables.
//!
//! The first byte of every Y86-64 instruction carries the instruction code in its high
//! nibble and the function code in its low nibble. This module names those codes and
//! records, per instruction code, which optional fields follow:
//! 1. **Register specifier byte:** `rA:rB`, one nibble each.
//! 2. **Constant word:** an 8-byte little-endian `valC`.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Instruction code (high nibble of the instruction byte).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Icode {
    /// `halt`
    Halt = 0x0,
    /// `nop`; also the icode of every bubble.
    #[default]
    Nop = 0x1,
    /// `rrmovq` and the conditional moves `cmovXX`.
    Rrmovq = 0x2,
    /// `irmovq`
    Irmovq = 0x3,
    /// `rmmovq`
    Rmmovq = 0x4,
    /// `mrmovq`
    Mrmovq = 0x5,
    /// Integer ALU operation (`addq`, `subq`, `andq`, `xorq`).
    Opq = 0x6,
    /// Jumps `jmp` and `jXX`.
    Jxx = 0x7,
    /// `call`
    Call = 0x8,
    /// `ret`
    Ret = 0x9,
    /// `pushq`
    Pushq = 0xA,
    /// `popq`
    Popq = 0xB,
}

impl Icode {
    /// Decodes an instruction-code nibble, returning `None` for unassigned codes.
    pub fn from_nibble(nibble: u8) -> Option<Self> {
        Self::try_from(nibble).ok()
    }

    /// Returns `true` if a register specifier byte follows the instruction byte.
    pub fn needs_regids(self) -> bool {
        matches!(
            self,
            Self::Rrmovq
                | Self::Irmovq
                | Self::Rmmovq
                | Self::Mrmovq
                | Self::Opq
                | Self::Pushq
                | Self::Popq
        )
    }

    /// Returns `true` if an 8-byte constant follows the instruction (and register) bytes.
    pub fn needs_valc(self) -> bool {
        matches!(
            self,
            Self::Irmovq | Self::Rmmovq | Self::Mrmovq | Self::Jxx | Self::Call
        )
    }

    /// Returns `true` if `ifun` is a defined function code for this instruction.
    pub fn valid_ifun(self, ifun: u8) -> bool {
        match self {
            Self::Opq => AluFn::try_from(ifun).is_ok(),
            Self::Jxx | Self::Rrmovq => Cond::try_from(ifun).is_ok(),
            _ => ifun == 0,
        }
    }

    /// Encoded length of an instruction with this code, in bytes.
    pub fn length(self) -> u64 {
        1 + u64::from(self.needs_regids()) + if self.needs_valc() { 8 } else { 0 }
    }

    /// Assembly mnemonic for this icode/ifun pair.
    ///
    /// Function codes outside the valid range render as the base mnemonic.
    pub fn mnemonic(self, ifun: u8) -> &'static str {
        match self {
            Self::Halt => "halt",
            Self::Nop => "nop",
            Self::Rrmovq => match Cond::try_from(ifun) {
                Ok(Cond::Le) => "cmovle",
                Ok(Cond::L) => "cmovl",
                Ok(Cond::E) => "cmove",
                Ok(Cond::Ne) => "cmovne",
                Ok(Cond::Ge) => "cmovge",
                Ok(Cond::G) => "cmovg",
                _ => "rrmovq",
            },
            Self::Irmovq => "irmovq",
            Self::Rmmovq => "rmmovq",
            Self::Mrmovq => "mrmovq",
            Self::Opq => match AluFn::try_from(ifun) {
                Ok(AluFn::Sub) => "subq",
                Ok(AluFn::And) => "andq",
                Ok(AluFn::Xor) => "xorq",
                _ => "addq",
            },
            Self::Jxx => match Cond::try_from(ifun) {
                Ok(Cond::Le) => "jle",
                Ok(Cond::L) => "jl",
                Ok(Cond::E) => "je",
                Ok(Cond::Ne) => "jne",
                Ok(Cond::Ge) => "jge",
                Ok(Cond::G) => "jg",
                _ => "jmp",
            },
            Self::Call => "call",
            Self::Ret => "ret",
            Self::Pushq => "pushq",
            Self::Popq => "popq",
        }
    }
}

impl fmt::Display for Icode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic(0))
    }
}

/// ALU function code carried by `OPq`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum AluFn {
    /// `valB + valA`
    Add = 0,
    /// `valB - valA`
    Sub = 1,
    /// `valB & valA`
    And = 2,
    /// `valB ^ valA`
    Xor = 3,
}

/// Branch / conditional-move condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Cond {
    /// Unconditional.
    Always = 0,
    /// Less or equal: `(SF ^ OF) | ZF`.
    Le = 1,
    /// Less: `SF ^ OF`.
    L = 2,
    /// Equal: `ZF`.
    E = 3,
    /// Not equal: `!ZF`.
    Ne = 4,
    /// Greater or equal: `!(SF ^ OF)`.
    Ge = 5,
    /// Greater: `!(SF ^ OF) & !ZF`.
    G = 6,
}
