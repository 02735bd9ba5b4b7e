//! Condition Code Register.
//!
//! This module holds the three condition flags written by `OPq` instructions and read by
//! conditional jumps and conditional moves. It provides:
//! 1. **Storage:** Zero, sign, and overflow flags.
//! 2. **Evaluation:** Mapping a condition function code onto the current flags.

use std::fmt;

use crate::isa::instruction::Cond;

/// Zero/sign/overflow flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionCodes {
    /// Zero flag: the last result was zero.
    pub zf: bool,
    /// Sign flag: the last result was negative.
    pub sf: bool,
    /// Overflow flag: the last result overflowed in two's complement.
    pub of: bool,
}

impl Default for ConditionCodes {
    /// Power-on state: `ZF=1 SF=0 OF=0`.
    fn default() -> Self {
        Self {
            zf: true,
            sf: false,
            of: false,
        }
    }
}

impl ConditionCodes {
    /// Evaluates a jump/move condition against these flags.
    ///
    /// # Arguments
    ///
    /// * `cond` - The condition encoded in the instruction's ifun nibble.
    ///
    /// # Returns
    ///
    /// `true` if the condition holds (jump taken / move performed).
    pub fn satisfies(self, cond: Cond) -> bool {
        let lt = self.sf ^ self.of;
        match cond {
            Cond::Always => true,
            Cond::Le => lt || self.zf,
            Cond::L => lt,
            Cond::E => self.zf,
            Cond::Ne => !self.zf,
            Cond::Ge => !lt,
            Cond::G => !lt && !self.zf,
        }
    }
}

impl fmt::Display for ConditionCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z={} S={} O={}",
            u8::from(self.zf),
            u8::from(self.sf),
            u8::from(self.of)
        )
    }
}
