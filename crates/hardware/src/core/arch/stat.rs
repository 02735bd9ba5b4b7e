//! Instruction Status Codes.
//!
//! Every instruction carries a status from Fetch to Writeback. A non-`Aok` status is never
//! replaced by a later, unrelated status; it can only disappear when the instruction itself
//! is squashed into a bubble. Reaching Writeback with a non-`Aok` status ends the simulation.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Per-instruction status code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Stat {
    /// Normal operation. Bubbles travel as `Aok`.
    #[default]
    Aok = 1,
    /// A `halt` instruction was executed.
    Hlt = 2,
    /// An invalid instruction or data address was accessed.
    Adr = 3,
    /// An invalid instruction encoding was fetched.
    Ins = 4,
}

impl Stat {
    /// Returns `true` for any status that terminates the simulation on retirement.
    #[inline]
    pub fn is_exception(self) -> bool {
        self != Self::Aok
    }

    /// Short mnemonic used in reports (`AOK`, `HLT`, `ADR`, `INS`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Aok => "AOK",
            Self::Hlt => "HLT",
            Self::Adr => "ADR",
            Self::Ins => "INS",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
