//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the five pipeline registers of the Y86-64 pipeline
//! (F → D → E → M → W) and the two-phase latch primitive they are built from:
//! 1. **Two-Phase Fields:** `PipeRegField` separates the value stages read this cycle
//!    (`output`) from the value being prepared for next cycle (`input`).
//! 2. **Control:** Each register is committed as `Normal`, `Stall`, or `Bubble`.
//! 3. **Bubble Values:** Every entry type's `Default` is the harmless `nop` it holds after
//!    a bubble: status `AOK`, icode `nop`, register ids `RNONE`, values zero.

use std::fmt;

use crate::common::reg::RegId;
use crate::core::arch::stat::Stat;
use crate::isa::instruction::Icode;

/// Per-cycle commit behaviour of a pipeline register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Control {
    /// Latch the pending input.
    #[default]
    Normal,
    /// Keep the current output.
    Stall,
    /// Replace the output with the register's bubble value.
    Bubble,
}

/// One two-phase latched value.
///
/// Stages read `output()` (the value committed at the end of the previous cycle) and write
/// `set_input()`. Nothing becomes visible until `commit()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipeRegField<T: Copy> {
    output: T,
    input: T,
    control: Control,
    bubble: T,
}

impl<T: Copy> PipeRegField<T> {
    /// Creates a field whose output, input, and bubble value all start at `initial`.
    pub fn new(initial: T) -> Self {
        Self::with_bubble(initial, initial)
    }

    /// Creates a field with an explicit bubble value distinct from its initial value.
    pub fn with_bubble(initial: T, bubble: T) -> Self {
        Self {
            output: initial,
            input: initial,
            control: Control::Normal,
            bubble,
        }
    }

    /// Value committed at the end of the previous cycle.
    #[inline]
    pub fn output(&self) -> &T {
        &self.output
    }

    /// Value pending for the next commit.
    #[inline]
    pub fn input(&self) -> &T {
        &self.input
    }

    /// Sets the value pending for the next commit.
    #[inline]
    pub fn set_input(&mut self, value: T) {
        self.input = value;
    }

    /// Control in effect for the next commit.
    #[inline]
    pub fn control(&self) -> Control {
        self.control
    }

    /// Selects how the next commit behaves.
    #[inline]
    pub fn set_control(&mut self, control: Control) {
        self.control = control;
    }

    /// Applies the selected control and resets it to `Normal`.
    ///
    /// - `Normal`: output ← input
    /// - `Stall`: output unchanged
    /// - `Bubble`: output ← bubble value
    pub fn commit(&mut self) {
        match self.control {
            Control::Normal => self.output = self.input,
            Control::Stall => {}
            Control::Bubble => self.output = self.bubble,
        }
        self.control = Control::Normal;
    }
}

/// A named pipeline register holding one entry.
#[derive(Clone, Debug)]
pub struct PipeReg<E: Copy + Default> {
    name: &'static str,
    field: PipeRegField<E>,
}

impl<E: Copy + Default> PipeReg<E> {
    /// Creates a register holding a bubble, with `E::default()` as its bubble value.
    pub fn new(name: &'static str) -> Self {
        Self::with_initial(name, E::default())
    }

    /// Creates a register holding `initial`; bubbles still restore `E::default()`.
    pub fn with_initial(name: &'static str, initial: E) -> Self {
        Self {
            name,
            field: PipeRegField::with_bubble(initial, E::default()),
        }
    }

    /// Single-letter name (`F`, `D`, `E`, `M`, `W`) used in traces.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Borrows the underlying two-phase field.
    pub fn field(&self) -> &PipeRegField<E> {
        &self.field
    }

    /// Mutably borrows the underlying two-phase field.
    pub fn field_mut(&mut self) -> &mut PipeRegField<E> {
        &mut self.field
    }
}

/// Fetch register: the predicted address of the next instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FEntry {
    /// Predicted PC.
    pub pred_pc: u64,
}

/// Decode register: an instruction as fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DEntry {
    /// Status.
    pub stat: Stat,
    /// Address of the instruction (for traces).
    pub pc: u64,
    /// Instruction code.
    pub icode: Icode,
    /// Function code.
    pub ifun: u8,
    /// `rA` specifier.
    pub ra: RegId,
    /// `rB` specifier.
    pub rb: RegId,
    /// Constant word.
    pub valc: u64,
    /// Next sequential address.
    pub valp: u64,
}

/// Execute register: operands read (or forwarded) in Decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EEntry {
    /// Status.
    pub stat: Stat,
    /// Address of the instruction (for traces).
    pub pc: u64,
    /// Instruction code.
    pub icode: Icode,
    /// Function code.
    pub ifun: u8,
    /// Constant word.
    pub valc: u64,
    /// First operand (or `valP` for `call`/`jXX`).
    pub vala: u64,
    /// Second operand.
    pub valb: u64,
    /// Destination for `valE`.
    pub dste: RegId,
    /// Destination for `valM`.
    pub dstm: RegId,
    /// Source of `valA`.
    pub srca: RegId,
    /// Source of `valB`.
    pub srcb: RegId,
}

/// Memory register: ALU result and store data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MEntry {
    /// Status.
    pub stat: Stat,
    /// Address of the instruction (for traces).
    pub pc: u64,
    /// Instruction code.
    pub icode: Icode,
    /// Condition outcome computed in Execute.
    pub cnd: bool,
    /// ALU result.
    pub vale: u64,
    /// Store data, or the fall-through address for `jXX`.
    pub vala: u64,
    /// Destination for `valE` (`RNONE` for an untaken conditional move).
    pub dste: RegId,
    /// Destination for `valM`.
    pub dstm: RegId,
}

/// Writeback register: values ready to retire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WEntry {
    /// Status.
    pub stat: Stat,
    /// Address of the instruction (for traces).
    pub pc: u64,
    /// Instruction code.
    pub icode: Icode,
    /// ALU result.
    pub vale: u64,
    /// Value read from memory.
    pub valm: u64,
    /// Destination for `valE`.
    pub dste: RegId,
    /// Destination for `valM`.
    pub dstm: RegId,
}

/// Fetch pipeline register.
pub type FReg = PipeReg<FEntry>;
/// Decode pipeline register.
pub type DReg = PipeReg<DEntry>;
/// Execute pipeline register.
pub type EReg = PipeReg<EEntry>;
/// Memory pipeline register.
pub type MReg = PipeReg<MEntry>;
/// Writeback pipeline register.
pub type WReg = PipeReg<WEntry>;

impl fmt::Display for FEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "predPC={:#x}", self.pred_pc)
    }
}

impl fmt::Display for DEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stat={} icode={:x} ifun={:x} rA={:x} rB={:x} valC={:#x} valP={:#x}",
            self.stat,
            u8::from(self.icode),
            self.ifun,
            u8::from(self.ra),
            u8::from(self.rb),
            self.valc,
            self.valp
        )
    }
}

impl fmt::Display for EEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stat={} icode={:x} ifun={:x} valC={:#x} valA={:#x} valB={:#x} dstE={:x} dstM={:x} srcA={:x} srcB={:x}",
            self.stat,
            u8::from(self.icode),
            self.ifun,
            self.valc,
            self.vala,
            self.valb,
            u8::from(self.dste),
            u8::from(self.dstm),
            u8::from(self.srca),
            u8::from(self.srcb)
        )
    }
}

impl fmt::Display for MEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stat={} icode={:x} Cnd={} valE={:#x} valA={:#x} dstE={:x} dstM={:x}",
            self.stat,
            u8::from(self.icode),
            u8::from(self.cnd),
            self.vale,
            self.vala,
            u8::from(self.dste),
            u8::from(self.dstm)
        )
    }
}

impl fmt::Display for WEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stat={} icode={:x} valE={:#x} valM={:#x} dstE={:x} dstM={:x}",
            self.stat,
            u8::from(self.icode),
            self.vale,
            self.valm,
            u8::from(self.dste),
            u8::from(self.dstm)
        )
    }
}
