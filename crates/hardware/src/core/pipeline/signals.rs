//! Pipeline combinational signals.
//!
//! This module defines the values each stage produces during the evaluation phase of a
//! cycle. It performs:
//! 1. **Operand Selection:** Names the ALU input sources chosen by Execute.
//! 2. **Stage Outputs:** The next-latch entry plus the combinational signals (`e_valE`,
//!    `e_dstE`, `e_Cnd`, `m_valM`, `m_stat`) other stages and the hazard unit consume.
//! 3. **Deferred Side Effects:** Register writes, the memory store, and the condition-code
//!    update, which are only applied when the cycle commits.

use crate::common::reg::RegId;
use crate::core::arch::cc::ConditionCodes;
use crate::core::arch::stat::Stat;
use crate::core::pipeline::hazards::{ForwardSource, PipelineControl};
use crate::core::pipeline::latches::{DEntry, EEntry, MEntry, WEntry};
use crate::isa::decode::FetchedInstruction;
use crate::isa::instruction::Icode;

/// Source of the ALU's A input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluASrc {
    /// The `valA` operand (`rrmovq`, `OPq`).
    ValA,
    /// The constant word (`irmovq`, `rmmovq`, `mrmovq`).
    ValC,
    /// `-8` (`call`, `pushq`).
    MinusWord,
    /// `+8` (`ret`, `popq`).
    PlusWord,
    /// No ALU use.
    #[default]
    Zero,
}

/// Source of the ALU's B input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluBSrc {
    /// The `valB` operand.
    ValB,
    /// Constant zero (`rrmovq`, `irmovq`).
    #[default]
    Zero,
}

/// A memory write computed by the Memory stage, applied at commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingStore {
    /// Target address (already bounds-checked).
    pub addr: u64,
    /// Word to store.
    pub val: u64,
}

/// Writeback stage outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritebackSignals {
    /// Status of the retiring instruction.
    pub stat: Stat,
    /// Retiring instruction code.
    pub icode: Icode,
    /// `valE` destination, `RNONE` when suppressed.
    pub dste: RegId,
    /// Value for `dste`.
    pub vale: u64,
    /// `valM` destination, `RNONE` when suppressed.
    pub dstm: RegId,
    /// Value for `dstm`.
    pub valm: u64,
    /// `true` when the retiring status ends the simulation.
    pub terminal: bool,
}

/// Memory stage outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemorySignals {
    /// `m_stat`: the instruction's status after its data access.
    pub stat: Stat,
    /// `m_valM`: the value read, or 0.
    pub valm: u64,
    /// Store to apply at commit.
    pub store: Option<PendingStore>,
    /// Pending input for W.
    pub next: WEntry,
}

/// Execute stage outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteSignals {
    /// `e_valE`: ALU result.
    pub vale: u64,
    /// `e_dstE`: `RNONE` for a conditional move whose condition failed.
    pub dste: RegId,
    /// `e_Cnd`: condition outcome.
    pub cnd: bool,
    /// Condition codes to install at commit.
    pub cc_update: Option<ConditionCodes>,
    /// Pending input for M.
    pub next: MEntry,
}

/// Decode stage outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeSignals {
    /// `d_srcA`.
    pub srca: RegId,
    /// `d_srcB`.
    pub srcb: RegId,
    /// Where `valA` came from.
    pub fwd_a: ForwardSource,
    /// Where `valB` came from.
    pub fwd_b: ForwardSource,
    /// Pending input for E.
    pub next: EEntry,
}

/// Fetch stage outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchSignals {
    /// `f_pc`: the address actually fetched.
    pub pc: u64,
    /// `f_stat`.
    pub stat: Stat,
    /// Decoded instruction.
    pub inst: FetchedInstruction,
    /// Pending predicted PC for F.
    pub pred_pc: u64,
    /// Pending input for D.
    pub next: DEntry,
}

/// Summary of one completed cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// One-based number of the cycle just completed.
    pub cycle: u64,
    /// Control decisions applied at this cycle's commit.
    pub control: PipelineControl,
    /// Instruction that left the pipeline through Writeback, if it was a real one.
    pub retired: Option<Icode>,
    /// Final status when this cycle ended the simulation.
    pub terminal: Option<Stat>,
}
