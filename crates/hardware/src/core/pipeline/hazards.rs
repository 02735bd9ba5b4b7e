//! Hazard Detection, Forwarding, and Pipeline Control.
//!
//! This module implements the logic that keeps the pipeline equivalent to sequential
//! execution. It provides:
//! 1. **Operand Forwarding:** Resolves read-after-write hazards by bypassing the register
//!    file with values still in flight in Execute, Memory, or Writeback.
//! 2. **Hazard Detection:** Load-use dependencies, mispredicted jumps, returns in flight,
//!    and exceptions in flight.
//! 3. **Control:** Turns the detected hazards into a `Normal`/`Stall`/`Bubble` decision for
//!    every pipeline register.

use std::fmt;

use crate::common::reg::{RegId, RegisterFile};
use crate::core::arch::stat::Stat;
use crate::core::pipeline::latches::{Control, DEntry, EEntry, MEntry, WEntry};
use crate::isa::instruction::Icode;

/// Where a decoded operand value was taken from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForwardSource {
    /// No source register; the operand is unused.
    #[default]
    None,
    /// The register file.
    RegFile,
    /// `e_valE`: the ALU result of the instruction in Execute.
    ExecuteE,
    /// `m_valM`: the value being loaded by the instruction in Memory.
    MemoryM,
    /// `M_valE`: the ALU result held in the Memory register.
    MemoryE,
    /// `W_valM`: the loaded value held in the Writeback register.
    WritebackM,
    /// `W_valE`: the ALU result held in the Writeback register.
    WritebackE,
    /// `D_valP`: the fall-through / return address of a `call` or `jXX`.
    ValP,
}

impl fmt::Display for ForwardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "-",
            Self::RegFile => "RegFile",
            Self::ExecuteE => "e_valE",
            Self::MemoryM => "m_valM",
            Self::MemoryE => "M_valE",
            Self::WritebackM => "W_valM",
            Self::WritebackE => "W_valE",
            Self::ValP => "D_valP",
        })
    }
}

/// Values in flight that Decode may forward from, in priority order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardingSources {
    /// `e_dstE`
    pub e_dste: RegId,
    /// `e_valE`
    pub e_vale: u64,
    /// `M_dstM`
    pub m_dstm: RegId,
    /// `m_valM`
    pub m_valm: u64,
    /// `M_dstE`
    pub m_dste: RegId,
    /// `M_valE`
    pub m_vale: u64,
    /// `W_dstM`
    pub w_dstm: RegId,
    /// `W_valM`
    pub w_valm: u64,
    /// `W_dstE`
    pub w_dste: RegId,
    /// `W_valE`
    pub w_vale: u64,
}

impl ForwardingSources {
    /// Collects the forwarding network's inputs for this cycle.
    ///
    /// # Arguments
    ///
    /// * `e_dste` / `e_vale` - Execute's combinational destination and result.
    /// * `m_valm` - Memory's combinational load result.
    /// * `m` - Committed Memory register.
    /// * `w` - Committed Writeback register.
    pub fn new(e_dste: RegId, e_vale: u64, m_valm: u64, m: &MEntry, w: &WEntry) -> Self {
        Self {
            e_dste,
            e_vale,
            m_dstm: m.dstm,
            m_valm,
            m_dste: m.dste,
            m_vale: m.vale,
            w_dstm: w.dstm,
            w_valm: w.valm,
            w_dste: w.dste,
            w_vale: w.vale,
        }
    }

    /// Resolves the current value of `src`.
    ///
    /// The youngest producer wins: `e_dstE`, `M_dstM`, `M_dstE`, `W_dstM`, `W_dstE`, then
    /// the register file. `RNONE` never matches a producer and reads as zero.
    ///
    /// # Returns
    ///
    /// `(value, source)`.
    pub fn select(&self, src: RegId, regs: &RegisterFile) -> (u64, ForwardSource) {
        if src.is_none() {
            return (0, ForwardSource::None);
        }
        let candidates = [
            (self.e_dste, self.e_vale, ForwardSource::ExecuteE),
            (self.m_dstm, self.m_valm, ForwardSource::MemoryM),
            (self.m_dste, self.m_vale, ForwardSource::MemoryE),
            (self.w_dstm, self.w_valm, ForwardSource::WritebackM),
            (self.w_dste, self.w_vale, ForwardSource::WritebackE),
        ];
        candidates
            .into_iter()
            .find(|&(dst, _, _)| dst == src)
            .map_or_else(
                || (regs.read(src), ForwardSource::RegFile),
                |(_, val, from)| (val, from),
            )
    }
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction in Decode reads a register that the
/// `mrmovq`/`popq` in Execute will only obtain from memory next cycle.
///
/// # Arguments
///
/// * `e` - Committed Execute register.
/// * `d_srca` / `d_srcb` - Source registers of the instruction in Decode.
///
/// # Returns
///
/// `true` if Decode must wait one cycle.
pub fn need_stall_load_use(e: &EEntry, d_srca: RegId, d_srcb: RegId) -> bool {
    matches!(e.icode, Icode::Mrmovq | Icode::Popq)
        && !e.dstm.is_none()
        && (e.dstm == d_srca || e.dstm == d_srcb)
}

/// Returns `true` when the jump in Execute was predicted taken but is not taken.
pub fn is_mispredicted(e: &EEntry, e_cnd: bool) -> bool {
    e.icode == Icode::Jxx && !e_cnd
}

/// Returns `true` while a `ret` sits in Decode, Execute, or Memory.
pub fn return_in_flight(d: &DEntry, e: &EEntry, m: &MEntry) -> bool {
    [d.icode, e.icode, m.icode].contains(&Icode::Ret)
}

/// Returns `true` while a faulting or halting instruction sits in Decode, Execute, or Memory.
pub fn exception_in_flight(d: &DEntry, e: &EEntry, m: &MEntry) -> bool {
    d.stat.is_exception() || e.stat.is_exception() || m.stat.is_exception()
}

/// Everything the hazard unit looks at in one cycle.
#[derive(Clone, Copy, Debug)]
pub struct HazardInputs<'a> {
    /// Committed Decode register.
    pub d: &'a DEntry,
    /// Committed Execute register.
    pub e: &'a EEntry,
    /// Committed Memory register.
    pub m: &'a MEntry,
    /// Committed Writeback register.
    pub w: &'a WEntry,
    /// `f_stat`
    pub f_stat: Stat,
    /// `d_srcA`
    pub d_srca: RegId,
    /// `d_srcB`
    pub d_srcb: RegId,
    /// `e_Cnd`
    pub e_cnd: bool,
    /// `m_stat`
    pub m_stat: Stat,
}

/// Per-register control decision plus the hazards that produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineControl {
    /// Fetch register control.
    pub f: Control,
    /// Decode register control.
    pub d: Control,
    /// Execute register control.
    pub e: Control,
    /// Memory register control.
    pub m: Control,
    /// Writeback register control.
    pub w: Control,
    /// A load-use dependency was detected.
    pub load_use: bool,
    /// The jump in Execute was mispredicted.
    pub mispredict: bool,
    /// A `ret` is in flight.
    pub ret: bool,
    /// An exception is in flight in D, E, or M.
    pub exception: bool,
}

/// Computes the control for all five pipeline registers.
///
/// A mispredicted jump bubbles both Decode and Execute so neither wrong-path instruction
/// survives; Fetch is redirected next cycle from `M_valA`. A load-use hazard holds Fetch and
/// Decode and bubbles Execute. A `ret` or an exception in flight holds Fetch and bubbles
/// Decode until it drains. Once a non-`AOK` status reaches Memory or Writeback, nothing
/// younger may enter Memory and Writeback holds the terminal instruction.
pub fn pipeline_control(inp: &HazardInputs<'_>) -> PipelineControl {
    let load_use = need_stall_load_use(inp.e, inp.d_srca, inp.d_srcb);
    let mispredict = is_mispredicted(inp.e, inp.e_cnd);
    let ret = return_in_flight(inp.d, inp.e, inp.m);
    let exception = exception_in_flight(inp.d, inp.e, inp.m);

    let f = if load_use || ret || exception || inp.f_stat.is_exception() {
        Control::Stall
    } else {
        Control::Normal
    };

    let d = if mispredict {
        Control::Bubble
    } else if load_use {
        Control::Stall
    } else if ret || exception {
        Control::Bubble
    } else {
        Control::Normal
    };

    let e = if mispredict || load_use {
        Control::Bubble
    } else {
        Control::Normal
    };

    let m = if inp.m_stat.is_exception() || inp.w.stat.is_exception() {
        Control::Bubble
    } else {
        Control::Normal
    };

    let w = if inp.w.stat.is_exception() {
        Control::Stall
    } else {
        Control::Normal
    };

    PipelineControl {
        f,
        d,
        e,
        m,
        w,
        load_use,
        mispredict,
        ret,
        exception,
    }
}
