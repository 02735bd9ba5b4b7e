//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the pipeline. It computes the register writes
//! of the retiring instruction and recognises the end of the simulation:
//! 1. **Register Writes:** `dstE ← valE` then `dstM ← valM`, applied at commit.
//! 2. **Precise Exceptions:** An instruction whose status is not `AOK` writes nothing.
//! 3. **Termination:** A non-`AOK` status in Writeback makes the cycle terminal.

use tracing::trace;

use crate::common::reg::RegId;
use crate::core::pipeline::latches::WEntry;
use crate::core::pipeline::signals::WritebackSignals;
use crate::isa::instruction::Icode;

/// Executes the writeback stage.
///
/// # Arguments
///
/// * `w` - Committed Writeback register.
pub fn wb_stage(w: &WEntry) -> WritebackSignals {
    let terminal = w.stat.is_exception();
    let (dste, dstm) = if terminal {
        (RegId::Rnone, RegId::Rnone)
    } else {
        (w.dste, w.dstm)
    };

    if w.icode != Icode::Nop || terminal {
        trace!(
            "WB  pc={:#x} stat={} {} <= {:#x}, {} <= {:#x}",
            w.pc,
            w.stat,
            dste,
            w.vale,
            dstm,
            w.valm
        );
    }

    WritebackSignals {
        stat: w.stat,
        icode: w.icode,
        dste,
        vale: w.vale,
        dstm,
        valm: w.valm,
        terminal,
    }
}
