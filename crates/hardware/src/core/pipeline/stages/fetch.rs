//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the pipeline. It performs the following:
//! 1. **PC Selection:** Chooses between the misprediction fall-through (`M_valA`), the
//!    return address just loaded (`W_valM`), and the predicted PC (`F_predPC`).
//! 2. **Instruction Read:** Decodes the instruction bytes at the selected address.
//! 3. **Prediction:** Computes the next predicted PC with the static predictor.

use tracing::trace;

use crate::core::pipeline::latches::{DEntry, FEntry, MEntry, WEntry};
use crate::core::pipeline::signals::FetchSignals;
use crate::core::units::bru::predict_pc;
use crate::isa::decode::decode_at;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::Icode;
use crate::memory::Memory;

/// Selects the address to fetch this cycle.
///
/// # Arguments
///
/// * `f` - Committed Fetch register.
/// * `m` - Committed Memory register (jump outcome and fall-through address).
/// * `w` - Committed Writeback register (return address).
pub fn select_pc(f: &FEntry, m: &MEntry, w: &WEntry) -> u64 {
    if m.icode == Icode::Jxx && !m.cnd {
        m.vala
    } else if w.icode == Icode::Ret {
        w.valm
    } else {
        f.pred_pc
    }
}

/// Executes the instruction fetch stage.
///
/// Reads memory only; the D and F pending inputs are returned for the engine to latch.
///
/// # Arguments
///
/// * `f`, `m`, `w` - Committed pipeline registers used for PC selection.
/// * `mem` - Instruction memory.
pub fn fetch_stage(f: &FEntry, m: &MEntry, w: &WEntry, mem: &Memory) -> FetchSignals {
    let pc = select_pc(f, m, w);
    let inst = decode_at(mem, pc);
    let pred_pc = predict_pc(inst.icode, inst.valc, inst.valp);

    trace!(
        "IF  pc={:#x} {:<24} stat={} predPC={:#x}",
        pc,
        disassemble(&inst),
        inst.stat,
        pred_pc
    );

    FetchSignals {
        pc,
        stat: inst.stat,
        inst,
        pred_pc,
        next: DEntry {
            stat: inst.stat,
            pc,
            icode: inst.icode,
            ifun: inst.ifun,
            ra: inst.ra,
            rb: inst.rb,
            valc: inst.valc,
            valp: inst.valp,
        },
    }
}
