//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Operand Selection:** Derives `srcA`, `srcB`, `dstE`, and `dstM` from the icode and
//!    register specifiers.
//! 2. **Operand Read:** Reads `valA`/`valB`, taking in-flight values from the forwarding
//!    network in preference to the register file.
//! 3. **Return Address:** `call` and `jXX` carry `valP` in `valA` instead of a register.

use tracing::trace;

use crate::common::reg::{RegId, RegisterFile};
use crate::core::pipeline::hazards::{ForwardSource, ForwardingSources};
use crate::core::pipeline::latches::{DEntry, EEntry};
use crate::core::pipeline::signals::DecodeSignals;
use crate::isa::instruction::Icode;

/// Register supplying `valA`.
pub fn src_a(d: &DEntry) -> RegId {
    match d.icode {
        Icode::Rrmovq | Icode::Rmmovq | Icode::Opq | Icode::Pushq => d.ra,
        Icode::Popq | Icode::Ret => RegId::Rsp,
        _ => RegId::Rnone,
    }
}

/// Register supplying `valB`.
pub fn src_b(d: &DEntry) -> RegId {
    match d.icode {
        Icode::Opq | Icode::Rmmovq | Icode::Mrmovq => d.rb,
        Icode::Pushq | Icode::Popq | Icode::Call | Icode::Ret => RegId::Rsp,
        _ => RegId::Rnone,
    }
}

/// Register receiving `valE`.
pub fn dst_e(d: &DEntry) -> RegId {
    match d.icode {
        Icode::Rrmovq | Icode::Irmovq | Icode::Opq => d.rb,
        Icode::Pushq | Icode::Popq | Icode::Call | Icode::Ret => RegId::Rsp,
        _ => RegId::Rnone,
    }
}

/// Register receiving `valM`.
pub fn dst_m(d: &DEntry) -> RegId {
    match d.icode {
        Icode::Mrmovq | Icode::Popq => d.ra,
        _ => RegId::Rnone,
    }
}

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `d` - Committed Decode register.
/// * `regs` - Register file as of the end of the previous cycle.
/// * `fwd` - This cycle's forwarding sources.
pub fn decode_stage(d: &DEntry, regs: &RegisterFile, fwd: &ForwardingSources) -> DecodeSignals {
    let srca = src_a(d);
    let srcb = src_b(d);

    let (vala, fwd_a) = if matches!(d.icode, Icode::Call | Icode::Jxx) {
        (d.valp, ForwardSource::ValP)
    } else {
        fwd.select(srca, regs)
    };
    let (valb, fwd_b) = fwd.select(srcb, regs);

    if d.icode != Icode::Nop {
        trace!(
            "ID  pc={:#x} srcA={} <- {} ({:#x}) srcB={} <- {} ({:#x})",
            d.pc,
            srca,
            fwd_a,
            vala,
            srcb,
            fwd_b,
            valb
        );
    }

    DecodeSignals {
        srca,
        srcb,
        fwd_a,
        fwd_b,
        next: EEntry {
            stat: d.stat,
            pc: d.pc,
            icode: d.icode,
            ifun: d.ifun,
            valc: d.valc,
            vala,
            valb,
            dste: dst_e(d),
            dstm: dst_m(d),
            srca,
            srcb,
        },
    }
}
