//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the following:
//! 1. **ALU Operations:** Selects `aluA`/`aluB` and computes `valE`.
//! 2. **Condition Codes:** Produces new flags for `OPq`, suppressed while an exception is
//!    draining through Memory or Writeback.
//! 3. **Conditions:** Evaluates `Cnd` for jumps and conditional moves, cancelling the
//!    destination of a conditional move whose condition fails.

use tracing::trace;

use crate::common::constants::WORD_SIZE;
use crate::common::reg::RegId;
use crate::core::arch::cc::ConditionCodes;
use crate::core::arch::stat::Stat;
use crate::core::pipeline::latches::{EEntry, MEntry};
use crate::core::pipeline::signals::{AluASrc, AluBSrc, ExecuteSignals};
use crate::core::units::alu::Alu;
use crate::isa::instruction::{AluFn, Cond, Icode};

/// Chooses the ALU's A input for `icode`.
pub fn alu_a_src(icode: Icode) -> AluASrc {
    match icode {
        Icode::Rrmovq | Icode::Opq => AluASrc::ValA,
        Icode::Irmovq | Icode::Rmmovq | Icode::Mrmovq => AluASrc::ValC,
        Icode::Call | Icode::Pushq => AluASrc::MinusWord,
        Icode::Ret | Icode::Popq => AluASrc::PlusWord,
        _ => AluASrc::Zero,
    }
}

/// Chooses the ALU's B input for `icode`.
pub fn alu_b_src(icode: Icode) -> AluBSrc {
    match icode {
        Icode::Rmmovq
        | Icode::Mrmovq
        | Icode::Opq
        | Icode::Call
        | Icode::Pushq
        | Icode::Ret
        | Icode::Popq => AluBSrc::ValB,
        _ => AluBSrc::Zero,
    }
}

/// Executes the execute stage.
///
/// # Arguments
///
/// * `e` - Committed Execute register.
/// * `cc` - Committed condition codes.
/// * `m_stat` - Status leaving Memory this cycle.
/// * `w_stat` - Status held in the Writeback register.
pub fn execute_stage(e: &EEntry, cc: ConditionCodes, m_stat: Stat, w_stat: Stat) -> ExecuteSignals {
    let alu_a = match alu_a_src(e.icode) {
        AluASrc::ValA => e.vala,
        AluASrc::ValC => e.valc,
        AluASrc::MinusWord => WORD_SIZE.wrapping_neg(),
        AluASrc::PlusWord => WORD_SIZE,
        AluASrc::Zero => 0,
    };
    let alu_b = match alu_b_src(e.icode) {
        AluBSrc::ValB => e.valb,
        AluBSrc::Zero => 0,
    };
    let alu_fun = if e.icode == Icode::Opq {
        AluFn::try_from(e.ifun).unwrap_or(AluFn::Add)
    } else {
        AluFn::Add
    };

    let out = Alu::execute(alu_fun, alu_a, alu_b);
    let set_cc = e.icode == Icode::Opq && !m_stat.is_exception() && !w_stat.is_exception();
    let cc_update = set_cc.then_some(out.cc);

    let cnd = match e.icode {
        Icode::Jxx | Icode::Rrmovq => cc.satisfies(Cond::try_from(e.ifun).unwrap_or(Cond::Always)),
        _ => true,
    };
    let dste = if e.icode == Icode::Rrmovq && !cnd {
        RegId::Rnone
    } else {
        e.dste
    };

    if e.icode != Icode::Nop {
        trace!(
            "EX  pc={:#x} {:?}({:#x}, {:#x}) = {:#x} Cnd={}{}",
            e.pc,
            alu_fun,
            alu_b,
            alu_a,
            out.value,
            u8::from(cnd),
            cc_update.map_or(String::new(), |c| format!(" CC <= {c}"))
        );
    }

    ExecuteSignals {
        vale: out.value,
        dste,
        cnd,
        cc_update,
        next: MEntry {
            stat: e.stat,
            pc: e.pc,
            icode: e.icode,
            cnd,
            vale: out.value,
            vala: e.vala,
            dste,
            dstm: e.dstm,
        },
    }
}
