//! Instruction decoding from memory.
//!
//! Reads one instruction at a given address and splits it into its fields. Both the
//! pipelined Fetch stage and the sequential reference executor use this routine, so the
//! two agree on lengths, field positions and fault classification.
//!
//! Faults are classified in this priority order:
//! 1. **ADR:** Any byte of the instruction lies outside memory.
//! 2. **INS:** The icode is unassigned or the ifun is invalid for it.
//! 3. **HLT:** The instruction is `halt`.

use crate::common::constants::{INSTRUCTION_BYTE_SIZE, REGIDS_SIZE, VALC_SIZE};
use crate::common::reg::RegId;
use crate::core::arch::stat::Stat;
use crate::isa::instruction::Icode;
use crate::memory::Memory;

/// Fields of one instruction as read from memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchedInstruction {
    /// Address the instruction was read from.
    pub pc: u64,
    /// Fetch status (`Aok`, `Hlt`, `Adr`, or `Ins`).
    pub stat: Stat,
    /// Instruction code; `Nop` when `stat` is `Adr` or `Ins`.
    pub icode: Icode,
    /// Function code; 0 when `stat` is `Adr` or `Ins`.
    pub ifun: u8,
    /// `rA` register specifier.
    pub ra: RegId,
    /// `rB` register specifier.
    pub rb: RegId,
    /// Constant word (0 if the instruction has none).
    pub valc: u64,
    /// Address of the next sequential instruction.
    pub valp: u64,
}

impl FetchedInstruction {
    /// A faulting instruction that carries no operation.
    fn fault(pc: u64, stat: Stat, valp: u64) -> Self {
        Self {
            pc,
            stat,
            icode: Icode::Nop,
            ifun: 0,
            ra: RegId::Rnone,
            rb: RegId::Rnone,
            valc: 0,
            valp,
        }
    }
}

/// Decodes the instruction stored at `pc`.
///
/// # Arguments
///
/// * `mem` - Memory holding the program.
/// * `pc` - Address of the instruction byte.
///
/// # Returns
///
/// The decoded fields. This never fails: faults are reported through `stat`.
pub fn decode_at(mem: &Memory, pc: u64) -> FetchedInstruction {
    let Ok(byte) = mem.get_byte(pc) else {
        return FetchedInstruction::fault(pc, Stat::Adr, pc);
    };
    let ifun = byte & 0xF;
    let mut valp = pc + INSTRUCTION_BYTE_SIZE;

    let Some(icode) = Icode::from_nibble(byte >> 4) else {
        return FetchedInstruction::fault(pc, Stat::Ins, valp);
    };

    let (mut ra, mut rb) = (RegId::Rnone, RegId::Rnone);
    if icode.needs_regids() {
        let Ok(regs) = mem.get_byte(valp) else {
            return FetchedInstruction::fault(pc, Stat::Adr, valp);
        };
        ra = RegId::from_nibble(regs >> 4);
        rb = RegId::from_nibble(regs);
        valp += REGIDS_SIZE;
    }

    let mut valc = 0;
    if icode.needs_valc() {
        let Ok(word) = mem.get_long(valp) else {
            return FetchedInstruction::fault(pc, Stat::Adr, valp);
        };
        valc = word;
        valp += VALC_SIZE;
    }

    if !icode.valid_ifun(ifun) {
        return FetchedInstruction::fault(pc, Stat::Ins, valp);
    }

    let stat = if icode == Icode::Halt {
        Stat::Hlt
    } else {
        Stat::Aok
    };

    FetchedInstruction {
        pc,
        stat,
        icode,
        ifun,
        ra,
        rb,
        valc,
        valp,
    }
}
