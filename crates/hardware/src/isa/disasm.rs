//! Instruction Disassembler for Y86-64.
//!
//! Converts a decoded instruction into AT&T-style assembly text for tracing and test
//! diagnostics.
//!
//! # Usage
//!
//! ```
//! use y86sim_core::isa::decode::decode_at;
//! use y86sim_core::isa::disasm::disassemble;
//! use y86sim_core::Memory;
//!
//! let mut mem = Memory::new(0x100);
//! mem.load(0, &[0x30, 0xf2, 0x0a, 0, 0, 0, 0, 0, 0, 0]).unwrap();
//! assert_eq!(disassemble(&decode_at(&mem, 0)), "irmovq $0xa, %rdx");
//! ```

use crate::core::arch::stat::Stat;
use crate::isa::decode::FetchedInstruction;
use crate::isa::instruction::Icode;

/// Renders one instruction as assembly text.
///
/// Faulting fetches render as `(adr)` or `(ins)`.
pub fn disassemble(inst: &FetchedInstruction) -> String {
    match inst.stat {
        Stat::Adr => return "(adr)".to_string(),
        Stat::Ins => return "(ins)".to_string(),
        Stat::Aok | Stat::Hlt => {}
    }

    let m = inst.icode.mnemonic(inst.ifun);
    let (ra, rb, c) = (inst.ra, inst.rb, inst.valc);
    match inst.icode {
        Icode::Halt | Icode::Nop | Icode::Ret => m.to_string(),
        Icode::Rrmovq | Icode::Opq => format!("{m} {ra}, {rb}"),
        Icode::Irmovq => format!("{m} ${c:#x}, {rb}"),
        Icode::Rmmovq => format!("{m} {ra}, {c:#x}({rb})"),
        Icode::Mrmovq => format!("{m} {c:#x}({rb}), {ra}"),
        Icode::Jxx | Icode::Call => format!("{m} {c:#x}"),
        Icode::Pushq | Icode::Popq => format!("{m} {ra}"),
    }
}
