//! Instruction Decode Tests.
//!
//! Verifies field extraction and fault classification from raw memory bytes.

use pretty_assertions::assert_eq;
use y86sim_core::Memory;
use y86sim_core::common::RegId;
use y86sim_core::core::arch::stat::Stat;
use y86sim_core::isa::decode::{FetchedInstruction, decode_at};
use y86sim_core::isa::instruction::Icode;

fn mem_with(addr: u64, bytes: &[u8]) -> Memory {
    let mut mem = Memory::new(0x1000);
    mem.load(addr, bytes).unwrap();
    mem
}

// ══════════════════════════════════════════════════════════
// 1. Field extraction
// ══════════════════════════════════════════════════════════

#[test]
fn decodes_irmovq() {
    let mem = mem_with(0x10, &[0x30, 0xF2, 0x0A, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(
        decode_at(&mem, 0x10),
        FetchedInstruction {
            pc: 0x10,
            stat: Stat::Aok,
            icode: Icode::Irmovq,
            ifun: 0,
            ra: RegId::Rnone,
            rb: RegId::Rdx,
            valc: 10,
            valp: 0x1A,
        }
    );
}

#[test]
fn decodes_opq_register_pair() {
    let mem = mem_with(0, &[0x61, 0x03]);
    let inst = decode_at(&mem, 0);
    assert_eq!(inst.icode, Icode::Opq);
    assert_eq!(inst.ifun, 1);
    assert_eq!((inst.ra, inst.rb), (RegId::Rax, RegId::Rbx));
    assert_eq!(inst.valp, 2);
}

#[test]
fn decodes_jump_target_without_register_byte() {
    let mem = mem_with(0, &[0x74, 0x40, 0x01, 0, 0, 0, 0, 0, 0]);
    let inst = decode_at(&mem, 0);
    assert_eq!(inst.icode, Icode::Jxx);
    assert_eq!(inst.ifun, 4);
    assert_eq!(inst.valc, 0x140);
    assert_eq!(inst.valp, 9);
    assert_eq!((inst.ra, inst.rb), (RegId::Rnone, RegId::Rnone));
}

#[test]
fn halt_has_hlt_status() {
    let mem = Memory::new(0x10);
    let inst = decode_at(&mem, 0);
    assert_eq!(inst.icode, Icode::Halt);
    assert_eq!(inst.stat, Stat::Hlt);
    assert_eq!(inst.valp, 1);
}

// ══════════════════════════════════════════════════════════
// 2. Faults
// ══════════════════════════════════════════════════════════

#[test]
fn pc_outside_memory_is_adr() {
    let mem = Memory::new(0x1000);
    let inst = decode_at(&mem, 0x2000);
    assert_eq!(inst.stat, Stat::Adr);
    assert_eq!(inst.icode, Icode::Nop);
}

#[test]
fn instruction_running_off_the_end_is_adr() {
    // irmovq whose constant would extend past the last byte.
    let mem = mem_with(0xFF8, &[0x30, 0xF0]);
    assert_eq!(decode_at(&mem, 0xFF8).stat, Stat::Adr);

    // Register byte itself out of range.
    let mem = mem_with(0xFFF, &[0x20]);
    assert_eq!(decode_at(&mem, 0xFFF).stat, Stat::Adr);
}

#[test]
fn unassigned_icode_is_ins() {
    let mem = mem_with(0, &[0xF0]);
    let inst = decode_at(&mem, 0);
    assert_eq!(inst.stat, Stat::Ins);
    assert_eq!(inst.icode, Icode::Nop);
    assert_eq!(inst.valp, 1);
}

#[test]
fn bad_function_code_is_ins() {
    let mem = mem_with(0, &[0x65, 0x01]);
    assert_eq!(decode_at(&mem, 0).stat, Stat::Ins);

    let mem = mem_with(0, &[0x01]);
    assert_eq!(decode_at(&mem, 0).stat, Stat::Ins);
}

#[test]
fn adr_takes_priority_over_bad_function_code() {
    // jXX with ifun 9 whose target runs off the end of memory.
    let mem = mem_with(0xFFC, &[0x79]);
    assert_eq!(decode_at(&mem, 0xFFC).stat, Stat::Adr);
}
