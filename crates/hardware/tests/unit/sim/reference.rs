//! Sequential Reference Executor Tests.
//!
//! The reference runs one whole instruction per step; these tests pin down its semantics
//! independently of the pipeline.

use pretty_assertions::assert_eq;
use y86sim_core::Memory;
use y86sim_core::common::RegId;
use y86sim_core::config::Config;
use y86sim_core::core::arch::stat::Stat;
use y86sim_core::sim::loader::load_object_str;
use y86sim_core::sim::reference::SequentialCpu;

use crate::common::builder::program::ProgramBuilder;

fn reference(program: &ProgramBuilder) -> SequentialCpu {
    let mut mem = Memory::default();
    if let Err(e) = load_object_str(&program.to_yo(), &mut mem) {
        panic!("load failed: {e}");
    }
    SequentialCpu::from_memory(mem, 0)
}

#[test]
fn new_uses_config() {
    let config = Config::default();
    let cpu = SequentialCpu::new(&config);
    assert_eq!(cpu.pc, 0);
    assert_eq!(cpu.stat, Stat::Aok);
    assert_eq!(cpu.mem.capacity(), config.memory.size_bytes);
}

#[test]
fn steps_one_instruction_at_a_time() {
    let program = ProgramBuilder::new()
        .irmovq(4, RegId::Rax)
        .addq(RegId::Rax, RegId::Rax)
        .halt();
    let mut cpu = reference(&program);

    assert_eq!(cpu.step(), Stat::Aok);
    assert_eq!((cpu.pc, cpu.regs.read(RegId::Rax)), (0x0a, 4));
    assert_eq!(cpu.step(), Stat::Aok);
    assert_eq!(cpu.regs.read(RegId::Rax), 8);
    assert!(!cpu.cc.zf);
    assert_eq!(cpu.step(), Stat::Hlt);
    assert_eq!(cpu.steps, 3);

    // Once stopped, further steps do nothing.
    assert_eq!(cpu.step(), Stat::Hlt);
    assert_eq!(cpu.steps, 3);
}

#[test]
fn call_and_return() {
    let program = ProgramBuilder::new()
        .irmovq(0x100, RegId::Rsp)
        .call("f")
        .irmovq(7, RegId::Rbx)
        .halt()
        .pos(0x20)
        .label("f")
        .irmovq(5, RegId::Rax)
        .ret();
    let mut cpu = reference(&program);
    assert_eq!(cpu.run(100), Some(Stat::Hlt));
    assert_eq!(cpu.regs.read(RegId::Rax), 5);
    assert_eq!(cpu.regs.read(RegId::Rbx), 7);
    assert_eq!(cpu.regs.read(RegId::Rsp), 0x100);
    assert_eq!(cpu.mem.get_long(0xf8).unwrap(), 0x13);
}

#[test]
fn popq_rsp_keeps_loaded_value() {
    let program = ProgramBuilder::new()
        .irmovq(0x100, RegId::Rsp)
        .irmovq(0x55, RegId::Rax)
        .pushq(RegId::Rax)
        .popq(RegId::Rsp)
        .halt();
    let mut cpu = reference(&program);
    assert_eq!(cpu.run(100), Some(Stat::Hlt));
    assert_eq!(cpu.regs.read(RegId::Rsp), 0x55);
}

#[test]
fn faulting_load_changes_nothing() {
    let program = ProgramBuilder::new()
        .irmovq(0x2000, RegId::Rbx)
        .mrmovq(0, RegId::Rbx, RegId::Rax)
        .halt();
    let mut cpu = reference(&program);
    assert_eq!(cpu.run(100), Some(Stat::Adr));
    assert_eq!(cpu.regs.read(RegId::Rax), 0);
    assert_eq!(cpu.pc, 0x0a);
}

#[test]
fn invalid_instruction_is_ins() {
    let mut cpu = reference(&ProgramBuilder::new().raw(&[0xC0]));
    assert_eq!(cpu.run(100), Some(Stat::Ins));
}

#[test]
fn step_limit_returns_none() {
    let program = ProgramBuilder::new().label("top").jmp("top");
    let mut cpu = reference(&program);
    assert_eq!(cpu.run(25), None);
    assert_eq!(cpu.steps, 25);
}
