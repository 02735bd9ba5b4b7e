//! Sequential Reference Executor.
//!
//! Executes one whole instruction per step with no pipelining, using the same instruction
//! decoder, ALU, and memory as the pipeline. It serves as the ground truth the pipelined
//! simulator's final state is compared against:
//! 1. **Fetch/Decode:** `decode_at` classifies faults exactly as the Fetch stage does.
//! 2. **Execute:** The ALU computes results and condition codes.
//! 3. **Memory/Writeback:** A faulting data access stops execution with no side effects.

use tracing::trace;

use crate::common::constants::WORD_SIZE;
use crate::common::reg::{RegId, RegisterFile};
use crate::config::Config;
use crate::core::arch::cc::ConditionCodes;
use crate::core::arch::stat::Stat;
use crate::core::cpu::ArchState;
use crate::core::units::alu::Alu;
use crate::isa::decode::decode_at;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::{AluFn, Cond, Icode};
use crate::memory::Memory;

/// A non-pipelined Y86-64 processor.
#[derive(Clone, Debug)]
pub struct SequentialCpu {
    /// General purpose registers.
    pub regs: RegisterFile,
    /// Main memory.
    pub mem: Memory,
    /// Condition codes.
    pub cc: ConditionCodes,
    /// Address of the next instruction.
    pub pc: u64,
    /// `Aok` while running; the terminating status afterwards.
    pub stat: Stat,
    /// Instructions executed, including the terminating one.
    pub steps: u64,
}

impl SequentialCpu {
    /// Creates a reference CPU with empty memory of the configured size.
    pub fn new(config: &Config) -> Self {
        Self::from_memory(
            Memory::new(config.memory.size_bytes),
            config.general.start_pc,
        )
    }

    /// Creates a reference CPU over an already loaded memory image.
    pub fn from_memory(mem: Memory, start_pc: u64) -> Self {
        Self {
            regs: RegisterFile::new(),
            mem,
            cc: ConditionCodes::default(),
            pc: start_pc,
            stat: Stat::Aok,
            steps: 0,
        }
    }

    /// Executes one instruction.
    ///
    /// # Returns
    ///
    /// The status after the instruction. Once non-`Aok`, further calls change nothing.
    pub fn step(&mut self) -> Stat {
        if self.stat.is_exception() {
            return self.stat;
        }
        let inst = decode_at(&self.mem, self.pc);
        self.steps += 1;
        trace!("SEQ pc={:#x} {}", self.pc, disassemble(&inst));

        if inst.stat.is_exception() {
            self.stat = inst.stat;
            return self.stat;
        }

        let (ra, rb, valc, valp) = (inst.ra, inst.rb, inst.valc, inst.valp);
        let val_a = self.regs.read(ra);
        let val_b = self.regs.read(rb);
        let rsp = self.regs.read(RegId::Rsp);
        let mut next_pc = valp;

        match inst.icode {
            Icode::Halt | Icode::Nop => {}
            Icode::Rrmovq => {
                if self.condition(inst.ifun) {
                    self.regs.write(rb, val_a);
                }
            }
            Icode::Irmovq => self.regs.write(rb, valc),
            Icode::Rmmovq => {
                let addr = Alu::execute(AluFn::Add, valc, val_b).value;
                if self.mem.put_long(addr, val_a).is_err() {
                    return self.fault();
                }
            }
            Icode::Mrmovq => {
                let addr = Alu::execute(AluFn::Add, valc, val_b).value;
                let Ok(word) = self.mem.get_long(addr) else {
                    return self.fault();
                };
                self.regs.write(ra, word);
            }
            Icode::Opq => {
                let op = AluFn::try_from(inst.ifun).unwrap_or(AluFn::Add);
                let out = Alu::execute(op, val_a, val_b);
                self.regs.write(rb, out.value);
                self.cc = out.cc;
            }
            Icode::Jxx => {
                if self.condition(inst.ifun) {
                    next_pc = valc;
                }
            }
            Icode::Call => {
                let sp = rsp.wrapping_sub(WORD_SIZE);
                if self.mem.put_long(sp, valp).is_err() {
                    return self.fault();
                }
                self.regs.write(RegId::Rsp, sp);
                next_pc = valc;
            }
            Icode::Ret => {
                let Ok(target) = self.mem.get_long(rsp) else {
                    return self.fault();
                };
                self.regs.write(RegId::Rsp, rsp.wrapping_add(WORD_SIZE));
                next_pc = target;
            }
            Icode::Pushq => {
                let sp = rsp.wrapping_sub(WORD_SIZE);
                if self.mem.put_long(sp, val_a).is_err() {
                    return self.fault();
                }
                self.regs.write(RegId::Rsp, sp);
            }
            Icode::Popq => {
                let Ok(word) = self.mem.get_long(rsp) else {
                    return self.fault();
                };
                self.regs.write(RegId::Rsp, rsp.wrapping_add(WORD_SIZE));
                self.regs.write(ra, word);
            }
        }

        self.pc = next_pc;
        self.stat = inst.stat;
        self.stat
    }

    /// Steps until the status is no longer `Aok` or `max_steps` instructions have run.
    ///
    /// # Returns
    ///
    /// The terminating status, or `None` if the step limit was reached first.
    pub fn run(&mut self, max_steps: u64) -> Option<Stat> {
        while self.steps < max_steps {
            let stat = self.step();
            if stat.is_exception() {
                return Some(stat);
            }
        }
        None
    }

    /// Captures the program-visible state.
    pub fn arch_state(&self) -> ArchState {
        ArchState {
            regs: self.regs.snapshot(),
            cc: self.cc,
            mem: self.mem.clone(),
        }
    }

    fn condition(&self, ifun: u8) -> bool {
        self.cc
            .satisfies(Cond::try_from(ifun).unwrap_or(Cond::Always))
    }

    fn fault(&mut self) -> Stat {
        self.stat = Stat::Adr;
        self.stat
    }
}
