//! Pipeline Cycle Engine.
//!
//! This module owns the five pipeline registers and advances them one clock cycle at a time.
//! Each cycle runs in two phases:
//! 1. **Evaluate:** Stages run in the order Writeback, Memory, Execute, Decode, Fetch. Each
//!    reads only committed latch outputs and signals produced earlier in the same pass,
//!    and fills its successor's pending input. No architectural state changes.
//! 2. **Control:** The hazard unit chooses `Normal`, `Stall`, or `Bubble` for every latch.
//! 3. **Commit:** Every stage commits its latches and applies its deferred side effect
//!    (register writes, the data store, the condition-code update).

use std::fmt::Write as _;

use tracing::{debug, trace};

use crate::core::Cpu;
use crate::core::arch::stat::Stat;
use crate::core::pipeline::hazards::{ForwardingSources, HazardInputs, pipeline_control};
use crate::core::pipeline::latches::{DReg, EReg, FEntry, FReg, MReg, WReg};
use crate::core::pipeline::signals::{
    CycleReport, DecodeSignals, ExecuteSignals, FetchSignals, MemorySignals, WritebackSignals,
};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::instruction::Icode;

/// Pipeline stage identifiers, in commit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Instruction fetch; owns F and D.
    Fetch,
    /// Instruction decode; owns E.
    Decode,
    /// Execute; owns M and the condition codes.
    Execute,
    /// Memory access; owns W and the data store.
    Memory,
    /// Writeback; owns the register file writes.
    Writeback,
}

impl Stage {
    /// All stages in the order they commit.
    pub const ALL: [Self; 5] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::Memory,
        Self::Writeback,
    ];
}

/// Every signal produced during one evaluation pass.
#[derive(Clone, Copy, Debug)]
struct Evaluation {
    wb: WritebackSignals,
    mem: MemorySignals,
    ex: ExecuteSignals,
    id: DecodeSignals,
    fetch: FetchSignals,
}

/// The five-stage pipeline: F, D, E, M, and W registers.
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// Fetch register.
    pub f: FReg,
    /// Decode register.
    pub d: DReg,
    /// Execute register.
    pub e: EReg,
    /// Memory register.
    pub m: MReg,
    /// Writeback register.
    pub w: WReg,
    cycle: u64,
}

impl Pipeline {
    /// Creates an empty pipeline (all bubbles) that will fetch from `start_pc` first.
    pub fn new(start_pc: u64) -> Self {
        Self {
            f: FReg::with_initial("F", FEntry { pred_pc: start_pc }),
            d: DReg::new("D"),
            e: EReg::new("E"),
            m: MReg::new("M"),
            w: WReg::new("W"),
            cycle: 0,
        }
    }

    /// Number of cycles completed so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `cpu` - Architectural state; only modified during the commit phase.
    ///
    /// # Returns
    ///
    /// A report of the cycle. `terminal` is set when the instruction in Writeback carried a
    /// non-`AOK` status; the cycle has still been committed in full.
    pub fn tick(&mut self, cpu: &mut Cpu) -> CycleReport {
        self.cycle += 1;
        let eval = self.evaluate(cpu);

        let control = pipeline_control(&HazardInputs {
            d: self.d.output(),
            e: self.e.output(),
            m: self.m.output(),
            w: self.w.output(),
            f_stat: eval.fetch.stat,
            d_srca: eval.id.srca,
            d_srcb: eval.id.srcb,
            e_cnd: eval.ex.cnd,
            m_stat: eval.mem.stat,
        });
        if control.load_use {
            debug!(cycle = self.cycle, "load-use hazard: stalling F/D, bubbling E");
        }
        if control.mispredict {
            debug!(
                cycle = self.cycle,
                "mispredicted jump at {:#x}: squashing D and E",
                self.e.output().pc
            );
        }
        if control.ret {
            debug!(cycle = self.cycle, "ret in flight: stalling F, bubbling D");
        }

        self.f.set_control(control.f);
        self.d.set_control(control.d);
        self.e.set_control(control.e);
        self.m.set_control(control.m);
        self.w.set_control(control.w);

        let retired = (eval.wb.icode != Icode::Nop
            && matches!(eval.wb.stat, Stat::Aok | Stat::Hlt))
        .then_some(eval.wb.icode);
        let jump_resolved = self.e.output().icode == Icode::Jxx;

        for stage in Stage::ALL {
            self.commit(stage, &eval, cpu);
        }

        let report = CycleReport {
            cycle: self.cycle,
            control,
            retired,
            terminal: eval.wb.terminal.then_some(eval.wb.stat),
        };
        cpu.stats.record_cycle(&report, jump_resolved);

        if cpu.trace {
            trace!("{}", self.render_state());
        }
        report
    }

    /// Evaluation phase: runs every stage's combinational logic.
    fn evaluate(&self, cpu: &Cpu) -> Evaluation {
        let (f, d, e, m, w) = (
            self.f.output(),
            self.d.output(),
            self.e.output(),
            self.m.output(),
            self.w.output(),
        );

        let wb = wb_stage(w);
        let mem = mem_stage(m, &cpu.mem);
        let ex = execute_stage(e, cpu.cc, mem.stat, w.stat);
        let fwd = ForwardingSources::new(ex.dste, ex.vale, mem.valm, m, w);
        let id = decode_stage(d, &cpu.regs, &fwd);
        let fetch = fetch_stage(f, m, w, &cpu.mem);

        Evaluation {
            wb,
            mem,
            ex,
            id,
            fetch,
        }
    }

    /// Commit phase for one stage: latch its successor(s) and apply its side effect.
    fn commit(&mut self, stage: Stage, eval: &Evaluation, cpu: &mut Cpu) {
        match stage {
            Stage::Fetch => {
                self.f.set_input(FEntry {
                    pred_pc: eval.fetch.pred_pc,
                });
                self.f.commit();
                self.d.set_input(eval.fetch.next);
                self.d.commit();
            }
            Stage::Decode => {
                self.e.set_input(eval.id.next);
                self.e.commit();
            }
            Stage::Execute => {
                self.m.set_input(eval.ex.next);
                self.m.commit();
                if let Some(cc) = eval.ex.cc_update {
                    cpu.cc = cc;
                }
            }
            Stage::Memory => {
                self.w.set_input(eval.mem.next);
                self.w.commit();
                if let Some(store) = eval.mem.store {
                    // Bounds were checked during evaluation.
                    if let Err(e) = cpu.mem.put_long(store.addr, store.val) {
                        debug!("store dropped: {e}");
                    }
                }
            }
            Stage::Writeback => {
                cpu.regs.write(eval.wb.dste, eval.wb.vale);
                cpu.regs.write(eval.wb.dstm, eval.wb.valm);
            }
        }
    }

    /// Formats every latch's committed output, one line per register.
    pub fn render_state(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "---- cycle {} ----", self.cycle);
        let _ = writeln!(out, "{}: {}", self.f.name(), self.f.output());
        let _ = writeln!(out, "{}: {}", self.d.name(), self.d.output());
        let _ = writeln!(out, "{}: {}", self.e.name(), self.e.output());
        let _ = writeln!(out, "{}: {}", self.m.name(), self.m.output());
        let _ = write!(out, "{}: {}", self.w.name(), self.w.output());
        out
    }
}
