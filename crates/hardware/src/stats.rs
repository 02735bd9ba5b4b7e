//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the Y86-64 pipeline. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived metrics.
//! 2. **Instruction mix:** Counts by category (ALU, move, load, store, branch, call/ret).
//! 3. **Branch prediction:** Jumps resolved in Execute and mispredictions among them.
//! 4. **Hazards:** Load-use stall cycles, return bubbles, and exception drain cycles.

use std::time::Instant;

use crate::core::pipeline::signals::CycleReport;
use crate::isa::instruction::Icode;

/// Simulation statistics structure tracking all performance metrics.
///
/// Retirement counts exclude bubbles and `nop`; the `halt` that ends a run is included.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions that completed Writeback.
    pub instructions_retired: u64,

    /// `OPq` instructions retired.
    pub inst_alu: u64,
    /// `rrmovq`, `cmovXX`, and `irmovq` instructions retired.
    pub inst_move: u64,
    /// `mrmovq` and `popq` instructions retired.
    pub inst_load: u64,
    /// `rmmovq` and `pushq` instructions retired.
    pub inst_store: u64,
    /// `jmp`/`jXX` instructions retired.
    pub inst_branch: u64,
    /// `call` and `ret` instructions retired.
    pub inst_call_ret: u64,
    /// `halt` instructions retired.
    pub inst_halt: u64,

    /// Jumps whose prediction was correct.
    pub branch_predictions: u64,
    /// Jumps predicted taken that fell through.
    pub branch_mispredictions: u64,

    /// Cycles in which a load-use hazard stalled Fetch and Decode.
    pub stalls_data: u64,
    /// Cycles in which a `ret` in flight bubbled Decode.
    pub bubbles_ret: u64,
    /// Cycles in which a halting or faulting instruction was draining.
    pub cycles_exception: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_move: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_call_ret: 0,
            inst_halt: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            stalls_data: 0,
            bubbles_ret: 0,
            cycles_exception: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"hazards"`, `"instruction_mix"`, `"branch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "hazards", "instruction_mix", "branch"];

impl SimStats {
    /// Accumulates one cycle's outcome.
    ///
    /// # Arguments
    ///
    /// * `report` - The cycle just committed.
    /// * `jump_in_execute` - Whether a `jXX` was resolved in Execute this cycle.
    pub fn record_cycle(&mut self, report: &CycleReport, jump_in_execute: bool) {
        self.cycles += 1;
        if let Some(icode) = report.retired {
            self.record_retire(icode);
        }
        if jump_in_execute {
            if report.control.mispredict {
                self.branch_mispredictions += 1;
            } else {
                self.branch_predictions += 1;
            }
        }
        if report.control.load_use {
            self.stalls_data += 1;
        }
        if report.control.ret && !report.control.load_use && !report.control.mispredict {
            self.bubbles_ret += 1;
        }
        if report.control.exception {
            self.cycles_exception += 1;
        }
    }

    /// Counts one retired instruction in the mix.
    pub fn record_retire(&mut self, icode: Icode) {
        self.instructions_retired += 1;
        match icode {
            Icode::Opq => self.inst_alu += 1,
            Icode::Rrmovq | Icode::Irmovq => self.inst_move += 1,
            Icode::Mrmovq | Icode::Popq => self.inst_load += 1,
            Icode::Rmmovq | Icode::Pushq => self.inst_store += 1,
            Icode::Jxx => self.inst_branch += 1,
            Icode::Call | Icode::Ret => self.inst_call_ret += 1,
            Icode::Halt => self.inst_halt += 1,
            Icode::Nop => {}
        }
    }

    /// Cycles per retired instruction, or 0.0 before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty slice to
    /// print all sections.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("Y86-64 PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {khz:.2} kHz");
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.instructions_retired as f64 / cyc);
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("hazards") {
            println!("HAZARDS");
            println!(
                "  stalls.load_use        {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data, cyc)
            );
            println!(
                "  bubbles.ret            {} ({:.2}%)",
                self.bubbles_ret,
                pct(self.bubbles_ret, cyc)
            );
            println!(
                "  cycles.exception       {} ({:.2}%)",
                self.cycles_exception,
                pct(self.cycles_exception, cyc)
            );
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.move", self.inst_move),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.call_ret", self.inst_call_ret),
                ("op.halt", self.inst_halt),
            ] {
                println!("  {name:<22} {n} ({:.2}%)", pct(n, instr));
            }
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            let bp_total = self.branch_predictions + self.branch_mispredictions;
            let bp_acc = if bp_total > 0 {
                pct(self.branch_predictions, bp_total as f64)
            } else {
                0.0
            };
            println!("BRANCH PREDICTION");
            println!("  bp.lookups             {bp_total}");
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!("  bp.accuracy            {bp_acc:.2}%");
        }
        println!("==========================================================");
    }
}
