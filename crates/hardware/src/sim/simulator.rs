//! Simulator: owns both the CPU and the pipeline side-by-side.
//!
//! The driver loop ticks the pipeline until an instruction with a non-`AOK` status reaches
//! Writeback or the configured cycle limit runs out, and produces the final-state report.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::common::constants::NUM_REGS;
use crate::common::error::LoadError;
use crate::common::reg::RegId;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::cc::ConditionCodes;
use crate::core::arch::stat::Stat;
use crate::core::pipeline::engine::Pipeline;
use crate::memory::Memory;
use crate::sim::loader;

/// How a call to [`Simulator::run`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// An instruction with this status retired (`HLT`, `ADR`, or `INS`).
    Terminated(Stat),
    /// `max_cycles` elapsed without termination.
    CycleLimit,
}

/// Top-level simulator: CPU architectural state + pipeline.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, condition codes, memory, stats).
    pub cpu: Cpu,
    /// The five pipeline registers.
    pub pipeline: Pipeline,
    max_cycles: u64,
    loaded_image: Memory,
    status: Option<Stat>,
}

impl Simulator {
    /// Creates a new simulator with the given configuration.
    pub fn new(config: &Config) -> Self {
        let cpu = Cpu::new(config);
        let loaded_image = cpu.mem.clone();
        Self {
            cpu,
            pipeline: Pipeline::new(config.general.start_pc),
            max_cycles: config.general.max_cycles,
            loaded_image,
            status: None,
        }
    }

    /// Loads a `.yo` object file into memory.
    ///
    /// # Returns
    ///
    /// The number of bytes loaded.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`] from the loader. Memory is unchanged if the file is rejected.
    pub fn load_object_file(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let total = loader::load_object_file(path, &mut self.cpu.mem)?;
        self.loaded_image = self.cpu.mem.clone();
        Ok(total)
    }

    /// Loads object-file text into memory.
    ///
    /// # Errors
    ///
    /// [`LoadError::Line`] for the first rejected line; memory is left unchanged.
    pub fn load_object_str(&mut self, text: &str) -> Result<usize, LoadError> {
        let total = loader::load_object_str(text, &mut self.cpu.mem)?;
        self.loaded_image = self.cpu.mem.clone();
        Ok(total)
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Returns
    ///
    /// `Some(stat)` once the simulation has terminated; later calls do nothing and return
    /// the same status.
    pub fn tick(&mut self) -> Option<Stat> {
        if self.status.is_some() {
            return self.status;
        }
        let report = self.pipeline.tick(&mut self.cpu);
        if let Some(stat) = report.terminal {
            info!(cycle = report.cycle, %stat, "simulation terminated");
            self.status = Some(stat);
        }
        self.status
    }

    /// Ticks until termination or the cycle limit.
    pub fn run(&mut self) -> RunOutcome {
        while self.pipeline.cycle() < self.max_cycles {
            if let Some(stat) = self.tick() {
                return RunOutcome::Terminated(stat);
            }
        }
        if let Some(stat) = self.status {
            return RunOutcome::Terminated(stat);
        }
        warn!(max_cycles = self.max_cycles, "cycle limit reached without termination");
        RunOutcome::CycleLimit
    }

    /// Final status, if the simulation has terminated.
    pub fn status(&self) -> Option<Stat> {
        self.status
    }

    /// Cycles completed so far.
    pub fn cycles(&self) -> u64 {
        self.pipeline.cycle()
    }

    /// Memory as it was right after the last successful load.
    pub fn loaded_image(&self) -> &Memory {
        &self.loaded_image
    }

    /// Builds the final-state report.
    pub fn report(&self) -> FinalReport {
        FinalReport {
            status: self.status,
            cycles: self.cycles(),
            cc: self.cpu.cc,
            regs: self.cpu.regs.snapshot(),
            changed_memory: self.cpu.mem.changed_words(&self.loaded_image),
        }
    }
}

/// Program-visible outcome of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalReport {
    /// Terminating status, or `None` if the run hit the cycle limit.
    pub status: Option<Stat>,
    /// Cycles simulated.
    pub cycles: u64,
    /// Final condition codes.
    pub cc: ConditionCodes,
    /// Final register values in encoding order.
    pub regs: [u64; NUM_REGS],
    /// `(address, before, after)` for every 8-byte word changed since loading.
    pub changed_memory: Vec<(u64, u64, u64)>,
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status.map_or("(cycle limit)", Stat::name);
        writeln!(f, "Stopped in {} cycles with status {status}", self.cycles)?;
        writeln!(f, "Condition codes: {}", self.cc)?;
        writeln!(f, "Registers:")?;
        for (reg, &val) in RegId::ALL.iter().zip(self.regs.iter()) {
            writeln!(f, "{:<5} = 0x{val:016x}", reg.name())?;
        }
        writeln!(f, "Changes to memory:")?;
        for &(addr, old, new) in &self.changed_memory {
            writeln!(f, "0x{addr:04x}:\t0x{old:016x}\t0x{new:016x}")?;
        }
        Ok(())
    }
}
