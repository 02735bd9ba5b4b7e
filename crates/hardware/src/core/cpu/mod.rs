//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which holds all architectural state the
//! pipeline stages read and the commit phase writes. It coordinates the following:
//! 1. **State Management:** Register file, condition codes, and main memory.
//! 2. **Observability:** Trace flag and performance statistics.
//! 3. **Comparison:** Extracting an `ArchState` for checking against the reference executor.

use crate::common::constants::NUM_REGS;
use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::arch::cc::ConditionCodes;
use crate::memory::Memory;
use crate::stats::SimStats;

/// Main CPU structure containing all architectural state.
///
/// Pipeline latches live in [`Pipeline`](crate::core::pipeline::engine::Pipeline); the
/// `Cpu` holds only what a program can observe.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General purpose registers.
    pub regs: RegisterFile,
    /// Main memory.
    pub mem: Memory,
    /// Condition codes.
    pub cc: ConditionCodes,
    /// Performance statistics.
    pub stats: SimStats,
    /// Log every latch through `tracing` at the end of each cycle.
    pub trace: bool,
}

/// Program-visible state used to compare two executions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchState {
    /// All register values in encoding order.
    pub regs: [u64; NUM_REGS],
    /// Condition codes.
    pub cc: ConditionCodes,
    /// Full memory image.
    pub mem: Memory,
}

impl Cpu {
    /// Creates a new CPU with zeroed registers and memory and power-on condition codes.
    ///
    /// # Arguments
    ///
    /// * `config` - Memory size and trace settings.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            mem: Memory::new(config.memory.size_bytes),
            cc: ConditionCodes::default(),
            stats: SimStats::default(),
            trace: config.general.trace_instructions,
        }
    }

    /// Captures the program-visible state.
    pub fn arch_state(&self) -> ArchState {
        ArchState {
            regs: self.regs.snapshot(),
            cc: self.cc,
            mem: self.mem.clone(),
        }
    }
}
