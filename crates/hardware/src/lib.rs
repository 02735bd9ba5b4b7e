//! Y86-64 pipelined processor simulator library.
//!
//! This crate implements a cycle-accurate simulator of the five-stage Y86-64 pipeline with the following:
//! 1. **Core:** Pipeline latches (F, D, E, M, W), per-stage combinational logic, the hazard unit, and condition codes.
//! 2. **Memory:** A flat, bounds-checked byte store shared by instruction fetch and data access.
//! 3. **ISA:** Instruction tables, byte-level decoding, and a disassembler for tracing.
//! 4. **Simulation:** Object-file loader, cycle driver, sequential reference executor, and configuration.
//! 5. **Statistics:** Cycle, retirement, stall, and branch counters.

/// Common types and constants (register ids, errors, architectural limits).
pub mod common;
/// Simulator configuration (defaults and JSON-deserializable structures).
pub mod config;
/// CPU core (architectural state, pipeline, execution units).
pub mod core;
/// Instruction set (instruction tables, decode, disassembly).
pub mod isa;
/// Flat byte-addressable main memory.
pub mod memory;
/// Object-file loader, simulator driver, and sequential reference executor.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Architectural state shared by the pipeline stages.
pub use crate::core::Cpu;
/// Per-instruction status code carried through the pipeline.
pub use crate::core::arch::stat::Stat;
/// Main memory image.
pub use crate::memory::Memory;
/// Top-level simulator owning the CPU state and the pipeline.
pub use crate::sim::simulator::{RunOutcome, Simulator};
