//! Core processor implementation.
//!
//! This module contains the CPU state container, the five-stage instruction pipeline,
//! the execution units, and the architectural components that outlive any instruction.

/// Architecture-specific components (condition codes, status codes).
pub mod arch;

/// CPU state container.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, branch predictor).
pub mod units;

pub use self::cpu::Cpu;
