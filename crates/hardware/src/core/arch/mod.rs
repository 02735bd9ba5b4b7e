//! Y86-64 architectural state components.
//!
//! This module contains the architectural elements that outlive any single instruction.
//! It includes the following modules:
//! 1. **Condition Codes:** The ZF/SF/OF flags and condition evaluation.
//! 2. **Status:** The per-instruction status code carried through the pipeline.

/// Condition code register and jump/move condition evaluation.
pub mod cc;

/// Per-instruction status codes (AOK, HLT, ADR, INS).
pub mod stat;

pub use cc::ConditionCodes;
pub use stat::Stat;
