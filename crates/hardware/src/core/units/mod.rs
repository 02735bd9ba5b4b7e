//! Execution units and functional components.
//!
//! This module contains the processor's combinational building blocks: the integer ALU
//! used by Execute, and the branch unit that predicts the next fetch address.

/// Arithmetic Logic Unit for integer operations and condition-code generation.
pub mod alu;

/// Branch unit: next-PC prediction.
pub mod bru;
