//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. Every Y86-64 ALU
//! operation computes `valB OP valA`; address arithmetic and stack-pointer adjustment go
//! through the same unit as `Add`.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub (with two's-complement overflow detection)
//! - [`logic`]:      And, Xor

/// Integer arithmetic operations (add, subtract).
pub mod arithmetic;

/// Bitwise logical operations (and, xor).
pub mod logic;

use crate::core::arch::cc::ConditionCodes;
use crate::isa::instruction::AluFn;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

/// Result of one ALU evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluOutput {
    /// 64-bit result, `valB OP valA`.
    pub value: u64,
    /// Flags this result would set if the instruction is allowed to update them.
    pub cc: ConditionCodes,
}

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU function.
    /// * `a`  - The `aluA` operand.
    /// * `b`  - The `aluB` operand.
    ///
    /// # Returns
    ///
    /// The result together with the condition codes it produces.
    ///
    /// # Examples
    ///
    /// ```
    /// use y86sim_core::core::units::alu::Alu;
    /// use y86sim_core::isa::instruction::AluFn;
    ///
    /// // subq computes b - a
    /// let out = Alu::execute(AluFn::Sub, 3, 10);
    /// assert_eq!(out.value, 7);
    /// assert!(!out.cc.zf);
    ///
    /// let out = Alu::execute(AluFn::Xor, 0xff, 0xff);
    /// assert_eq!(out.value, 0);
    /// assert!(out.cc.zf);
    /// ```
    pub fn execute(op: AluFn, a: u64, b: u64) -> AluOutput {
        let (value, of) = match op {
            AluFn::Add => arithmetic::add(a, b),
            AluFn::Sub => arithmetic::sub(a, b),
            AluFn::And => (logic::and(a, b), false),
            AluFn::Xor => (logic::xor(a, b), false),
        };
        AluOutput {
            value,
            cc: ConditionCodes {
                zf: value == 0,
                sf: (value as i64) < 0,
                of,
            },
        }
    }
}
