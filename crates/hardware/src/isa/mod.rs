//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the Y86-64 instruction tables, the byte-level decoder shared by the pipeline and
//! the reference executor, and a disassembler.

/// Decoding an instruction's fields from memory.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction, ALU-function and condition codes.
pub mod instruction;
