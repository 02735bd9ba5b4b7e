//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Memory Constants:** Default capacity and the machine word size.
//! 2. **Register Constants:** Number of program-visible registers.
//! 3. **Instruction Constants:** Field widths used when computing the next sequential PC.
//! 4. **Simulation Constants:** Safety-net limits for runaway programs.

/// Default main memory capacity in bytes.
pub const MEM_SIZE: usize = 0x1000;

/// Size of a machine word (and of every data memory access) in bytes.
pub const WORD_SIZE: u64 = 8;

/// Number of general-purpose registers (`%rax` through `%r14`).
pub const NUM_REGS: usize = 15;

/// Size of the icode/ifun byte.
pub const INSTRUCTION_BYTE_SIZE: u64 = 1;

/// Size of the register-specifier byte (rA:rB).
pub const REGIDS_SIZE: u64 = 1;

/// Size of the embedded constant word (valC).
pub const VALC_SIZE: u64 = WORD_SIZE;

/// Default number of cycles after which a run is abandoned.
pub const DEFAULT_MAX_CYCLES: u64 = 100_000;
