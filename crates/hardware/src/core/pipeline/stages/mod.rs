//! Pipeline stage implementations.
//!
//! This module contains the combinational logic of the five pipeline stages. Each stage is
//! a pure function of the committed latch outputs (plus, for Decode and Execute, signals
//! computed earlier in the same cycle); none of them mutates architectural state.
//! 1. **Fetch:** Selects the PC, reads the instruction, predicts the next PC.
//! 2. **Decode:** Selects registers and reads or forwards operands.
//! 3. **Execute:** Performs the ALU operation and evaluates conditions.
//! 4. **Memory:** Performs the data load and prepares the data store.
//! 5. **Writeback:** Prepares register writes and detects termination.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
