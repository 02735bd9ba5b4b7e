//! Instruction Pipeline Implementation.
//!
//! This module implements the five-stage Y86-64 pipeline. It includes:
//! 1. **Latches:** Two-phase pipeline registers F, D, E, M, and W.
//! 2. **Stages:** Combinational logic for Fetch, Decode, Execute, Memory, and Writeback.
//! 3. **Hazards:** Forwarding, load-use and control hazard detection, and stall/bubble control.
//! 4. **Engine:** The evaluate-then-commit cycle loop.

/// Evaluate/commit cycle engine.
pub mod engine;

/// Forwarding network and hazard control unit.
pub mod hazards;

/// Pipeline registers and the two-phase latch primitive.
pub mod latches;

/// Combinational signals produced by each stage.
pub mod signals;

/// Stage logic.
pub mod stages;

/// Pipeline latch trait.
pub mod traits;

pub use self::engine::Pipeline;
