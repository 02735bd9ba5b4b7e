//! Common utilities and types used throughout the Y86-64 simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Architectural limits (memory capacity, register count, word size).
//! 2. **Error Handling:** Memory access and object-file loading errors.
//! 3. **Register Management:** Register identifiers and the register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for memory access and program loading.
pub mod error;

/// Register identifiers and the register file implementation.
pub mod reg;

pub use error::{LineError, LoadError, MemoryError};
pub use reg::{RegId, RegisterFile};
