//! Simulation drivers and program loading.
//!
//! Provides the object-file loader, the cycle-by-cycle pipelined simulator, and a
//! sequential reference executor for checking it.

/// Object file (`.yo`) parsing and loading.
pub mod loader;

/// Non-pipelined reference executor.
pub mod reference;

/// Pipelined simulator driver and final-state report.
pub mod simulator;
