//! Branch unit (BRU).
//!
//! The pipeline uses static prediction: jumps and calls are predicted taken and
//! everything else falls through. Mispredicted jumps are repaired by the hazard unit
//! using the fall-through address carried in `valA`.

/// Static branch predictor (always taken).
pub mod static_bp;

pub use self::static_bp::predict_pc;
