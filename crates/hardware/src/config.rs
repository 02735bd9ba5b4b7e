//! Configuration system for the Y86-64 simulator.
//!
//! This module defines the configuration structures used to parameterize the simulator.
//! It provides:
//! 1. **Defaults:** Baseline constants (memory capacity, cycle limit, start address).
//! 2. **Structures:** Hierarchical config for general simulation settings and main memory.
//!
//! Configuration is supplied as JSON (`y86sim run --config sim.json`) or use `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{DEFAULT_MAX_CYCLES, MEM_SIZE};

/// Default configuration constants for the simulator.
mod defaults {
    /// Total size of main memory in bytes.
    pub const MEM_SIZE: usize = super::MEM_SIZE;

    /// Cycle count after which a run is abandoned as non-terminating.
    pub const MAX_CYCLES: u64 = super::DEFAULT_MAX_CYCLES;

    /// Address of the first instruction fetched.
    pub const START_PC: u64 = 0;
}

/// Root configuration structure for the simulator.
///
/// Every field may be omitted from the JSON; missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use y86sim_core::config::Config;
///
/// let json = r#"{
///     "general": {
///         "trace_instructions": true,
///         "max_cycles": 500
///     },
///     "memory": {
///         "size_bytes": 8192
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.max_cycles, 500);
/// assert_eq!(config.general.start_pc, 0);
/// assert_eq!(config.memory.size_bytes, 8192);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Main memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON text; unknown keys are ignored and missing keys take defaults.
    ///
    /// # Returns
    ///
    /// The parsed configuration.
    ///
    /// # Errors
    ///
    /// The `serde_json` error describing malformed input or a mistyped field.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Dump every pipeline latch through `tracing` at the end of each cycle
    #[serde(default)]
    pub trace_instructions: bool,

    /// Cycles to run before giving up on a program that never halts
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Initial value of the fetch stage's predicted PC
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u64,
}

impl GeneralConfig {
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    fn default_start_pc() -> u64 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: defaults::MAX_CYCLES,
            start_pc: defaults::START_PC,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Capacity of the flat memory in bytes
    #[serde(default = "MemoryConfig::default_size_bytes")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    fn default_size_bytes() -> usize {
        defaults::MEM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEM_SIZE,
        }
    }
}
