//! Engine configuration
//!
//! Mirrors the original engine's `CIDARTHAConfig`: a small, validated
//! configuration struct plus a process-wide default that callers can set
//! once and have every subsequently constructed engine pick up.

use crate::cache::DEFAULT_CAPACITY;
use std::sync::OnceLock;

use parking_lot::RwLock;

/// Configuration for a [`crate::CidrMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of distinct addresses to cache lookup results for.
    /// Zero disables the lookup cache entirely.
    pub cache_capacity: usize,
    /// Batch-insert progress is logged every `1 / batch_log_interval_denom`
    /// of the total, e.g. a denominator of 20 logs every 5%.
    pub batch_log_interval_denom: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            batch_log_interval_denom: 20,
        }
    }
}

impl EngineConfig {
    /// Construct a config with the given cache capacity and the default
    /// batch-logging cadence.
    pub fn with_capacity(cache_capacity: usize) -> Self {
        Self {
            cache_capacity,
            ..Self::default()
        }
    }
}

static DEFAULT_CONFIG: OnceLock<RwLock<EngineConfig>> = OnceLock::new();

fn default_config_cell() -> &'static RwLock<EngineConfig> {
    DEFAULT_CONFIG.get_or_init(|| RwLock::new(EngineConfig::default()))
}

/// Get the process-wide default configuration.
pub fn get_default_config() -> EngineConfig {
    *default_config_cell().read()
}

/// Set the process-wide default configuration. Engines constructed with
/// `CidrMatcher::default()` after this call will use the new defaults;
/// existing engines are unaffected.
pub fn set_default_config(config: EngineConfig) {
    *default_config_cell().write() = config;
}
