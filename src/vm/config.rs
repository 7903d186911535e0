//! Engine configuration.

use std::time::Duration;

use crate::core::Value;

/// Configuration for the [`Engine`](super::Engine).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Pause between ticks. Zero runs flat out.
    pub tick_delay: Duration,
    /// Starting value of ts.
    pub initial_ts: Value,
    /// Tick budget; `None` runs until `#` or an abort.
    pub max_ticks: Option<u64>,
    /// Seed for the random-bit instruction. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_delay: Duration::ZERO,
            initial_ts: Value::ZERO,
            max_ticks: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration with a fixed random seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_tick_delay(mut self, delay: Duration) -> Self {
        self.tick_delay = delay;
        self
    }

    pub fn with_initial_ts(mut self, ts: Value) -> Self {
        self.initial_ts = ts;
        self
    }

    pub fn with_max_ticks(mut self, limit: u64) -> Self {
        self.max_ticks = Some(limit);
        self
    }
}
