// src/config.rs

//! Timing configuration for a traffic light's cycle thread.
//!
//! The struct derives serde's traits so the owning simulation can load it
//! from whatever format it already uses; every field falls back to its
//! default when missing. The defaults reproduce the standard schedule: a
//! cycle length drawn uniformly from 4 to 6 seconds, checked every
//! millisecond.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::error::ConfigError;

/// Default inclusive lower bound of a cycle, in milliseconds.
pub const DEFAULT_MIN_CYCLE_MS: u64 = 4000;
/// Default inclusive upper bound of a cycle, in milliseconds.
pub const DEFAULT_MAX_CYCLE_MS: u64 = 6000;
/// Default sleep between elapsed-time checks, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1;

/// Cycle timing for a single traffic light.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Shortest time a phase is held, inclusive.
    pub min_cycle_ms: u64,
    /// Longest time a phase is held, inclusive.
    pub max_cycle_ms: u64,
    /// How long the cycle thread sleeps between checks of the elapsed time.
    /// The last sleep of a cycle is cut short so a transition never lands
    /// after the drawn cycle length, even when this exceeds `max_cycle_ms`.
    pub poll_interval_ms: u64,
    /// Fixed seed for the cycle length generator. `None` seeds from the OS,
    /// so two lights started together drift apart.
    pub seed: Option<u64>,
}

impl Default for CycleConfig {
    fn default() -> Self {
        CycleConfig {
            min_cycle_ms: DEFAULT_MIN_CYCLE_MS,
            max_cycle_ms: DEFAULT_MAX_CYCLE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            seed: None,
        }
    }
}

impl CycleConfig {
    /// Checks that a cycle length can be drawn and the poll loop sleeps.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvertedCycleRange` if `min_cycle_ms > max_cycle_ms`
    /// - `ConfigError::ZeroPollInterval` if `poll_interval_ms == 0`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_cycle_ms > self.max_cycle_ms {
            return Err(ConfigError::InvertedCycleRange {
                min_ms: self.min_cycle_ms,
                max_ms: self.max_cycle_ms,
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Inclusive range of cycle lengths in milliseconds.
    #[must_use]
    pub fn cycle_range_ms(&self) -> RangeInclusive<u64> {
        self.min_cycle_ms..=self.max_cycle_ms
    }

    #[must_use]
    pub fn cycle_range(&self) -> RangeInclusive<Duration> {
        Duration::from_millis(self.min_cycle_ms)..=Duration::from_millis(self.max_cycle_ms)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
