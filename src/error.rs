// src/error.rs

//! Error types for the traffic light library.

/// Error returned when a [`CycleConfig`](crate::CycleConfig) cannot drive a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The lower cycle bound is above the upper one, so no duration can be drawn.
    InvertedCycleRange { min_ms: u64, max_ms: u64 },
    /// A zero poll interval would spin the cycle thread without sleeping.
    ZeroPollInterval,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvertedCycleRange { min_ms, max_ms } => write!(
                f,
                "invalid cycle range: min_cycle_ms ({}) is greater than max_cycle_ms ({})",
                min_ms, max_ms
            ),
            ConfigError::ZeroPollInterval => write!(f, "poll_interval_ms must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
