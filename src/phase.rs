// src/phase.rs

//! The two-state phase a traffic light can be in.

use serde::{Deserialize, Serialize};

/// Current signal shown by a traffic light.
///
/// There are exactly two phases. A light cycles `Red -> Green -> Red -> ...`
/// and never transitions to the phase it is already in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLightPhase {
    /// Traffic must stop. Every light starts here.
    #[default]
    Red,
    /// Traffic may proceed.
    Green,
}

impl TrafficLightPhase {
    /// Returns the opposite phase.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            TrafficLightPhase::Red => TrafficLightPhase::Green,
            TrafficLightPhase::Green => TrafficLightPhase::Red,
        }
    }

    #[must_use]
    pub fn is_green(self) -> bool {
        self == TrafficLightPhase::Green
    }
}

impl std::fmt::Display for TrafficLightPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrafficLightPhase::Red => write!(f, "red"),
            TrafficLightPhase::Green => write!(f, "green"),
        }
    }
}
