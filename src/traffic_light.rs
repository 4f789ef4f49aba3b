// src/traffic_light.rs

//! A traffic light that toggles its phase on its own background thread.
//!
//! The light owns two independently locked pieces of state:
//!
//! - the current phase, behind a `Mutex`, read by [`TrafficLight::current_phase`]
//! - a [`BlockingQueue`] of phase transitions, drained by
//!   [`TrafficLight::wait_for_green`]
//!
//! The cycle thread flips the phase, releases the phase lock, then publishes
//! the new phase into the queue. The two locks are never held together, so a
//! phase snapshot may run ahead of (or behind) what queue consumers have seen.
//!
//! ```text
//!               flip under lock                 send
//! cycle thread ───────────────► current_phase ─────────► queue ──► wait_for_green
//!                                    │
//!                                    └──► current_phase() (snapshot)
//! ```

use crate::config::CycleConfig;
use crate::error::ConfigError;
use crate::phase::TrafficLightPhase;
use crate::queue::BlockingQueue;
use anyhow::{Context, Result};
use log::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// A single traffic light cycling between red and green.
///
/// Construct it, call [`start`](Self::start) once, then share it (usually via
/// `Arc`) with the threads that need to wait on it or read it.
pub struct TrafficLight {
    current_phase: Arc<Mutex<TrafficLightPhase>>,
    transitions: Arc<BlockingQueue<TrafficLightPhase>>,
    config: CycleConfig,
}

impl TrafficLight {
    /// Creates a red light using the default 4-6 second schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(CycleConfig::default())
    }

    /// Creates a red light with a custom schedule.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` cannot drive a cycle thread.
    pub fn with_config(config: CycleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CycleConfig) -> Self {
        Self {
            current_phase: Arc::new(Mutex::new(TrafficLightPhase::Red)),
            transitions: Arc::new(BlockingQueue::new()),
            config,
        }
    }

    /// Spawns the cycle thread. The light toggles for the rest of the process.
    ///
    /// Call this exactly once per light. Each call spawns another independent
    /// cycle thread writing to the same phase and queue, which doubles the
    /// toggle rate and interleaves their transitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to create the thread.
    #[doc(alias = "simulate")]
    pub fn start(&self) -> Result<()> {
        let current_phase = Arc::clone(&self.current_phase);
        let transitions = Arc::clone(&self.transitions);
        let config = self.config.clone();

        // Detached: the handle is dropped and the thread runs until process exit.
        thread::Builder::new()
            .name("traffic-light".to_string())
            .spawn(move || cycle_through_phases(&current_phase, &transitions, &config))
            .context("Failed to spawn traffic light cycle thread")?;

        info!(
            "TrafficLight: cycle thread spawned ({}-{} ms per phase)",
            self.config.min_cycle_ms, self.config.max_cycle_ms
        );
        Ok(())
    }

    /// Blocks until the light publishes a green transition.
    ///
    /// Red transitions received while waiting are consumed and dropped. Every
    /// transition is delivered to exactly one waiter, so concurrent callers
    /// split the stream between them rather than each seeing every green.
    pub fn wait_for_green(&self) {
        loop {
            let phase = self.transitions.receive();
            if phase.is_green() {
                debug!("TrafficLight: green received, releasing waiter");
                return;
            }
            trace!("TrafficLight: discarding {} transition", phase);
        }
    }

    /// Returns the phase the light is showing right now.
    ///
    /// Never touches the transition queue.
    #[must_use]
    pub fn current_phase(&self) -> TrafficLightPhase {
        *self.current_phase.lock().unwrap()
    }

    #[must_use]
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TrafficLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrafficLight")
            .field("current_phase", &self.current_phase())
            .field("pending_transitions", &self.transitions.len())
            .field("config", &self.config)
            .finish()
    }
}

fn seeded_rng(config: &CycleConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draws the next cycle length, uniform over the inclusive millisecond range.
fn next_cycle_duration<R: Rng>(rng: &mut R, config: &CycleConfig) -> Duration {
    Duration::from_millis(rng.gen_range(config.cycle_range_ms()))
}

/// Body of the cycle thread. Never returns.
fn cycle_through_phases(
    current_phase: &Mutex<TrafficLightPhase>,
    transitions: &BlockingQueue<TrafficLightPhase>,
    config: &CycleConfig,
) {
    let mut rng = seeded_rng(config);
    let poll_interval = config.poll_interval();
    let mut cycle_duration = next_cycle_duration(&mut rng, config);
    let mut last_switch = Instant::now();

    info!("TrafficLight: cycle thread started");
    debug!("TrafficLight: first cycle lasts {:?}", cycle_duration);

    loop {
        let remaining = cycle_duration.saturating_sub(last_switch.elapsed());
        thread::sleep(poll_interval.min(remaining));

        let elapsed = last_switch.elapsed();
        if elapsed < cycle_duration {
            continue;
        }

        let next_phase = {
            let mut phase = current_phase.lock().unwrap();
            *phase = phase.toggled();
            *phase
        };
        transitions.send(next_phase);

        last_switch = Instant::now();
        cycle_duration = next_cycle_duration(&mut rng, config);
        debug!(
            "TrafficLight: switched to {} after {:?}, next cycle lasts {:?}",
            next_phase, elapsed, cycle_duration
        );
    }
}
