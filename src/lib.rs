// src/lib.rs

//! A self-driving traffic light for threaded simulations.
//!
//! A [`TrafficLight`] toggles between red and green on a background thread,
//! holding each phase for a random 4-6 seconds. Other threads can block until
//! it turns green, or take a snapshot of its current phase.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::thread;
//! use traffic_light::{TrafficLight, TrafficLightPhase};
//!
//! let light = Arc::new(TrafficLight::new());
//! light.start()?;
//!
//! let vehicle = {
//!     let light = Arc::clone(&light);
//!     thread::spawn(move || {
//!         light.wait_for_green();
//!         // cross the intersection
//!     })
//! };
//!
//! if light.current_phase() == TrafficLightPhase::Red {
//!     println!("stopped at the light");
//! }
//! vehicle.join().unwrap();
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod phase;
pub mod queue;
pub mod traffic_light;

pub use config::CycleConfig;
pub use error::ConfigError;
pub use phase::TrafficLightPhase;
pub use queue::BlockingQueue;
pub use traffic_light::TrafficLight;
