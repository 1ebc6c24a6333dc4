//! Sensor acquisition core for PulseKit wearables
//!
//! Pulls samples from a PPG heart-rate sensor and a 6-axis IMU through one
//! driver interface, keeps them in a bounded registry and turns the PPG
//! stream into a heart rate on a periodic task.
//!
//! Key constraints:
//! - Fixed-capacity collections, no allocation per sample
//! - Reads are bounded in time
//! - Readers of the heart rate never block the sampling task
//!
//! ```no_run
//! use pulsekit_core::drivers::{builtin_sensors, SimulationControls};
//! use pulsekit_core::time::{MonotonicClock, StdDelay};
//! use pulsekit_core::{HeartRateMonitor, SensorKind, SensorRegistry};
//!
//! let controls = SimulationControls::default();
//! let mut registry: SensorRegistry = SensorRegistry::new();
//! if registry
//!     .system_init(builtin_sensors(MonotonicClock::new(), StdDelay, &controls))
//!     .is_err()
//! {
//!     // Some sensors failed; the others are still usable
//! }
//!
//! let mut monitor = HeartRateMonitor::new();
//! let ppg = registry.get(SensorKind::HeartRate).map(|e| e.handle().clone());
//! monitor.start(ppg).unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod buffer;
pub mod constants;
pub mod errors;
pub mod heart_rate;
pub mod sensor;
pub mod time;

#[cfg(feature = "std")]
pub mod drivers;
#[cfg(feature = "std")]
pub mod registry;

// Public API
pub use errors::{SensorError, SensorResult};
pub use heart_rate::{
    BeatDetector, HeartRateConfig, HeartRateShared, HeartRateState, VitalsSnapshot,
    ZeroCrossingDetector,
};
pub use sensor::{
    Capabilities, DeviceStatus, Quality, Sensor, SensorConfig, SensorKind, SensorReading,
    SensorStats,
};
pub use time::{Delay, TimeSource, Timestamp};

#[cfg(feature = "std")]
pub use heart_rate::{HeartRateMonitor, HeartRateProcessor, HeartRateReader};
#[cfg(feature = "std")]
pub use registry::{SensorEntry, SensorRegistry};
#[cfg(feature = "std")]
pub use sensor::SensorHandle;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
