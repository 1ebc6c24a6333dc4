//! Sensor Capability Trait
//!
//! Every physical sensor is driven through [`Sensor`]. The registry stores
//! drivers as trait objects, so the heart-rate task and any other consumer
//! work with a PPG front end, an IMU half or a simulated source without
//! knowing which one they hold.
//!
//! ## Contract
//!
//! - `init`, `read`, `status`, `stats` and `reset_stats` are mandatory
//! - `configure`, `calibrate` and `config` are optional; the defaults report
//!   `Unsupported` / `None` and [`Sensor::capabilities`] says which ones a
//!   driver really implements
//! - `read` updates the driver's statistics on every call, success or not
//! - `read` never blocks without bound; drivers give up with `Timeout`
//!
//! ## Example Implementation
//!
//! ```rust
//! use pulsekit_core::{
//!     Capabilities, DeviceStatus, Sensor, SensorError, SensorReading, SensorResult,
//!     SensorStats,
//! };
//!
//! struct Constant {
//!     stats: SensorStats,
//!     ready: bool,
//! }
//!
//! impl Sensor for Constant {
//!     fn init(&mut self) -> SensorResult<()> {
//!         self.ready = true;
//!         Ok(())
//!     }
//!
//!     fn read(&mut self) -> SensorResult<SensorReading> {
//!         if !self.ready {
//!             self.stats.record_error();
//!             return Err(SensorError::NotInitialized);
//!         }
//!         let reading = SensorReading::scalar(0, 1.0, 1, 90);
//!         self.stats.record(reading.quality, true, reading.timestamp);
//!         Ok(reading)
//!     }
//!
//!     fn status(&self) -> DeviceStatus {
//!         if self.ready { DeviceStatus::Ready } else { DeviceStatus::Unknown }
//!     }
//!
//!     fn stats(&self) -> SensorStats {
//!         self.stats
//!     }
//!
//!     fn reset_stats(&mut self) {
//!         self.stats = SensorStats::default();
//!     }
//!
//!     fn capabilities(&self) -> Capabilities {
//!         Capabilities::init_only()
//!     }
//! }
//!
//! let mut sensor = Constant { stats: SensorStats::default(), ready: false };
//! assert_eq!(sensor.read(), Err(SensorError::NotInitialized));
//! sensor.init().unwrap();
//! assert_eq!(sensor.read().unwrap().value, 1.0);
//! assert_eq!(sensor.stats().total_samples, 2);
//! assert_eq!(sensor.calibrate(), Err(SensorError::Unsupported));
//! ```

use crate::errors::{SensorError, SensorResult};
use crate::sensor::types::{Capabilities, DeviceStatus, SensorConfig, SensorReading, SensorStats};

/// Uniform driver interface for every sensor
///
/// `Send` so a driver can move into the processing thread behind a
/// [`SensorHandle`](crate::sensor::SensorHandle).
pub trait Sensor: Send {
    /// Bring the device up; called once by the registry
    fn init(&mut self) -> SensorResult<()>;

    /// Acquire one sample
    ///
    /// Updates the driver's statistics before returning on every path.
    fn read(&mut self) -> SensorResult<SensorReading>;

    /// Current device status
    fn status(&self) -> DeviceStatus;

    /// Snapshot of the sampling statistics
    fn stats(&self) -> SensorStats;

    /// Clear the sampling statistics
    fn reset_stats(&mut self);

    /// Which optional operations this driver implements
    fn capabilities(&self) -> Capabilities;

    /// Apply a new configuration
    fn configure(&mut self, config: &SensorConfig) -> SensorResult<()> {
        let _ = config;
        Err(SensorError::Unsupported)
    }

    /// Run the driver's calibration routine
    fn calibrate(&mut self) -> SensorResult<()> {
        Err(SensorError::Unsupported)
    }

    /// Active configuration, if the driver has one
    fn config(&self) -> Option<SensorConfig> {
        None
    }
}
