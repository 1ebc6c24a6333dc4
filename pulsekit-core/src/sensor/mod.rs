//! Sensor abstraction
//!
//! - [`types`]: readings, configuration, statistics, kinds
//! - [`traits`]: the [`Sensor`] driver trait
//! - [`transport`]: bus traits drivers are written against
//! - [`handle`]: shared driver handle (std)

pub mod traits;
pub mod transport;
pub mod types;

#[cfg(feature = "std")]
pub mod handle;

pub use traits::Sensor;
pub use transport::{poll_with_timeout, BusError, MotionAxis, MotionBus, PpgBus};
pub use types::{
    Capabilities, DeviceStatus, Quality, SensorConfig, SensorKind, SensorReading, SensorStats,
};

#[cfg(feature = "std")]
pub use handle::SensorHandle;
