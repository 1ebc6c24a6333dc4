//! Sensor drivers
//!
//! - [`ppg`]: optical heart-rate front end
//! - [`motion`]: accelerometer and gyroscope halves of a 6-axis IMU
//! - [`simulated`]: synthetic transports for host builds and tests

pub mod motion;
pub mod ppg;
pub mod simulated;

pub use motion::{MotionSensor, SharedBus};
pub use ppg::{classify_quality, PpgSensor};
pub use simulated::{builtin_sensors, SimulatedImu, SimulatedPpg, SimulationControls};
