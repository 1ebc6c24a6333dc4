//! Constants for PulseKit Core
//!
//! Centralised, documented values used by the drivers, the registry and the
//! heart-rate task. Runtime configuration structs take their defaults from
//! here.
//!
//! ## Organization
//!
//! - **Sensors**: PPG intensity bands, driver defaults, calibration
//! - **Time**: task cadence and beat-timing limits
//! - **Quality**: quality grades and averaging weight
//! - **Buffers**: fixed capacities
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include units in names
//! 3. Document where the value comes from

/// Sensor thresholds, driver defaults and calibration parameters.
pub mod sensors;

/// Task cadence and beat timing.
pub mod time;

/// Quality grades on the 0-100 scale.
pub mod quality;

/// Fixed capacities for bounded collections.
pub mod buffers;

pub use sensors::{
    CALIBRATION_INTERVAL_MS, CALIBRATION_MIN_VALID, CALIBRATION_SAMPLES,
    PPG_NO_CONTACT_THRESHOLD, PPG_SATURATION_THRESHOLD,
};

pub use time::{HR_TASK_PERIOD_MS, MS_PER_MINUTE};

pub use quality::{QUALITY_EXCELLENT, QUALITY_FAIR, QUALITY_INVALID, QUALITY_POOR};

pub use buffers::{BEAT_HISTORY_SIZE, MAX_SENSORS};
