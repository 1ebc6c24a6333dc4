//! Error Types for Sensor Acquisition
//!
//! ## Design Philosophy
//!
//! Errors travel through the periodic sampling path, so they follow the same
//! rules as everything else on that path:
//!
//! 1. **Small Size**: fieldless variants, one byte each.
//! 2. **No Heap Allocation**: nothing but the discriminant.
//! 3. **Copy Semantics**: cheap to return, store in statistics or compare.
//!
//! ## Error Categories
//!
//! ### Caller mistakes (never retried)
//! - `InvalidParameter`: malformed or absent input
//! - `NotInitialized`: operation attempted before `init`
//! - `Unsupported`: optional capability the driver does not implement
//!
//! ### Hardware conditions (retryable)
//! - `HardwareFailure`: transport or bus error
//! - `Timeout`: bounded wait exceeded, treated like a hardware failure
//! - `NoData`: transport answered but had no sample
//! - `Busy`: device or task already in use
//!
//! ### Configuration-time failures
//! - `CapacityExceeded`: the registry is full
//! - `CalibrationFailed`: too few usable samples, retry by calibrating again
//!
//! ## Propagation
//!
//! Drivers record failures in their own statistics and return the error.
//! The registry aggregates but never hides an individual failure. The
//! heart-rate task turns errors into its coarse state and never exposes the
//! codes to its consumers.
//!
//! ```rust
//! use pulsekit_core::SensorError;
//!
//! fn should_retry(err: SensorError) -> bool {
//!     err.is_transient()
//! }
//!
//! assert!(should_retry(SensorError::Timeout));
//! assert!(!should_retry(SensorError::InvalidParameter));
//! ```

use thiserror_no_std::Error;

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Sensor subsystem errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorError {
    /// Malformed or absent input
    #[error("Invalid parameter")]
    InvalidParameter,

    /// Operation attempted before the required setup
    #[error("Sensor not initialized")]
    NotInitialized,

    /// Transport or bus error
    #[error("Hardware failure")]
    HardwareFailure,

    /// Registry has no free slot
    #[error("Sensor capacity exceeded")]
    CapacityExceeded,

    /// Not enough usable samples to compute a baseline
    #[error("Calibration failed: insufficient valid readings")]
    CalibrationFailed,

    /// Bounded wait on the transport ran out
    #[error("Timed out waiting for sensor")]
    Timeout,

    /// Transport had no sample available
    #[error("No data available")]
    NoData,

    /// Device or task already in use
    #[error("Busy")]
    Busy,

    /// Driver does not implement this optional operation
    #[error("Operation not supported by this sensor")]
    Unsupported,
}

impl SensorError {
    /// Whether retrying the same operation can succeed
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::HardwareFailure
                | Self::Timeout
                | Self::NoData
                | Self::Busy
                | Self::CalibrationFailed
        )
    }

    /// Short machine-friendly name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "invalid_parameter",
            Self::NotInitialized => "not_initialized",
            Self::HardwareFailure => "hardware_failure",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::CalibrationFailed => "calibration_failed",
            Self::Timeout => "timeout",
            Self::NoData => "no_data",
            Self::Busy => "busy",
            Self::Unsupported => "unsupported",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}
