//! Sensor data types
//!
//! Plain value types shared by every driver: the sensor kind, one reading,
//! driver configuration, per-driver statistics and device status.

use crate::constants::quality::{QUALITY_EMA_HISTORY_WEIGHT, QUALITY_EMA_TOTAL, QUALITY_POOR};
use crate::constants::sensors::{
    PPG_DEFAULT_ADC_RANGE, PPG_DEFAULT_LED_CURRENT, PPG_DEFAULT_PULSE_WIDTH_US,
    PPG_DEFAULT_SAMPLE_RATE_HZ,
};
use crate::errors::SensorError;
use crate::time::Timestamp;

/// Quality score, 0 (invalid) to 100 (perfect)
pub type Quality = u8;

/// Logical sensor kinds known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SensorKind {
    /// PPG heart-rate channel
    HeartRate = 0,
    /// Blood oxygen saturation
    SpO2 = 1,
    /// Gyroscope half of the IMU
    Gyro = 2,
    /// Accelerometer half of the IMU
    Accel = 3,
}

impl SensorKind {
    /// Number of kinds
    pub const COUNT: usize = 4;

    /// All kinds in discriminant order
    pub const ALL: [SensorKind; Self::COUNT] =
        [Self::HeartRate, Self::SpO2, Self::Gyro, Self::Accel];

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HeartRate => "heart_rate",
            Self::SpO2 => "spo2",
            Self::Gyro => "gyro",
            Self::Accel => "accel",
        }
    }
}

impl TryFrom<u8> for SensorKind {
    type Error = SensorError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::HeartRate),
            1 => Ok(Self::SpO2),
            2 => Ok(Self::Gyro),
            3 => Ok(Self::Accel),
            _ => Err(SensorError::InvalidParameter),
        }
    }
}

impl From<SensorKind> for u8 {
    fn from(kind: SensorKind) -> u8 {
        kind as u8
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorKind {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

/// One sample from a sensor
///
/// `value` is the raw intensity for PPG and the vector magnitude for motion
/// sensors. Single-axis sensors leave `x`, `y`, `z` at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Milliseconds since boot
    pub timestamp: Timestamp,
    /// Intensity for PPG, vector magnitude for motion sensors
    pub value: f32,
    /// Raw device word
    pub raw_value: u32,
    /// X axis, 0 for scalar sensors
    pub x: f32,
    /// Y axis, 0 for scalar sensors
    pub y: f32,
    /// Z axis, 0 for scalar sensors
    pub z: f32,
    /// Quality grade, 0-100
    pub quality: Quality,
}

impl SensorReading {
    /// Single-channel reading
    pub fn scalar(timestamp: Timestamp, value: f32, raw_value: u32, quality: Quality) -> Self {
        Self {
            timestamp,
            value,
            raw_value,
            quality,
            ..Self::default()
        }
    }

    /// Whether the quality is above the unusable band
    pub fn is_usable(&self) -> bool {
        self.quality > QUALITY_POOR
    }
}

/// Driver configuration
///
/// Owned by the driver. Consumers see it read-only through
/// [`Sensor::config`](crate::sensor::Sensor::config).
///
/// ```rust
/// use pulsekit_core::SensorConfig;
///
/// let config = SensorConfig::default()
///     .with_sample_rate(50)
///     .with_led_current(40);
///
/// assert_eq!(config.sample_rate_hz, 50);
/// assert!(config.auto_calibrate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Output data rate (Hz)
    pub sample_rate_hz: u32,
    /// LED drive current register value
    pub led_current: u8,
    /// ADC full-scale range (nA)
    pub adc_range: u16,
    /// LED pulse width (µs)
    pub pulse_width_us: u16,
    /// Calibrate automatically after init
    pub auto_calibrate: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: PPG_DEFAULT_SAMPLE_RATE_HZ,
            led_current: PPG_DEFAULT_LED_CURRENT,
            adc_range: PPG_DEFAULT_ADC_RANGE,
            pulse_width_us: PPG_DEFAULT_PULSE_WIDTH_US,
            auto_calibrate: true,
        }
    }
}

impl SensorConfig {
    /// Set the output data rate (Hz)
    pub fn with_sample_rate(mut self, hz: u32) -> Self {
        self.sample_rate_hz = hz;
        self
    }

    /// Set the LED drive current
    pub fn with_led_current(mut self, current: u8) -> Self {
        self.led_current = current;
        self
    }

    /// Set the ADC range
    pub fn with_adc_range(mut self, range: u16) -> Self {
        self.adc_range = range;
        self
    }

    /// Set the LED pulse width (µs)
    pub fn with_pulse_width(mut self, us: u16) -> Self {
        self.pulse_width_us = us;
        self
    }

    /// Enable or disable auto-calibration
    pub fn with_auto_calibrate(mut self, enabled: bool) -> Self {
        self.auto_calibrate = enabled;
        self
    }

    /// Rejects a zero sample rate
    pub fn validate(&self) -> Result<(), SensorError> {
        if self.sample_rate_hz == 0 {
            return Err(SensorError::InvalidParameter);
        }
        Ok(())
    }
}

/// Per-driver sampling statistics
///
/// Mutated only by the owning driver's `read`; cleared by `reset_stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorStats {
    /// Reads attempted, successful or not
    pub total_samples: u32,
    /// Reads with a usable quality
    pub valid_samples: u32,
    /// Reads that failed
    pub error_count: u32,
    /// Running average of the quality grade
    pub avg_quality: Quality,
    /// Timestamp of the last successful read
    pub last_reading: Timestamp,
}

impl SensorStats {
    /// Account for one successful sample
    ///
    /// The quality average starts at the first successful sample and then
    /// moves a tenth of the way towards each new one.
    pub fn record(&mut self, quality: Quality, valid: bool, timestamp: Timestamp) {
        self.avg_quality = if self.total_samples == self.error_count {
            quality
        } else {
            let blended = u32::from(self.avg_quality) * QUALITY_EMA_HISTORY_WEIGHT
                + u32::from(quality);
            (blended / QUALITY_EMA_TOTAL) as Quality
        };
        self.total_samples = self.total_samples.saturating_add(1);
        if valid {
            self.valid_samples = self.valid_samples.saturating_add(1);
        }
        self.last_reading = timestamp;
    }

    /// Account for one failed sample
    pub fn record_error(&mut self) {
        self.total_samples = self.total_samples.saturating_add(1);
        self.error_count = self.error_count.saturating_add(1);
    }

    /// Share of samples that were valid, 0.0 with no samples
    pub fn valid_ratio(&self) -> f32 {
        if self.total_samples == 0 {
            return 0.0;
        }
        self.valid_samples as f32 / self.total_samples as f32
    }
}

/// Coarse device status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceStatus {
    /// Not initialised yet
    #[default]
    Unknown,
    /// Initialised and answering
    Ready,
    /// Occupied by another operation
    Busy,
    /// Transport reports a fault
    Error,
    /// Powered down
    Sleep,
}

/// Optional operations a driver implements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    /// Implements `init`
    pub init: bool,
    /// Implements `configure`
    pub configure: bool,
    /// Implements `calibrate`
    pub calibrate: bool,
}

impl Capabilities {
    /// Init only, e.g. motion sensors
    pub const fn init_only() -> Self {
        Self { init: true, configure: false, calibrate: false }
    }

    /// Every optional operation
    pub const fn full() -> Self {
        Self { init: true, configure: true, calibrate: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_u8() {
        for kind in SensorKind::ALL {
            assert_eq!(SensorKind::try_from(u8::from(kind)), Ok(kind));
        }
        assert_eq!(SensorKind::try_from(4), Err(SensorError::InvalidParameter));
        assert_eq!(SensorKind::try_from(255), Err(SensorError::InvalidParameter));
    }

    #[test]
    fn quality_average_seeds_then_smooths() {
        let mut stats = SensorStats::default();
        stats.record(90, true, 10);
        assert_eq!(stats.avg_quality, 90);

        stats.record(0, false, 20);
        // (90 * 9 + 0) / 10
        assert_eq!(stats.avg_quality, 81);
        assert_eq!(stats.total_samples, 2);
        assert_eq!(stats.valid_samples, 1);
        assert_eq!(stats.last_reading, 20);
    }

    #[test]
    fn errors_count_as_samples() {
        let mut stats = SensorStats::default();
        stats.record_error();
        stats.record(50, true, 5);

        assert_eq!(stats.total_samples, 2);
        assert_eq!(stats.error_count, 1);
        assert_eq!(stats.valid_ratio(), 0.5);
    }

    #[test]
    fn default_config_is_valid() {
        let config = SensorConfig::default();
        assert_eq!(config.sample_rate_hz, 100);
        assert_eq!(config.pulse_width_us, 411);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.with_sample_rate(0).validate(),
            Err(SensorError::InvalidParameter)
        );
    }

    #[test]
    fn usable_means_above_poor() {
        assert!(!SensorReading::scalar(0, 1.0, 1, QUALITY_POOR).is_usable());
        assert!(SensorReading::scalar(0, 1.0, 1, QUALITY_POOR + 1).is_usable());
    }
}
