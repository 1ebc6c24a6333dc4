//! Sensor Limits and Defaults
//!
//! Operating bands and defaults for the PPG front end, plus the transport
//! and calibration limits shared by all drivers.
//!
//! PPG values are raw red-channel ADC counts (18-bit front end).

// ===== PPG INTENSITY BANDS =====

/// Below this the photodiode sees ambient light only (no finger contact).
///
/// Maps to `QUALITY_INVALID`.
pub const PPG_NO_CONTACT_THRESHOLD: u32 = 5_000;

/// Above this the ADC is saturated. Maps to `QUALITY_POOR`.
///
/// Source: 18-bit full scale is 262 143 counts; the margin absorbs the
/// ambient-light cancellation offset.
pub const PPG_SATURATION_THRESHOLD: u32 = 250_000;

/// Below this contact exists but the pulsatile component is too weak.
pub const PPG_WEAK_SIGNAL_THRESHOLD: u32 = 15_000;

/// Lower edge of the clean band; below it quality is `QUALITY_FAIR`.
pub const PPG_FAIR_LOW_THRESHOLD: u32 = 20_000;

/// Upper edge of the clean band; above it quality is `QUALITY_FAIR`.
pub const PPG_FAIR_HIGH_THRESHOLD: u32 = 200_000;

// ===== PPG DRIVER DEFAULTS =====

/// PPG sample rate (Hz). Matches the bandpass design rate.
pub const PPG_DEFAULT_SAMPLE_RATE_HZ: u32 = 100;

/// LED drive setting, 63 ≈ 27 mA on common front ends.
pub const PPG_DEFAULT_LED_CURRENT: u8 = 63;

/// ADC full-scale range (nA).
pub const PPG_DEFAULT_ADC_RANGE: u16 = 4096;

/// LED pulse width (µs). Longest setting, 18-bit resolution.
pub const PPG_DEFAULT_PULSE_WIDTH_US: u16 = 411;

// ===== TRANSPORT =====

/// Upper bound on one blocking read (ms).
///
/// Twice the 100 Hz sample period plus slack for bus arbitration.
pub const DEFAULT_READ_TIMEOUT_MS: u32 = 25;

/// Poll budget for one read.
///
/// Guards against a clock that does not advance (e.g. a frozen test clock).
pub const MAX_READ_POLLS: u32 = 1_000;

// ===== CALIBRATION =====

/// Reads taken during a calibration run.
pub const CALIBRATION_SAMPLES: usize = 10;

/// Pause between calibration reads (ms).
pub const CALIBRATION_INTERVAL_MS: u32 = 100;

/// Minimum usable reads for a calibration to succeed (majority).
pub const CALIBRATION_MIN_VALID: usize = 5;
