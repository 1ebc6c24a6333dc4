//! Heart-rate bandpass coefficients
//!
//! The table was designed offline at fs = 100 Hz:
//!
//! - 4th-order Butterworth highpass at 0.4 Hz, split into two sections
//!   (lower Q first)
//! - 2nd-order Butterworth lowpass at 7 Hz, one section
//!
//! Rows are `[b0, b1, b2, a1, a2]` with `a0` normalised to one. The passband
//! covers resting to exercise heart rates (roughly 30–220 BPM) while removing
//! the sensor's DC offset, slow baseline wander and high-frequency noise.
//! Only evaluation happens on the device.

use crate::{cascade::BiquadCascade, SosRow};

/// Number of sections in the heart-rate bandpass
pub const HR_FILTER_SECTIONS: usize = 3;

/// Sample rate the table was designed for (Hz)
pub const HR_FILTER_SAMPLE_RATE_HZ: u32 = 100;

/// Highpass corner of the design (Hz)
pub const HR_FILTER_LOW_CUTOFF_HZ: f32 = 0.4;

/// Lowpass corner of the design (Hz)
pub const HR_FILTER_HIGH_CUTOFF_HZ: f32 = 7.0;

/// Second-order sections of the heart-rate bandpass, in execution order
pub const HR_BANDPASS_SOS: [SosRow; HR_FILTER_SECTIONS] = [
    // highpass, lower Q
    [0.967_694_8, -1.935_389_6, 0.967_694_8, -1.954_002, 0.954_619_25],
    // highpass, higher Q
    [1.0, -2.0, 1.0, -1.980_323_9, 0.980_949_46],
    // lowpass
    [0.036_574_836, 0.073_149_67, 0.036_574_836, -1.390_895_3, 0.537_194_6],
];

/// The reference heart-rate filter type
pub type HeartRateBandpass = BiquadCascade<HR_FILTER_SECTIONS>;

/// Build the heart-rate bandpass with zeroed state
pub fn heart_rate_bandpass() -> HeartRateBandpass {
    BiquadCascade::from_sos(&HR_BANDPASS_SOS)
}
