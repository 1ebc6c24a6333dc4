//! Quality Grades
//!
//! Every reading carries a quality score on a 0-100 scale. Drivers map their
//! own signal metrics onto these grades so consumers can compare sensors
//! without knowing how each one measures confidence.

// ===== QUALITY GRADES =====

/// Clean signal, strong and unsaturated.
pub const QUALITY_EXCELLENT: u8 = 90;

/// Usable signal near the edge of the sensor's range.
///
/// Also the fixed grade of motion readings, which have no intrinsic
/// confidence metric.
pub const QUALITY_FAIR: u8 = 50;

/// Weak or saturated signal. Not usable for beat detection.
pub const QUALITY_POOR: u8 = 30;

/// No signal, e.g. no skin contact.
pub const QUALITY_INVALID: u8 = 0;

// ===== AVERAGING =====

/// History weight of the running quality average (out of `QUALITY_EMA_TOTAL`).
///
/// `avg = (avg * 9 + q) / 10`: a new sample moves the average by a tenth
/// of the difference, so one bad sample cannot swing it.
pub const QUALITY_EMA_HISTORY_WEIGHT: u32 = 9;

/// Denominator of the running quality average.
pub const QUALITY_EMA_TOTAL: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_are_ordered() {
        assert!(QUALITY_EXCELLENT > QUALITY_FAIR);
        assert!(QUALITY_FAIR > QUALITY_POOR);
        assert!(QUALITY_POOR > QUALITY_INVALID);
        assert!(QUALITY_EXCELLENT <= 100);
    }
}
