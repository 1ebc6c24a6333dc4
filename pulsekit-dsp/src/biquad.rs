//! Single second-order IIR section
//!
//! Coefficients are set at configuration time and never touched by the
//! processing path. The two delay states change once per processed sample.

use crate::SosRow;

/// Direct-Form-II-Transposed biquad section
///
/// Transfer function with `a0` normalised to one:
///
/// ```text
///         b0 + b1·z⁻¹ + b2·z⁻²
/// H(z) = ----------------------
///          1 + a1·z⁻¹ + a2·z⁻²
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    /// First delay state
    s1: f32,
    /// Second delay state
    s2: f32,
}

impl Biquad {
    /// Section with the given coefficients and zeroed state
    pub const fn new(b0: f32, b1: f32, b2: f32, a1: f32, a2: f32) -> Self {
        Self { b0, b1, b2, a1, a2, s1: 0.0, s2: 0.0 }
    }

    /// Section built from an SOS row `[b0, b1, b2, a1, a2]`
    pub const fn from_row(row: &SosRow) -> Self {
        Self::new(row[0], row[1], row[2], row[3], row[4])
    }

    /// Set coefficients. Delay state is left as is.
    ///
    /// Values are accepted as given; stability is a property of the
    /// coefficient design, not something checked here.
    pub fn configure(&mut self, b0: f32, b1: f32, b2: f32, a1: f32, a2: f32) {
        self.b0 = b0;
        self.b1 = b1;
        self.b2 = b2;
        self.a1 = a1;
        self.a2 = a2;
    }

    /// Zero both delay states
    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }

    /// Filter one sample
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.s1;
        self.s1 = self.b1 * x - self.a1 * y + self.s2;
        self.s2 = self.b2 * x - self.a2 * y;
        y
    }

    /// Current coefficients as an SOS row
    pub fn coefficients(&self) -> SosRow {
        [self.b0, self.b1, self.b2, self.a1, self.a2]
    }

    /// Current delay states `(s1, s2)`
    pub fn state(&self) -> (f32, f32) {
        (self.s1, self.s2)
    }

    /// True when both delay states are zero
    pub fn is_at_rest(&self) -> bool {
        self.s1 == 0.0 && self.s2 == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_section_passes_input() {
        let mut section = Biquad::new(1.0, 0.0, 0.0, 0.0, 0.0);
        for x in [0.5, -2.0, 7.25] {
            assert_eq!(section.process(x), x);
        }
    }

    #[test]
    fn recurrence_matches_hand_computation() {
        let mut section = Biquad::new(0.5, 0.25, 0.125, -0.5, 0.25);

        // n = 0: y = 0.5, s1 = 0.25 + 0.25 = 0.5, s2 = 0.125 - 0.125 = 0.0
        assert_eq!(section.process(1.0), 0.5);
        assert_eq!(section.state(), (0.5, 0.0));

        // n = 1 with zero input: y = s1 = 0.5
        assert_eq!(section.process(0.0), 0.5);
    }

    #[test]
    fn configure_keeps_state() {
        let mut section = Biquad::new(1.0, 1.0, 1.0, 0.0, 0.0);
        section.process(1.0);
        let before = section.state();

        section.configure(2.0, 0.0, 0.0, 0.1, 0.1);
        assert_eq!(section.state(), before);
        assert_eq!(section.coefficients(), [2.0, 0.0, 0.0, 0.1, 0.1]);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut section = Biquad::new(0.3, 0.2, 0.1, -0.4, 0.2);
        section.process(3.0);
        section.process(-1.0);
        assert!(!section.is_at_rest());

        section.reset();
        section.reset();
        assert!(section.is_at_rest());
        assert_eq!(section.coefficients(), [0.3, 0.2, 0.1, -0.4, 0.2]);
    }
}
