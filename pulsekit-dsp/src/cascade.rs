//! Fixed-length cascade of biquad sections
//!
//! Sections run in registration order, each one's output feeding the next.
//! For an LTI chain the order does not change the steady-state frequency
//! response, but it does shape the settling transient: lower-Q sections go
//! first so intermediate values stay small.

use crate::{biquad::Biquad, SosRow};

/// Ordered chain of `N` biquad sections
///
/// Length is fixed at compile time. After construction the only mutations are
/// [`reset`](Self::reset) and coefficient reloading through
/// [`configure_from_sos`](Self::configure_from_sos).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BiquadCascade<const N: usize> {
    sections: [Biquad; N],
}

impl<const N: usize> BiquadCascade<N> {
    /// Cascade from already configured sections
    pub const fn new(sections: [Biquad; N]) -> Self {
        Self { sections }
    }

    /// Cascade from an SOS table, one row per section, states zeroed
    pub fn from_sos(sos: &[SosRow; N]) -> Self {
        let mut cascade = Self::new([Biquad::default(); N]);
        cascade.configure_from_sos(sos);
        cascade
    }

    /// Reload every section's coefficients and zero its state
    pub fn configure_from_sos(&mut self, sos: &[SosRow; N]) {
        for (section, row) in self.sections.iter_mut().zip(sos.iter()) {
            section.configure(row[0], row[1], row[2], row[3], row[4]);
            section.reset();
        }
    }

    /// Zero the delay state of every section
    pub fn reset(&mut self) {
        for section in self.sections.iter_mut() {
            section.reset();
        }
    }

    /// Run one sample through the whole chain
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        self.sections
            .iter_mut()
            .fold(x, |sample, section| section.process(sample))
    }

    /// Filter a block of samples
    ///
    /// Each input sample passes through the full chain before the next one is
    /// read. Processes `min(input.len(), output.len())` samples; empty slices
    /// are a no-op.
    pub fn process_buffer(&mut self, input: &[f32], output: &mut [f32]) {
        for (x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.process(*x);
        }
    }

    /// Filter a block in place
    pub fn process_in_place(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Sections in execution order
    pub fn sections(&self) -> &[Biquad; N] {
        &self.sections
    }

    /// Number of sections
    pub const fn len(&self) -> usize {
        N
    }

    /// True for a zero-section (pass-through) cascade
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// True when every section's delay state is zero
    pub fn is_at_rest(&self) -> bool {
        self.sections.iter().all(Biquad::is_at_rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAINS: [SosRow; 2] = [
        [2.0, 0.0, 0.0, 0.0, 0.0],
        [0.5, 0.0, 0.0, 0.0, 0.0],
    ];

    #[test]
    fn sections_run_in_order() {
        let mut cascade = BiquadCascade::from_sos(&[
            [1.0, 1.0, 0.0, 0.0, 0.0], // y = x[n] + x[n-1]
            [3.0, 0.0, 0.0, 0.0, 0.0], // y = 3x
        ]);
        assert_eq!(cascade.process(1.0), 3.0);
        assert_eq!(cascade.process(1.0), 6.0);
    }

    #[test]
    fn buffer_matches_per_sample_processing() {
        let input = [1.0, -1.0, 0.5, 4.0, 0.0];
        let mut per_sample = BiquadCascade::from_sos(&[
            [0.2, 0.3, 0.1, -0.3, 0.1],
            [0.5, 0.1, 0.0, 0.2, 0.0],
        ]);
        let mut block = per_sample.clone();

        let expected: Vec<f32> = input.iter().map(|x| per_sample.process(*x)).collect();
        let mut output = [0.0; 5];
        block.process_buffer(&input, &mut output);

        assert_eq!(output.to_vec(), expected);
    }

    #[test]
    fn mismatched_buffers_use_shorter_length() {
        let mut cascade = BiquadCascade::from_sos(&GAINS);
        let mut output = [9.0; 2];
        cascade.process_buffer(&[1.0, 2.0, 3.0], &mut output);
        assert_eq!(output, [1.0, 2.0]);

        let mut long_output = [9.0; 4];
        cascade.process_buffer(&[4.0], &mut long_output);
        assert_eq!(long_output, [4.0, 9.0, 9.0, 9.0]);
    }

    #[test]
    fn empty_buffers_are_noop() {
        let mut cascade = BiquadCascade::from_sos(&[[0.5, 0.5, 0.0, 0.0, 0.0]]);
        cascade.process_buffer(&[], &mut []);
        assert!(cascade.is_at_rest());
    }

    #[test]
    fn in_place_matches_buffer() {
        let sos = [[0.2, 0.3, 0.1, -0.3, 0.1]];
        let mut a = BiquadCascade::from_sos(&sos);
        let mut b = BiquadCascade::from_sos(&sos);

        let input = [1.0, 2.0, -3.0];
        let mut out = [0.0; 3];
        a.process_buffer(&input, &mut out);

        let mut samples = input;
        b.process_in_place(&mut samples);
        assert_eq!(samples, out);
    }

    #[test]
    fn reload_zeroes_state() {
        let mut cascade = BiquadCascade::from_sos(&[[0.5, 0.5, 0.5, 0.0, 0.0]]);
        cascade.process(1.0);
        assert!(!cascade.is_at_rest());

        cascade.configure_from_sos(&[[1.0, 0.0, 0.0, 0.0, 0.0]]);
        assert!(cascade.is_at_rest());
        assert_eq!(cascade.process(2.0), 2.0);
    }
}
