//! Frequency-response checks for the heart-rate bandpass
//!
//! Runs synthetic signals through the reference cascade at its design sample
//! rate and compares RMS levels after the settling transient.

use core::f32::consts::PI;

use proptest::prelude::*;
use pulsekit_dsp::{
    bandpass::{heart_rate_bandpass, HR_FILTER_SAMPLE_RATE_HZ},
    BiquadCascade, HR_BANDPASS_SOS,
};

const FS: f32 = HR_FILTER_SAMPLE_RATE_HZ as f32;

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let acc: f64 = samples.iter().map(|s| (*s as f64) * (*s as f64)).sum();
    libm::sqrt(acc / samples.len() as f64) as f32
}

fn sine(freq_hz: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| libm::sinf(2.0 * PI * freq_hz * i as f32 / FS))
        .collect()
}

fn filtered(input: &[f32]) -> Vec<f32> {
    let mut filter = heart_rate_bandpass();
    let mut output = vec![0.0; input.len()];
    filter.process_buffer(input, &mut output);
    output
}

#[test]
fn step_input_is_rejected() {
    let len = 3000;
    let output = filtered(&vec![1.0; len]);

    // Skip the first 20% as settling transient
    let tail = rms(&output[len / 5..]);
    assert!(tail < 0.05, "DC tail RMS too high: {}", tail);
}

#[test]
fn short_step_input_is_rejected() {
    let len = 2000;
    let output = filtered(&vec![1.0; len]);
    let tail = rms(&output[len / 5..]);
    assert!(tail < 0.05, "DC tail RMS too high: {}", tail);
}

#[test]
fn one_hertz_passes_near_unity() {
    let input = sine(1.0, 2000);
    let output = filtered(&input);

    let gain = rms(&output[500..]) / (rms(&input[500..]) + 1e-12);
    assert!(gain > 0.7 && gain < 1.1, "1 Hz gain out of range: {}", gain);
}

#[test]
fn heart_rate_band_passes() {
    // 48, 90 and 150 BPM
    for freq in [0.8, 1.5, 2.5] {
        let input = sine(freq, 2000);
        let output = filtered(&input);
        let gain = rms(&output[500..]) / rms(&input[500..]);
        assert!(gain > 0.7 && gain < 1.1, "{} Hz gain out of range: {}", freq, gain);
    }
}

#[test]
fn ten_hertz_is_attenuated() {
    let pass = filtered(&sine(1.0, 2000));
    let stop = filtered(&sine(10.0, 2000));

    let relative = rms(&stop[500..]) / (rms(&pass[500..]) + 1e-12);
    assert!(relative <= 0.5, "10 Hz attenuation too small: {}", relative);
}

#[test]
fn filter_output_stays_bounded_for_ppg_levels() {
    // Raw PPG intensity sits around 1e5 counts with a small pulsatile part
    let input: Vec<f32> = sine(1.2, 3000)
        .into_iter()
        .map(|s| 100_000.0 + 1_500.0 * s)
        .collect();
    let output = filtered(&input);

    assert!(output.iter().all(|s| s.is_finite()));
    let tail = rms(&output[2000..]);
    assert!(tail > 500.0 && tail < 2_000.0, "pulse RMS after filtering: {}", tail);
}

proptest! {
    #[test]
    fn reset_then_zero_input_gives_zero_output(
        history in proptest::collection::vec(-1.0e5f32..1.0e5, 0..256),
        zeros in 1usize..512,
    ) {
        let mut filter = heart_rate_bandpass();
        for x in &history {
            filter.process(*x);
        }

        filter.reset();
        prop_assert!(filter.is_at_rest());

        let input = vec![0.0; zeros];
        let mut output = vec![1.0; zeros];
        filter.process_buffer(&input, &mut output);
        prop_assert!(output.iter().all(|y| *y == 0.0));
    }

    #[test]
    fn reset_restores_fresh_behaviour(
        history in proptest::collection::vec(-10.0f32..10.0, 1..64),
        probe in proptest::collection::vec(-10.0f32..10.0, 1..64),
    ) {
        let mut used = BiquadCascade::from_sos(&HR_BANDPASS_SOS);
        for x in &history {
            used.process(*x);
        }
        used.reset();

        let mut fresh = heart_rate_bandpass();
        for x in &probe {
            prop_assert_eq!(used.process(*x), fresh.process(*x));
        }
    }
}
