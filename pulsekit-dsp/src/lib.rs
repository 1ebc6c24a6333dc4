//! Cascaded Biquad Filters for PPG Signal Conditioning
//!
//! ## Overview
//!
//! This crate provides the numeric half of PulseKit: second-order IIR sections
//! and fixed-length cascades of them. It is written for microcontrollers first:
//! no allocation, no I/O, no runtime filter design. Coefficients are computed
//! offline and loaded as constants.
//!
//! ## Why Direct-Form-II-Transposed?
//!
//! Each section keeps exactly two delay states instead of two input and two
//! output samples. Round-off growth stays bounded when sections are chained,
//! and the memory cost of a section is seven `f32` values.
//!
//! ```text
//! x ──┬──[b0]──(+)──────────┬──> y
//!     │         ↑ s1        │
//!     ├──[b1]──(+)──[-a1]───┤
//!     │         ↑ s2        │
//!     └──[b2]──(+)──[-a2]───┘
//! ```
//!
//! ## Heart-Rate Bandpass
//!
//! [`bandpass::heart_rate_bandpass`] builds the reference three-section
//! cascade: two highpass stages forming the low edge and one lowpass stage
//! forming the high edge, at a 100 Hz sample rate.
//!
//! ```rust
//! use pulsekit_dsp::bandpass::heart_rate_bandpass;
//!
//! let mut filter = heart_rate_bandpass();
//! let raw = [100_000.0_f32; 16];
//! let mut conditioned = [0.0_f32; 16];
//! filter.process_buffer(&raw, &mut conditioned);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bandpass;
pub mod biquad;
pub mod cascade;

pub use bandpass::{heart_rate_bandpass, HeartRateBandpass, HR_BANDPASS_SOS, HR_FILTER_SECTIONS};
pub use biquad::Biquad;
pub use cascade::BiquadCascade;

/// One row of a second-order-sections table: `[b0, b1, b2, a1, a2]` with `a0 = 1`.
pub type SosRow = [f32; 5];

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
