//! Beat detection on the conditioned PPG signal
//!
//! The bandpass removes the DC level, so the filtered waveform swings around
//! zero once per beat. [`ZeroCrossingDetector`] takes every rising zero
//! crossing as a beat:
//!
//! ```text
//!        ╭─╮        ╭─╮        ╭─╮
//!   ────╱───╲──────╱───╲──────╱───╲──── 0
//!      ↑     ╰─╯  ↑     ╰─╯  ↑
//!      beat       beat       beat
//!      |<-- interval -->|
//! ```
//!
//! - Crossings inside the refractory interval are noise and ignored
//! - A gap longer than the maximum interval restarts the history
//! - The rate is 60 000 / mean of the last intervals, reported once
//!   `min_beats` intervals are known
//!
//! Time is counted in samples, so the detector needs no clock.

use crate::buffer::CircularBuffer;
use crate::constants::buffers::BEAT_HISTORY_SIZE;
use crate::constants::time::MS_PER_MINUTE;
use crate::heart_rate::config::HeartRateConfig;

/// Turns conditioned samples into a beat rate
pub trait BeatDetector: Send {
    /// Feed one filtered sample; returns the current rate once known
    fn push(&mut self, sample: f32) -> Option<f32>;

    /// Forget all beats
    fn reset(&mut self);

    /// Number of beat intervals currently averaged
    fn beats(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Above,
    Below,
}

/// Rising-zero-crossing beat detector
#[derive(Debug, Clone)]
pub struct ZeroCrossingDetector {
    sample_period_ms: u32,
    refractory_ms: u32,
    max_interval_ms: u32,
    min_beats: usize,
    region: Region,
    /// Time since the last accepted beat, `None` before the first one
    since_beat_ms: Option<u32>,
    intervals: CircularBuffer<u32, BEAT_HISTORY_SIZE>,
}

impl ZeroCrossingDetector {
    /// Detector using the timing limits of `config`
    pub fn new(config: &HeartRateConfig) -> Self {
        Self {
            sample_period_ms: config.period_ms,
            refractory_ms: config.refractory_ms,
            max_interval_ms: config.max_beat_interval_ms,
            min_beats: config.min_beats,
            region: Region::Below,
            since_beat_ms: None,
            intervals: CircularBuffer::new(),
        }
    }

    /// Current rate, `None` until `min_beats` intervals are known
    pub fn bpm(&self) -> Option<f32> {
        if self.intervals.len() < self.min_beats.max(1) {
            return None;
        }
        let total: u32 = self.intervals.iter().sum();
        let mean = total as f32 / self.intervals.len() as f32;
        Some(MS_PER_MINUTE as f32 / mean)
    }

    fn on_rising_edge(&mut self) {
        match self.since_beat_ms {
            None => self.since_beat_ms = Some(0),
            Some(elapsed) if elapsed < self.refractory_ms => {}
            Some(elapsed) if elapsed > self.max_interval_ms => {
                self.intervals.clear();
                self.since_beat_ms = Some(0);
            }
            Some(elapsed) => {
                self.intervals.push(elapsed);
                self.since_beat_ms = Some(0);
            }
        }
    }
}

impl Default for ZeroCrossingDetector {
    fn default() -> Self {
        Self::new(&HeartRateConfig::default())
    }
}

impl BeatDetector for ZeroCrossingDetector {
    fn push(&mut self, sample: f32) -> Option<f32> {
        if let Some(elapsed) = self.since_beat_ms.as_mut() {
            *elapsed = elapsed.saturating_add(self.sample_period_ms);
            // No beat for too long: the old intervals no longer describe the signal
            if *elapsed > self.max_interval_ms && !self.intervals.is_empty() {
                self.intervals.clear();
            }
        }

        let above = sample > 0.0;
        if above && self.region == Region::Below {
            self.on_rising_edge();
        }
        self.region = if above { Region::Above } else { Region::Below };

        self.bpm()
    }

    fn reset(&mut self) {
        self.region = Region::Below;
        self.since_beat_ms = None;
        self.intervals.clear();
    }

    fn beats(&self) -> usize {
        self.intervals.len()
    }
}
