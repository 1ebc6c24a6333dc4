//! Heart-rate task configuration

use crate::constants::buffers::BEAT_HISTORY_SIZE;
use crate::constants::time::{
    HR_TASK_PERIOD_MS, MAX_BEAT_INTERVAL_MS, MAX_CONSECUTIVE_FAILURES, MIN_BEATS,
    NO_CONTACT_SAMPLES, RECOVERY_SAMPLES, REFRACTORY_MS,
};
use crate::errors::{SensorError, SensorResult};

/// Tuning of the periodic heart-rate task
///
/// Counts are in samples, i.e. task periods.
///
/// ```rust
/// use pulsekit_core::HeartRateConfig;
///
/// let config = HeartRateConfig::default()
///     .with_no_contact_samples(100)
///     .with_min_beats(6);
///
/// assert_eq!(config.period_ms, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeartRateConfig {
    /// Task period and sample spacing (ms)
    pub period_ms: u32,
    /// Consecutive unusable samples before `NoContact`
    pub no_contact_samples: u32,
    /// Consecutive usable samples before leaving `NoContact`
    pub recovery_samples: u32,
    /// Consecutive transient read failures before `Error`
    pub max_consecutive_failures: u32,
    /// Beat intervals required before a rate is valid
    pub min_beats: usize,
    /// Shortest accepted beat interval (ms)
    pub refractory_ms: u32,
    /// Longest accepted beat interval (ms)
    pub max_beat_interval_ms: u32,
}

impl Default for HeartRateConfig {
    fn default() -> Self {
        Self {
            period_ms: HR_TASK_PERIOD_MS,
            no_contact_samples: NO_CONTACT_SAMPLES,
            recovery_samples: RECOVERY_SAMPLES,
            max_consecutive_failures: MAX_CONSECUTIVE_FAILURES,
            min_beats: MIN_BEATS,
            refractory_ms: REFRACTORY_MS,
            max_beat_interval_ms: MAX_BEAT_INTERVAL_MS,
        }
    }
}

impl HeartRateConfig {
    /// Set the task period (ms)
    pub fn with_period(mut self, period_ms: u32) -> Self {
        self.period_ms = period_ms;
        self
    }

    /// Set the unusable run that enters `NoContact`
    pub fn with_no_contact_samples(mut self, samples: u32) -> Self {
        self.no_contact_samples = samples;
        self
    }

    /// Set the usable run that leaves `NoContact`
    pub fn with_recovery_samples(mut self, samples: u32) -> Self {
        self.recovery_samples = samples;
        self
    }

    /// Set the transient failure budget
    pub fn with_max_consecutive_failures(mut self, failures: u32) -> Self {
        self.max_consecutive_failures = failures;
        self
    }

    /// Set the intervals required for a valid rate
    pub fn with_min_beats(mut self, beats: usize) -> Self {
        self.min_beats = beats;
        self
    }

    /// Set the shortest and longest accepted beat intervals (ms)
    pub fn with_beat_window(mut self, refractory_ms: u32, max_interval_ms: u32) -> Self {
        self.refractory_ms = refractory_ms;
        self.max_beat_interval_ms = max_interval_ms;
        self
    }

    /// Check the values can drive the task
    ///
    /// Every count must be non-zero, `min_beats` must fit the interval
    /// history and the refractory interval must be shorter than the longest
    /// beat interval.
    pub fn validate(&self) -> SensorResult<()> {
        let counts_ok = self.period_ms > 0
            && self.no_contact_samples > 0
            && self.recovery_samples > 0
            && self.max_consecutive_failures > 0;
        let beats_ok = (1..=BEAT_HISTORY_SIZE).contains(&self.min_beats);
        let window_ok = self.refractory_ms < self.max_beat_interval_ms;

        if counts_ok && beats_ok && window_ok {
            Ok(())
        } else {
            Err(SensorError::InvalidParameter)
        }
    }
}
