//! Time-Related Constants
//!
//! Cadence of the heart-rate task and the physiological limits used by the
//! beat detector.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u32 = 60 * MS_PER_SECOND;

// ===== TASK CADENCE =====

/// Period of the heart-rate task (ms), i.e. one PPG sample at 100 Hz.
pub const HR_TASK_PERIOD_MS: u32 = 10;

/// Consecutive unusable samples before reporting no contact (0.5 s).
pub const NO_CONTACT_SAMPLES: u32 = 50;

/// Consecutive usable samples before leaving no contact (0.2 s).
pub const RECOVERY_SAMPLES: u32 = 20;

/// Consecutive transient read failures tolerated before the task errors out.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 25;

// ===== BEAT TIMING =====

/// Accepted intervals required before a rate is reported.
pub const MIN_BEATS: usize = 4;

/// Shortest accepted beat-to-beat interval (ms), 220 BPM.
pub const REFRACTORY_MS: u32 = 273;

/// Longest beat-to-beat interval (ms), 30 BPM. A longer gap restarts
/// the interval history.
pub const MAX_BEAT_INTERVAL_MS: u32 = 2000;
