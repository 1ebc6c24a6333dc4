//! Processing state shared between the worker and its readers
//!
//! The worker is the only writer. Readers poll without locking: every field
//! is its own atomic, so a reader may observe a new state next to the
//! previous rate for one period.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

#[cfg(feature = "std")]
use std::sync::Arc;

/// Coarse state of the heart-rate task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum HeartRateState {
    /// Not started, or stopped
    #[default]
    Idle = 0,
    /// Sampling with skin contact
    Running = 1,
    /// Sampling, but the signal says nothing is on the sensor
    NoContact = 2,
    /// Stopped sampling after an unrecoverable failure
    Error = 3,
}

impl HeartRateState {
    /// Decode a stored discriminant; unknown values read as `Error`
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Running,
            2 => Self::NoContact,
            _ => Self::Error,
        }
    }

    /// Whether the task is sampling
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::NoContact)
    }

    /// Human-readable state name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::NoContact => "no_contact",
            Self::Error => "error",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HeartRateState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

/// Lock-free cell holding the task's published outputs
#[derive(Debug)]
pub struct HeartRateShared {
    state: AtomicU8,
    bpm_bits: AtomicU32,
    valid: AtomicBool,
}

impl HeartRateShared {
    /// Idle, no rate
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(HeartRateState::Idle as u8),
            bpm_bits: AtomicU32::new(0),
            valid: AtomicBool::new(false),
        }
    }

    /// Current state
    pub fn state(&self) -> HeartRateState {
        HeartRateState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Publish a new state
    pub fn set_state(&self, state: HeartRateState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Latest rate and whether it is valid
    pub fn bpm(&self) -> (f32, bool) {
        let valid = self.valid.load(Ordering::Acquire);
        let bpm = f32::from_bits(self.bpm_bits.load(Ordering::Relaxed));
        (bpm, valid)
    }

    /// Publish a rate, or invalidate it with `None`
    ///
    /// An invalidated rate keeps its last value so diagnostics can still
    /// show it.
    pub fn publish_bpm(&self, bpm: Option<f32>) {
        match bpm {
            Some(bpm) => {
                self.bpm_bits.store(bpm.to_bits(), Ordering::Relaxed);
                self.valid.store(true, Ordering::Release);
            }
            None => self.valid.store(false, Ordering::Release),
        }
    }
}

impl Default for HeartRateShared {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy of what the service layer publishes
///
/// `heart_rate` is the rate rounded to whole BPM and clamped to a byte, or 0
/// while the rate is invalid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VitalsSnapshot {
    /// Rounded rate, 0 when not valid
    pub heart_rate: u8,
    /// Processing state at the time of the snapshot
    pub state: HeartRateState,
}

impl VitalsSnapshot {
    /// Snapshot from a rate, its validity and the state
    pub fn new(bpm: f32, valid: bool, state: HeartRateState) -> Self {
        let heart_rate = if valid && bpm.is_finite() {
            libm::roundf(bpm).clamp(0.0, 255.0) as u8
        } else {
            0
        };
        Self { heart_rate, state }
    }
}

/// Cloneable, non-blocking view of a running task
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct HeartRateReader {
    shared: Arc<HeartRateShared>,
}

#[cfg(feature = "std")]
impl HeartRateReader {
    /// Reader over `shared`
    pub fn new(shared: Arc<HeartRateShared>) -> Self {
        Self { shared }
    }

    /// Latest rate and whether it is valid
    pub fn bpm(&self) -> (f32, bool) {
        self.shared.bpm()
    }

    /// Current state
    pub fn state(&self) -> HeartRateState {
        self.shared.state()
    }

    /// Rate byte and state in one copyable value
    pub fn snapshot(&self) -> VitalsSnapshot {
        let (bpm, valid) = self.bpm();
        VitalsSnapshot::new(bpm, valid, self.state())
    }
}
