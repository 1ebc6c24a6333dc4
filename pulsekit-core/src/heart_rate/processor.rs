//! One step of the heart-rate task
//!
//! [`HeartRateProcessor::tick`] reads one PPG sample, conditions it with the
//! bandpass cascade, feeds the beat detector and updates the published state.
//! The threaded [`HeartRateMonitor`](super::HeartRateMonitor) calls it every
//! period; an RTOS task or a test can call it directly.
//!
//! ## State machine
//!
//! ```text
//!            start
//!   Idle ────────────▶ Running ◀──────────────┐
//!                        │   recovery_samples  │
//!                        │   usable in a row   │
//!   no_contact_samples   ▼                     │
//!   unusable in a row  NoContact ──────────────┘
//!
//!   Running / NoContact ── persistent error or failure budget ──▶ Error
//! ```
//!
//! `Error` is left only by stopping and starting again.
//!
//! ## Read failures
//!
//! | error                              | effect                               |
//! |------------------------------------|--------------------------------------|
//! | `NoData`                           | counts as an unusable sample         |
//! | `HardwareFailure`, `Timeout`, `Busy` | spends one unit of the failure budget|
//! | `NotInitialized`, `InvalidParameter`, `Unsupported` | `Error` at once |
//!
//! `Busy` is also what a tick sees when another caller holds the driver, e.g.
//! during calibration; the tick returns at once instead of waiting.

use std::sync::Arc;

use pulsekit_dsp::{heart_rate_bandpass, HeartRateBandpass};

use crate::errors::{SensorError, SensorResult};
use crate::heart_rate::config::HeartRateConfig;
use crate::heart_rate::detector::{BeatDetector, ZeroCrossingDetector};
use crate::heart_rate::state::{HeartRateReader, HeartRateShared, HeartRateState};
use crate::sensor::{SensorHandle, SensorReading};

/// Filter, detector and state machine around one PPG driver
pub struct HeartRateProcessor<D = ZeroCrossingDetector> {
    config: HeartRateConfig,
    sensor: SensorHandle,
    filter: HeartRateBandpass,
    detector: D,
    shared: Arc<HeartRateShared>,
    state: HeartRateState,
    /// Raw level subtracted before filtering, taken from the first usable
    /// sample after a reset
    offset: Option<f32>,
    /// Last usable input, repeated in place of unusable samples
    held: f32,
    unusable_run: u32,
    usable_run: u32,
    failures: u32,
}

impl HeartRateProcessor<ZeroCrossingDetector> {
    /// Processor with the zero-crossing detector; `config` is validated
    pub fn new(sensor: SensorHandle, config: HeartRateConfig) -> SensorResult<Self> {
        let detector = ZeroCrossingDetector::new(&config);
        Self::with_detector(sensor, config, detector)
    }
}

impl<D: BeatDetector> HeartRateProcessor<D> {
    /// Processor with a custom beat detector
    pub fn with_detector(sensor: SensorHandle, config: HeartRateConfig, detector: D) -> SensorResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sensor,
            filter: heart_rate_bandpass(),
            detector,
            shared: Arc::new(HeartRateShared::new()),
            state: HeartRateState::Idle,
            offset: None,
            held: 0.0,
            unusable_run: 0,
            usable_run: 0,
            failures: 0,
        })
    }

    /// Publish into an existing shared cell instead of a private one
    pub fn with_shared(mut self, shared: Arc<HeartRateShared>) -> Self {
        self.shared = shared;
        self
    }

    /// Non-blocking view of this processor's outputs
    pub fn reader(&self) -> HeartRateReader {
        HeartRateReader::new(Arc::clone(&self.shared))
    }

    /// Current processing state
    pub fn state(&self) -> HeartRateState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &HeartRateConfig {
        &self.config
    }

    /// Begin a session: clear filter, detector and counters, enter `Running`
    pub fn start(&mut self) {
        self.clear_signal_path();
        self.unusable_run = 0;
        self.usable_run = 0;
        self.failures = 0;
        self.shared.publish_bpm(None);
        self.transition(HeartRateState::Running);
    }

    /// End the session and return to `Idle`
    pub fn stop(&mut self) {
        self.shared.publish_bpm(None);
        self.transition(HeartRateState::Idle);
    }

    /// Run one period
    ///
    /// Does nothing while `Idle` or `Error`. Returns the state after the step.
    pub fn tick(&mut self) -> HeartRateState {
        if !self.state.is_active() {
            return self.state;
        }

        // Never wait on the driver lock: contention is a transient failure
        match self.sensor.try_with(|sensor| sensor.read()).and_then(|read| read) {
            Ok(reading) => {
                self.failures = 0;
                self.on_reading(&reading);
            }
            Err(SensorError::NoData) => {
                self.failures = 0;
                self.on_unusable();
            }
            Err(err) if err.is_transient() => {
                self.failures += 1;
                log_debug!(
                    "HR read failed ({}/{}): {}",
                    self.failures,
                    self.config.max_consecutive_failures,
                    err
                );
                if self.failures >= self.config.max_consecutive_failures {
                    log_error!("HR sensor failing repeatedly, last error: {}", err);
                    self.enter_error();
                }
            }
            Err(err) => {
                log_error!("HR sensor unusable: {}", err);
                self.enter_error();
            }
        }
        self.state
    }

    fn on_reading(&mut self, reading: &SensorReading) {
        if !reading.is_usable() {
            self.on_unusable();
            return;
        }

        self.unusable_run = 0;
        match self.state {
            HeartRateState::Running => {
                let offset = *self.offset.get_or_insert(reading.value);
                self.held = reading.value - offset;
                self.condition(self.held);
            }
            HeartRateState::NoContact => {
                self.usable_run += 1;
                if self.usable_run >= self.config.recovery_samples {
                    self.usable_run = 0;
                    self.clear_signal_path();
                    self.transition(HeartRateState::Running);
                }
            }
            HeartRateState::Idle | HeartRateState::Error => {}
        }
    }

    fn on_unusable(&mut self) {
        self.usable_run = 0;
        if self.state != HeartRateState::Running {
            return;
        }

        self.unusable_run += 1;
        if self.unusable_run >= self.config.no_contact_samples {
            self.unusable_run = 0;
            self.shared.publish_bpm(None);
            self.clear_signal_path();
            self.transition(HeartRateState::NoContact);
        } else {
            // Keep the detector's sample clock running across short dropouts
            self.condition(self.held);
        }
    }

    fn condition(&mut self, input: f32) {
        let filtered = self.filter.process(input);
        self.shared.publish_bpm(self.detector.push(filtered));
    }

    fn clear_signal_path(&mut self) {
        self.filter.reset();
        self.detector.reset();
        self.offset = None;
        self.held = 0.0;
    }

    fn enter_error(&mut self) {
        self.shared.publish_bpm(None);
        self.transition(HeartRateState::Error);
    }

    fn transition(&mut self, next: HeartRateState) {
        if self.state != next {
            log_info!("HR state: {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
        self.shared.set_state(next);
    }
}
