//! Shared fixtures for integration tests
//!
//! - `ScriptedPpg`: PPG bus replaying a fixed pattern of samples and faults
//! - `FailingSensor`: driver whose `init` always fails
//! - helpers to build drivers and processors on a manual clock

#![allow(dead_code)]

use std::collections::VecDeque;

use pulsekit_core::drivers::{builtin_sensors, PpgSensor, SimulationControls};
use pulsekit_core::sensor::{BusError, PpgBus};
use pulsekit_core::time::ManualClock;
use pulsekit_core::{
    Capabilities, DeviceStatus, HeartRateConfig, HeartRateProcessor, HeartRateState, Sensor,
    SensorEntry, SensorError, SensorKind, SensorReading, SensorRegistry, SensorResult,
    SensorStats,
};

/// Raw value graded Excellent by the PPG driver
pub const GOOD_RAW: u32 = 100_000;

/// One scripted transport outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Sample(u32),
    Fault,
    Empty,
}

/// PPG bus replaying a script; once exhausted it reports an empty FIFO
#[derive(Debug, Default)]
pub struct ScriptedPpg {
    steps: VecDeque<Step>,
}

impl ScriptedPpg {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self { steps: steps.into_iter().collect() }
    }

    /// `true` yields a good sample, `false` a transfer fault
    pub fn from_pattern(pattern: &[bool]) -> Self {
        Self::new(
            pattern
                .iter()
                .map(|ok| if *ok { Step::Sample(GOOD_RAW) } else { Step::Fault }),
        )
    }
}

impl PpgBus for ScriptedPpg {
    fn probe(&mut self) -> Result<(), BusError> {
        Ok(())
    }

    fn set_sample_rate(&mut self, _hz: u32) -> Result<(), BusError> {
        Ok(())
    }

    fn fetch_red(&mut self) -> nb::Result<u32, BusError> {
        match self.steps.pop_front().unwrap_or(Step::Empty) {
            Step::Sample(raw) => Ok(raw),
            Step::Fault => Err(nb::Error::Other(BusError::Transfer)),
            Step::Empty => Err(nb::Error::WouldBlock),
        }
    }
}

/// PPG driver on a scripted bus and a frozen manual clock
pub fn scripted_ppg(bus: ScriptedPpg) -> PpgSensor<ScriptedPpg, ManualClock, ManualClock> {
    let clock = ManualClock::new(0);
    PpgSensor::new(bus, clock.clone(), clock)
}

/// Driver that never comes up
#[derive(Debug, Default)]
pub struct FailingSensor {
    stats: SensorStats,
}

impl Sensor for FailingSensor {
    fn init(&mut self) -> SensorResult<()> {
        Err(SensorError::HardwareFailure)
    }

    fn read(&mut self) -> SensorResult<SensorReading> {
        self.stats.record_error();
        Err(SensorError::NotInitialized)
    }

    fn status(&self) -> DeviceStatus {
        DeviceStatus::Error
    }

    fn stats(&self) -> SensorStats {
        self.stats
    }

    fn reset_stats(&mut self) {
        self.stats = SensorStats::default();
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::init_only()
    }
}

/// Registry initialised with the simulated PPG and IMU
pub fn simulated_registry(controls: &SimulationControls) -> SensorRegistry {
    let clock = ManualClock::new(0);
    let mut registry = SensorRegistry::new();
    registry
        .system_init(builtin_sensors(clock.clone(), clock, controls))
        .expect("simulated sensors initialise");
    registry
}

/// Started processor on the simulated PPG
pub fn simulated_processor(controls: &SimulationControls) -> HeartRateProcessor {
    let registry = simulated_registry(controls);
    let handle = registry
        .get(SensorKind::HeartRate)
        .expect("heart-rate sensor registered")
        .handle()
        .clone();
    let mut processor =
        HeartRateProcessor::new(handle, HeartRateConfig::default()).expect("default config");
    processor.start();
    processor
}

/// Tick `n` times, returning the last state
pub fn tick_n(processor: &mut HeartRateProcessor, n: usize) -> HeartRateState {
    let mut state = processor.state();
    for _ in 0..n {
        state = processor.tick();
    }
    state
}

/// Entry for a driver under `kind`
pub fn entry<S: Sensor + 'static>(kind: SensorKind, name: &'static str, sensor: S) -> SensorEntry {
    SensorEntry::new(kind, name, sensor)
}
