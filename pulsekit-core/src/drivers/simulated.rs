//! Simulated transports for host builds
//!
//! [`SimulatedPpg`] synthesises a PPG waveform at 100 Hz: a DC level from
//! tissue absorption plus a pulsatile sine at the configured heart rate.
//! [`SimulatedImu`] reports a device at rest. Both are steered at runtime
//! through [`SimulationControls`], which tests and examples use to take the
//! finger off the sensor, inject bus faults or stall the FIFO.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use crate::constants::sensors::PPG_DEFAULT_SAMPLE_RATE_HZ;
use crate::drivers::motion::{MotionSensor, SharedBus, ACCEL_SENSOR_NAME, GYRO_SENSOR_NAME};
use crate::drivers::ppg::{PpgSensor, PPG_SENSOR_NAME};
use crate::registry::SensorEntry;
use crate::sensor::{BusError, MotionAxis, MotionBus, PpgBus, SensorKind};
use crate::time::{Delay, TimeSource};

/// Raw DC level with a finger on the sensor
pub const SIM_PPG_DC_LEVEL: f32 = 100_000.0;

/// Amplitude of the pulsatile component
pub const SIM_PPG_PULSE_AMPLITUDE: f32 = 1_500.0;

/// Raw level with nothing on the sensor (ambient light only)
pub const SIM_PPG_NO_CONTACT_LEVEL: u32 = 3_000;

/// 1 g on a ±2 g accelerometer range
const SIM_ACCEL_ONE_G: i32 = 16_384;

#[derive(Debug)]
struct ControlState {
    bpm_bits: AtomicU32,
    contact: AtomicBool,
    fault: AtomicBool,
    stalled: AtomicBool,
    present: AtomicBool,
}

/// Runtime knobs shared by the simulated devices
#[derive(Debug, Clone)]
pub struct SimulationControls {
    state: Arc<ControlState>,
}

impl SimulationControls {
    /// Finger on the sensor, healthy bus, pulse at `bpm`
    pub fn new(bpm: f32) -> Self {
        Self {
            state: Arc::new(ControlState {
                bpm_bits: AtomicU32::new(bpm.to_bits()),
                contact: AtomicBool::new(true),
                fault: AtomicBool::new(false),
                stalled: AtomicBool::new(false),
                present: AtomicBool::new(true),
            }),
        }
    }

    /// Change the simulated pulse rate
    pub fn set_bpm(&self, bpm: f32) {
        self.state.bpm_bits.store(bpm.to_bits(), Ordering::Relaxed);
    }

    /// Current simulated pulse rate
    pub fn bpm(&self) -> f32 {
        f32::from_bits(self.state.bpm_bits.load(Ordering::Relaxed))
    }

    /// Put the finger on (true) or take it off (false)
    pub fn set_contact(&self, contact: bool) {
        self.state.contact.store(contact, Ordering::Relaxed);
    }

    /// Make every transfer fail
    pub fn set_fault(&self, fault: bool) {
        self.state.fault.store(fault, Ordering::Relaxed);
    }

    /// Leave the FIFO empty so reads time out
    pub fn set_stalled(&self, stalled: bool) {
        self.state.stalled.store(stalled, Ordering::Relaxed);
    }

    /// Make the devices answer (or not) when probed
    pub fn set_present(&self, present: bool) {
        self.state.present.store(present, Ordering::Relaxed);
    }

    fn flag(flag: &AtomicBool) -> bool {
        flag.load(Ordering::Relaxed)
    }
}

impl Default for SimulationControls {
    fn default() -> Self {
        Self::new(72.0)
    }
}

/// Synthetic PPG front end
#[derive(Debug)]
pub struct SimulatedPpg {
    controls: SimulationControls,
    sample_rate_hz: u32,
    /// Fraction of the current beat, in [0, 1)
    phase: f32,
}

impl SimulatedPpg {
    /// Bus driven by `controls`, waveform phase at zero
    pub fn new(controls: SimulationControls) -> Self {
        Self {
            controls,
            sample_rate_hz: PPG_DEFAULT_SAMPLE_RATE_HZ,
            phase: 0.0,
        }
    }

    fn next_sample(&mut self) -> u32 {
        let beat_hz = self.controls.bpm() / 60.0;
        let pulse = libm::sinf(2.0 * core::f32::consts::PI * self.phase);

        self.phase += beat_hz / self.sample_rate_hz as f32;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        (SIM_PPG_DC_LEVEL + SIM_PPG_PULSE_AMPLITUDE * pulse) as u32
    }
}

impl PpgBus for SimulatedPpg {
    fn probe(&mut self) -> Result<(), BusError> {
        if SimulationControls::flag(&self.controls.state.present) {
            Ok(())
        } else {
            Err(BusError::NotReady)
        }
    }

    fn set_sample_rate(&mut self, hz: u32) -> Result<(), BusError> {
        if hz == 0 {
            return Err(BusError::Transfer);
        }
        self.sample_rate_hz = hz;
        Ok(())
    }

    fn fetch_red(&mut self) -> nb::Result<u32, BusError> {
        let state = &self.controls.state;
        if SimulationControls::flag(&state.fault) {
            return Err(nb::Error::Other(BusError::Transfer));
        }
        if SimulationControls::flag(&state.stalled) {
            return Err(nb::Error::WouldBlock);
        }
        let contact = SimulationControls::flag(&state.contact);
        // The waveform keeps running while the finger is off
        let sample = self.next_sample();
        if contact {
            Ok(sample)
        } else {
            Ok(SIM_PPG_NO_CONTACT_LEVEL)
        }
    }
}

/// Synthetic IMU lying flat and still
#[derive(Debug)]
pub struct SimulatedImu {
    controls: SimulationControls,
}

impl SimulatedImu {
    /// IMU driven by `controls`
    pub fn new(controls: SimulationControls) -> Self {
        Self { controls }
    }
}

impl MotionBus for SimulatedImu {
    fn probe(&mut self) -> Result<(), BusError> {
        if SimulationControls::flag(&self.controls.state.present) {
            Ok(())
        } else {
            Err(BusError::NotReady)
        }
    }

    fn fetch(&mut self, axis: MotionAxis) -> nb::Result<[i32; 3], BusError> {
        if SimulationControls::flag(&self.controls.state.fault) {
            return Err(nb::Error::Other(BusError::Transfer));
        }
        Ok(match axis {
            MotionAxis::Accel => [0, 0, SIM_ACCEL_ONE_G],
            MotionAxis::Gyro => [0, 0, 0],
        })
    }
}

/// Registry entries for the simulated PPG and IMU
///
/// Heart rate, accelerometer and gyroscope, in that order.
pub fn builtin_sensors<C, D>(clock: C, delay: D, controls: &SimulationControls) -> Vec<SensorEntry>
where
    C: TimeSource + Clone + 'static,
    D: Delay + 'static,
{
    let imu = SharedBus::new(SimulatedImu::new(controls.clone()));
    let ppg = PpgSensor::new(SimulatedPpg::new(controls.clone()), clock.clone(), delay);

    let mut entries = Vec::with_capacity(3);
    entries.push(SensorEntry::new(SensorKind::HeartRate, PPG_SENSOR_NAME, ppg));
    entries.push(SensorEntry::new(
        SensorKind::Accel,
        ACCEL_SENSOR_NAME,
        MotionSensor::accelerometer(imu.clone(), clock.clone()),
    ));
    entries.push(SensorEntry::new(
        SensorKind::Gyro,
        GYRO_SENSOR_NAME,
        MotionSensor::gyroscope(imu, clock),
    ));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_stays_in_excellent_band() {
        let mut ppg = SimulatedPpg::new(SimulationControls::new(72.0));
        for _ in 0..500 {
            let raw = ppg.fetch_red().unwrap();
            assert!((98_000..=101_600).contains(&raw), "raw = {}", raw);
        }
    }

    #[test]
    fn waveform_period_follows_bpm() {
        // 60 BPM at 100 Hz: phase returns to zero every 100 samples
        let mut ppg = SimulatedPpg::new(SimulationControls::new(60.0));
        let first = ppg.fetch_red().unwrap();
        for _ in 0..99 {
            ppg.fetch_red().unwrap();
        }
        let one_period_later = ppg.fetch_red().unwrap();
        assert!(first.abs_diff(one_period_later) < 20);
    }

    #[test]
    fn controls_steer_the_bus() {
        let controls = SimulationControls::default();
        let mut ppg = SimulatedPpg::new(controls.clone());

        controls.set_contact(false);
        assert_eq!(ppg.fetch_red(), Ok(SIM_PPG_NO_CONTACT_LEVEL));

        controls.set_stalled(true);
        assert_eq!(ppg.fetch_red(), Err(nb::Error::WouldBlock));

        controls.set_fault(true);
        assert_eq!(ppg.fetch_red(), Err(nb::Error::Other(BusError::Transfer)));

        controls.set_present(false);
        assert_eq!(ppg.probe(), Err(BusError::NotReady));
    }

    #[test]
    fn imu_at_rest_reads_one_g() {
        let mut imu = SimulatedImu::new(SimulationControls::default());
        assert_eq!(imu.fetch(MotionAxis::Accel), Ok([0, 0, SIM_ACCEL_ONE_G]));
        assert_eq!(imu.fetch(MotionAxis::Gyro), Ok([0, 0, 0]));
    }
}
