//! 6-axis IMU driver
//!
//! One physical IMU backs two logical sensors, the accelerometer and the
//! gyroscope. Each [`MotionSensor`] selects its axis set and keeps its own
//! statistics; both share the device through a [`SharedBus`].
//!
//! Readings carry raw x/y/z counts and their vector magnitude as `value`.
//! There is no intrinsic confidence metric, so every successful read is
//! graded Fair.

use std::sync::{Arc, Mutex};

use crate::constants::quality::QUALITY_FAIR;
use crate::constants::sensors::{DEFAULT_READ_TIMEOUT_MS, MAX_READ_POLLS};
use crate::errors::{SensorError, SensorResult};
use crate::sensor::{
    poll_with_timeout, BusError, Capabilities, DeviceStatus, MotionAxis, MotionBus, Sensor,
    SensorReading, SensorStats,
};
use crate::time::TimeSource;

/// Registry name of the accelerometer
pub const ACCEL_SENSOR_NAME: &str = "MPU6050 Accelerometer";
/// Registry name of the gyroscope
pub const GYRO_SENSOR_NAME: &str = "MPU6050 Gyroscope";

/// IMU transport shared between the accelerometer and gyroscope drivers
pub struct SharedBus<B> {
    inner: Arc<Mutex<B>>,
}

impl<B> SharedBus<B> {
    /// Wrap `bus` for sharing between drivers
    pub fn new(bus: B) -> Self {
        Self { inner: Arc::new(Mutex::new(bus)) }
    }
}

impl<B> Clone for SharedBus<B> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<B: MotionBus> MotionBus for SharedBus<B> {
    fn probe(&mut self) -> Result<(), BusError> {
        self.inner.lock().map_err(|_| BusError::NotReady)?.probe()
    }

    fn fetch(&mut self, axis: MotionAxis) -> nb::Result<[i32; 3], BusError> {
        self.inner
            .lock()
            .map_err(|_| nb::Error::Other(BusError::NotReady))?
            .fetch(axis)
    }
}

/// Euclidean norm of raw counts
pub fn magnitude([x, y, z]: [i32; 3]) -> f32 {
    let (x, y, z) = (x as f32, y as f32, z as f32);
    libm::sqrtf(x * x + y * y + z * z)
}

/// One axis set of an IMU
pub struct MotionSensor<B, C> {
    bus: B,
    clock: C,
    axis: MotionAxis,
    stats: SensorStats,
    initialized: bool,
    bus_ready: bool,
    read_timeout_ms: u32,
}

impl<B: MotionBus, C: TimeSource> MotionSensor<B, C> {
    /// Driver reading `axis` from `bus`
    pub fn new(bus: B, clock: C, axis: MotionAxis) -> Self {
        Self {
            bus,
            clock,
            axis,
            stats: SensorStats::default(),
            initialized: false,
            bus_ready: false,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }

    /// Accelerometer half of the IMU
    pub fn accelerometer(bus: B, clock: C) -> Self {
        Self::new(bus, clock, MotionAxis::Accel)
    }

    /// Gyroscope half of the IMU
    pub fn gyroscope(bus: B, clock: C) -> Self {
        Self::new(bus, clock, MotionAxis::Gyro)
    }

    /// Override the bounded read wait (ms)
    pub fn with_read_timeout(mut self, timeout_ms: u32) -> Self {
        self.read_timeout_ms = timeout_ms;
        self
    }

    /// Axis set this driver reads
    pub fn axis(&self) -> MotionAxis {
        self.axis
    }
}

impl<B: MotionBus, C: TimeSource> Sensor for MotionSensor<B, C> {
    fn init(&mut self) -> SensorResult<()> {
        if let Err(err) = self.bus.probe() {
            log_error!("IMU ({:?}) not ready: {:?}", self.axis, err);
            self.bus_ready = false;
            return Err(SensorError::HardwareFailure);
        }
        self.bus_ready = true;
        if !self.initialized {
            self.stats = SensorStats::default();
            self.initialized = true;
            log_info!("IMU adapter initialized ({:?})", self.axis);
        }
        Ok(())
    }

    fn read(&mut self) -> SensorResult<SensorReading> {
        if !self.initialized {
            self.stats.record_error();
            return Err(SensorError::NotInitialized);
        }

        let axis = self.axis;
        let bus = &mut self.bus;
        let xyz = match poll_with_timeout(&self.clock, self.read_timeout_ms, MAX_READ_POLLS, || {
            bus.fetch(axis)
        }) {
            Ok(xyz) => xyz,
            Err(err) => {
                self.bus_ready = err != SensorError::HardwareFailure;
                self.stats.record_error();
                return Err(err);
            }
        };
        self.bus_ready = true;

        let [x, y, z] = xyz;
        let reading = SensorReading {
            timestamp: self.clock.now(),
            value: magnitude(xyz),
            raw_value: x as u32,
            x: x as f32,
            y: y as f32,
            z: z as f32,
            quality: QUALITY_FAIR,
        };
        self.stats.record(reading.quality, true, reading.timestamp);
        Ok(reading)
    }

    fn status(&self) -> DeviceStatus {
        match (self.initialized, self.bus_ready) {
            (false, _) => DeviceStatus::Unknown,
            (true, false) => DeviceStatus::Error,
            (true, true) => DeviceStatus::Ready,
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    struct FixedImu {
        accel: [i32; 3],
        gyro: [i32; 3],
        present: bool,
        fetches: u32,
    }

    impl MotionBus for FixedImu {
        fn probe(&mut self) -> Result<(), BusError> {
            if self.present {
                Ok(())
            } else {
                Err(BusError::NotReady)
            }
        }

        fn fetch(&mut self, axis: MotionAxis) -> nb::Result<[i32; 3], BusError> {
            self.fetches += 1;
            match axis {
                MotionAxis::Accel => Ok(self.accel),
                MotionAxis::Gyro => Ok(self.gyro),
            }
        }
    }

    fn imu(present: bool) -> SharedBus<FixedImu> {
        SharedBus::new(FixedImu { accel: [3, 4, 0], gyro: [-2, 0, 0], present, fetches: 0 })
    }

    #[test]
    fn magnitude_of_counts() {
        assert_eq!(magnitude([3, 4, 0]), 5.0);
        assert_eq!(magnitude([0, 0, 0]), 0.0);
        assert_eq!(magnitude([-2, 0, 0]), 2.0);
    }

    #[test]
    fn accel_and_gyro_share_one_device() {
        let bus = imu(true);
        let clock = ManualClock::new(7);
        let mut accel = MotionSensor::accelerometer(bus.clone(), clock.clone());
        let mut gyro = MotionSensor::gyroscope(bus.clone(), clock);
        accel.init().unwrap();
        gyro.init().unwrap();

        let a = accel.read().unwrap();
        assert_eq!(a.value, 5.0);
        assert_eq!((a.x, a.y, a.z), (3.0, 4.0, 0.0));
        assert_eq!(a.raw_value, 3);
        assert_eq!(a.quality, QUALITY_FAIR);
        assert_eq!(a.timestamp, 7);

        let g = gyro.read().unwrap();
        assert_eq!(g.value, 2.0);
        assert_eq!(g.raw_value, (-2i32) as u32);

        assert_eq!(bus.inner.lock().unwrap().fetches, 2);
        assert_eq!(accel.stats().valid_samples, 1);
        assert_eq!(gyro.stats().valid_samples, 1);
    }

    #[test]
    fn missing_device_fails_init() {
        let mut accel = MotionSensor::accelerometer(imu(false), ManualClock::new(0));
        assert_eq!(accel.init(), Err(SensorError::HardwareFailure));
        assert_eq!(accel.read(), Err(SensorError::NotInitialized));
        assert_eq!(accel.stats().total_samples, 1);
    }

    #[test]
    fn optional_operations_are_unsupported() {
        let mut gyro = MotionSensor::gyroscope(imu(true), ManualClock::new(0));
        assert_eq!(gyro.capabilities(), Capabilities::init_only());
        assert_eq!(gyro.calibrate(), Err(SensorError::Unsupported));
        assert!(gyro.config().is_none());
    }
}
