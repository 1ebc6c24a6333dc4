//! PPG Heart-Rate Sensor Driver
//!
//! Drives an optical front end (MAX3010x-class) through a [`PpgBus`]. Each
//! read pops one red-channel sample and grades it by raw intensity:
//!
//! ```text
//!   raw counts      quality
//!   < 5 000         Invalid    no finger on the sensor
//!   > 250 000       Poor       saturated
//!   < 15 000        Poor       weak pulsatile signal
//!   < 20 000        Fair
//!   > 200 000       Fair
//!   otherwise       Excellent
//! ```
//!
//! A reading counts as valid when its quality is above Poor.
//!
//! ## Calibration
//!
//! Takes `CALIBRATION_SAMPLES` reads `CALIBRATION_INTERVAL_MS` apart and
//! keeps the usable ones. With fewer than `CALIBRATION_MIN_VALID` usable reads
//! the run fails; otherwise their mean raw value becomes the baseline.

use crate::constants::quality::{
    QUALITY_EXCELLENT, QUALITY_FAIR, QUALITY_INVALID, QUALITY_POOR,
};
use crate::constants::sensors::{
    CALIBRATION_INTERVAL_MS, CALIBRATION_MIN_VALID, CALIBRATION_SAMPLES,
    DEFAULT_READ_TIMEOUT_MS, MAX_READ_POLLS, PPG_FAIR_HIGH_THRESHOLD, PPG_FAIR_LOW_THRESHOLD,
    PPG_NO_CONTACT_THRESHOLD, PPG_SATURATION_THRESHOLD, PPG_WEAK_SIGNAL_THRESHOLD,
};
use crate::errors::{SensorError, SensorResult};
use crate::sensor::{
    poll_with_timeout, Capabilities, DeviceStatus, PpgBus, Quality, Sensor,
    SensorConfig, SensorReading, SensorStats,
};
use crate::time::{Delay, TimeSource};

/// Display name used when registering the driver
pub const PPG_SENSOR_NAME: &str = "MAX30102 Heart Rate Sensor";

/// Grade a raw PPG intensity
pub fn classify_quality(raw: u32) -> Quality {
    if raw < PPG_NO_CONTACT_THRESHOLD {
        QUALITY_INVALID
    } else if raw > PPG_SATURATION_THRESHOLD {
        QUALITY_POOR
    } else if raw < PPG_WEAK_SIGNAL_THRESHOLD {
        QUALITY_POOR
    } else if raw < PPG_FAIR_LOW_THRESHOLD {
        QUALITY_FAIR
    } else if raw > PPG_FAIR_HIGH_THRESHOLD {
        QUALITY_FAIR
    } else {
        QUALITY_EXCELLENT
    }
}

/// PPG driver over a bus, a clock and a delay
pub struct PpgSensor<B, C, D> {
    bus: B,
    clock: C,
    delay: D,
    config: SensorConfig,
    stats: SensorStats,
    initialized: bool,
    bus_ready: bool,
    calibrated: bool,
    baseline: u32,
    read_timeout_ms: u32,
}

impl<B: PpgBus, C: TimeSource, D: Delay> PpgSensor<B, C, D> {
    /// Driver with the default PPG configuration
    pub fn new(bus: B, clock: C, delay: D) -> Self {
        Self {
            bus,
            clock,
            delay,
            config: SensorConfig::default(),
            stats: SensorStats::default(),
            initialized: false,
            bus_ready: false,
            calibrated: false,
            baseline: 0,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }

    /// Start from a non-default configuration
    pub fn with_config(mut self, config: SensorConfig) -> Self {
        self.config = config;
        self
    }

    /// Upper bound on one blocking read
    pub fn with_read_timeout(mut self, timeout_ms: u32) -> Self {
        self.read_timeout_ms = timeout_ms;
        self
    }

    /// Mean raw intensity of the last successful calibration
    pub fn baseline(&self) -> Option<u32> {
        self.calibrated.then_some(self.baseline)
    }

    /// True after a successful `calibrate`
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    fn fetch(&mut self) -> SensorResult<u32> {
        let bus = &mut self.bus;
        let result = poll_with_timeout(&self.clock, self.read_timeout_ms, MAX_READ_POLLS, || {
            bus.fetch_red()
        });
        match result {
            Ok(raw) => {
                self.bus_ready = true;
                Ok(raw)
            }
            Err(SensorError::HardwareFailure) => {
                self.bus_ready = false;
                Err(SensorError::HardwareFailure)
            }
            Err(err) => Err(err),
        }
    }

    fn push_sample_rate(&mut self) {
        if let Err(err) = self.bus.set_sample_rate(self.config.sample_rate_hz) {
            log_warn!(
                "PPG: setting sample rate {} Hz failed: {:?}",
                self.config.sample_rate_hz,
                err
            );
        }
    }
}

impl<B: PpgBus, C: TimeSource, D: Delay> Sensor for PpgSensor<B, C, D> {
    fn init(&mut self) -> SensorResult<()> {
        log_debug!("Initializing PPG sensor");

        if let Err(err) = self.bus.probe() {
            log_error!("PPG device not ready: {:?}", err);
            self.bus_ready = false;
            return Err(SensorError::HardwareFailure);
        }
        self.bus_ready = true;
        self.push_sample_rate();

        self.stats = SensorStats::default();
        self.calibrated = false;
        self.baseline = 0;
        self.initialized = true;

        log_info!("PPG sensor initialized at {} Hz", self.config.sample_rate_hz);
        Ok(())
    }

    fn read(&mut self) -> SensorResult<SensorReading> {
        if !self.initialized {
            self.stats.record_error();
            return Err(SensorError::NotInitialized);
        }

        let raw = match self.fetch() {
            Ok(raw) => raw,
            Err(err) => {
                self.stats.record_error();
                log_debug!("PPG read failed: {:?}", err);
                return Err(err);
            }
        };

        let quality = classify_quality(raw);
        let reading = SensorReading::scalar(self.clock.now(), raw as f32, raw, quality);
        self.stats.record(quality, reading.is_usable(), reading.timestamp);

        log_debug!("PPG reading: raw={}, quality={}%", raw, quality);
        Ok(reading)
    }

    fn status(&self) -> DeviceStatus {
        if !self.initialized {
            DeviceStatus::Unknown
        } else if !self.bus_ready {
            DeviceStatus::Error
        } else {
            DeviceStatus::Ready
        }
    }

    fn stats(&self) -> SensorStats {
        self.stats
    }

    fn reset_stats(&mut self) {
        self.stats = SensorStats::default();
        log_info!("PPG statistics reset");
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::full()
    }

    fn configure(&mut self, config: &SensorConfig) -> SensorResult<()> {
        config.validate()?;
        self.config = *config;
        if self.initialized {
            self.push_sample_rate();
        }
        log_info!(
            "PPG configured: rate={} Hz, led_current={}",
            config.sample_rate_hz,
            config.led_current
        );
        Ok(())
    }

    fn calibrate(&mut self) -> SensorResult<()> {
        if !self.initialized {
            return Err(SensorError::NotInitialized);
        }
        log_info!("Starting PPG calibration");

        let mut sum: u64 = 0;
        let mut usable: usize = 0;
        for _ in 0..CALIBRATION_SAMPLES {
            match self.read() {
                Ok(reading) if reading.quality > QUALITY_POOR => {
                    sum += u64::from(reading.raw_value);
                    usable += 1;
                }
                _ => {}
            }
            self.delay.delay_ms(CALIBRATION_INTERVAL_MS);
        }

        if usable < CALIBRATION_MIN_VALID {
            log_error!(
                "PPG calibration failed: {} of {} readings usable",
                usable,
                CALIBRATION_SAMPLES
            );
            return Err(SensorError::CalibrationFailed);
        }

        self.baseline = (sum / usable as u64) as u32;
        self.calibrated = true;
        log_info!("PPG calibration complete: baseline={}", self.baseline);
        Ok(())
    }

    fn config(&self) -> Option<SensorConfig> {
        Some(self.config)
    }
}
