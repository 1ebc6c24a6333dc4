//! Threaded heart-rate task
//!
//! [`HeartRateMonitor`] owns a worker thread that ticks a fresh
//! [`HeartRateProcessor`] at a fixed cadence. Deadlines advance by one period
//! per tick, so a slow read shortens the next sleep instead of shifting the
//! schedule. When the worker falls a whole period behind it resynchronises
//! rather than bursting.
//!
//! ```rust,no_run
//! use pulsekit_core::drivers::{builtin_sensors, SimulationControls};
//! use pulsekit_core::time::{MonotonicClock, StdDelay};
//! use pulsekit_core::{HeartRateMonitor, SensorKind, SensorRegistry};
//!
//! let controls = SimulationControls::new(72.0);
//! let mut registry: SensorRegistry = SensorRegistry::new();
//! registry
//!     .system_init(builtin_sensors(MonotonicClock::new(), StdDelay, &controls))
//!     .unwrap();
//!
//! let mut monitor = HeartRateMonitor::new();
//! let ppg = registry.get(SensorKind::HeartRate).map(|e| e.handle().clone());
//! monitor.start(ppg).unwrap();
//!
//! std::thread::sleep(std::time::Duration::from_secs(10));
//! let (bpm, valid) = monitor.bpm();
//! println!("{bpm:.1} BPM (valid: {valid})");
//! monitor.stop();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::errors::{SensorError, SensorResult};
use crate::heart_rate::config::HeartRateConfig;
use crate::heart_rate::processor::HeartRateProcessor;
use crate::heart_rate::state::{HeartRateReader, HeartRateShared, HeartRateState};
use crate::sensor::SensorHandle;

/// Name of the worker thread
pub const WORKER_THREAD_NAME: &str = "hr-proc";

struct Worker {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

/// Start/stop control of the periodic heart-rate task
pub struct HeartRateMonitor {
    config: HeartRateConfig,
    shared: Arc<HeartRateShared>,
    worker: Option<Worker>,
}

impl HeartRateMonitor {
    /// Monitor with the default configuration
    pub fn new() -> Self {
        Self {
            config: HeartRateConfig::default(),
            shared: Arc::new(HeartRateShared::new()),
            worker: None,
        }
    }

    /// Monitor with a custom configuration, validated here
    pub fn with_config(config: HeartRateConfig) -> SensorResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            shared: Arc::new(HeartRateShared::new()),
            worker: None,
        })
    }

    /// Start processing samples from `sensor`
    ///
    /// Fails with `InvalidParameter` when no sensor is given and with `Busy`
    /// when the task is already started.
    pub fn start(&mut self, sensor: Option<SensorHandle>) -> SensorResult<()> {
        let sensor = sensor.ok_or(SensorError::InvalidParameter)?;
        if self.worker.is_some() {
            log_warn!("HR task already started");
            return Err(SensorError::Busy);
        }

        let mut processor = HeartRateProcessor::new(sensor, self.config)?
            .with_shared(Arc::clone(&self.shared));
        processor.start();

        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let period = Duration::from_millis(u64::from(self.config.period_ms));

        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || run(processor, period, &stop_flag));

        match spawned {
            Ok(thread) => {
                self.worker = Some(Worker { stop, thread });
                log_info!("HR task started, period {} ms", self.config.period_ms);
                Ok(())
            }
            Err(err) => {
                log_error!("Failed to spawn HR worker: {}", err);
                self.shared.publish_bpm(None);
                self.shared.set_state(HeartRateState::Idle);
                Err(SensorError::HardwareFailure)
            }
        }
    }

    /// Stop the task and return to `Idle`
    ///
    /// Waits for the worker to finish its current tick. Calling it again is
    /// a no-op.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::Release);
            if worker.thread.join().is_err() {
                log_error!("HR worker panicked");
            }
            log_info!("HR task stopped");
        }
        self.shared.publish_bpm(None);
        self.shared.set_state(HeartRateState::Idle);
    }

    /// Latest rate and whether it is valid
    pub fn bpm(&self) -> (f32, bool) {
        self.shared.bpm()
    }

    /// Current processing state
    pub fn state(&self) -> HeartRateState {
        self.shared.state()
    }

    /// True between a successful `start` and `stop`
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Non-blocking view for other threads
    pub fn reader(&self) -> HeartRateReader {
        HeartRateReader::new(Arc::clone(&self.shared))
    }

    /// Configuration used for each start
    pub fn config(&self) -> &HeartRateConfig {
        &self.config
    }
}

impl Default for HeartRateMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HeartRateMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(mut processor: HeartRateProcessor, period: Duration, stop: &AtomicBool) {
    let mut deadline = Instant::now();
    while !stop.load(Ordering::Acquire) {
        if processor.tick() == HeartRateState::Error {
            // Nothing more to do until restarted
            break;
        }

        deadline += period;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        } else {
            deadline = now;
        }
    }
}
