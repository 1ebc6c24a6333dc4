//! Sensor Registry
//!
//! Bounded collection of drivers keyed by [`SensorKind`]. The registry is
//! populated and initialised during startup; afterwards consumers look
//! entries up by kind and share the driver through its [`SensorHandle`].
//!
//! ## Rules
//!
//! - At most one entry per kind; registering a kind again replaces the old
//!   entry in place
//! - A new kind beyond the capacity fails with `CapacityExceeded`
//! - `init_all` visits every entry even when some fail, and reports
//!   `HardwareFailure` if any did
//!
//! ## Usage Example
//!
//! ```rust
//! use pulsekit_core::drivers::{builtin_sensors, SimulationControls};
//! use pulsekit_core::time::ManualClock;
//! use pulsekit_core::{SensorKind, SensorRegistry};
//!
//! let clock = ManualClock::new(0);
//! let controls = SimulationControls::default();
//!
//! let mut registry: SensorRegistry = SensorRegistry::new();
//! registry
//!     .system_init(builtin_sensors(clock.clone(), clock, &controls))
//!     .unwrap();
//!
//! let ppg = registry.get(SensorKind::HeartRate).unwrap();
//! assert!(ppg.is_initialized());
//! assert_eq!(registry.len(), 3);
//! ```

use heapless::Vec;

use crate::constants::buffers::MAX_SENSORS;
use crate::errors::{SensorError, SensorResult};
use crate::sensor::{Sensor, SensorHandle, SensorKind};

/// One registered driver
#[derive(Debug, Clone)]
pub struct SensorEntry {
    kind: SensorKind,
    name: &'static str,
    handle: SensorHandle,
    initialized: bool,
}

impl SensorEntry {
    /// Entry owning `driver`, not yet initialised
    pub fn new<S: Sensor + 'static>(kind: SensorKind, name: &'static str, driver: S) -> Self {
        Self::with_handle(kind, name, SensorHandle::new(driver))
    }

    /// Entry around an existing handle
    pub fn with_handle(kind: SensorKind, name: &'static str, handle: SensorHandle) -> Self {
        Self { kind, name, handle, initialized: false }
    }

    /// Kind this entry is registered under
    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Driver display name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Shared handle to the driver
    pub fn handle(&self) -> &SensorHandle {
        &self.handle
    }

    /// True once the registry has initialised the driver successfully
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

/// Fixed-capacity registry of sensor drivers
#[derive(Debug, Default)]
pub struct SensorRegistry<const N: usize = MAX_SENSORS> {
    entries: Vec<SensorEntry, N>,
}

impl<const N: usize> SensorRegistry<N> {
    /// Empty registry
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add an entry, replacing any entry of the same kind
    pub fn register(&mut self, entry: SensorEntry) -> SensorResult<()> {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.kind == entry.kind) {
            log_warn!(
                "Sensor kind {} already registered ({}), replacing with {}",
                entry.kind.name(),
                existing.name,
                entry.name
            );
            *existing = entry;
            return Ok(());
        }

        let (kind, name) = (entry.kind, entry.name);
        if self.entries.push(entry).is_err() {
            log_error!("Sensor capacity ({}) exceeded, {} not registered", N, name);
            return Err(SensorError::CapacityExceeded);
        }

        log_info!("Registered sensor: {} ({})", name, kind.name());
        Ok(())
    }

    /// Entry for `kind`, if registered
    pub fn get(&self, kind: SensorKind) -> Option<&SensorEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Initialise every registered driver
    ///
    /// Drivers that do not advertise `init` are skipped. Every entry is
    /// visited; the result is `HardwareFailure` if any init failed.
    pub fn init_all(&mut self) -> SensorResult<()> {
        log_info!("Initializing {} registered sensors", self.entries.len());

        let mut result = Ok(());
        let mut initialized = 0usize;
        for entry in self.entries.iter_mut() {
            let outcome = entry.handle.with(|sensor| {
                if sensor.capabilities().init {
                    Some(sensor.init())
                } else {
                    None
                }
            });

            match outcome {
                Ok(None) => {
                    log_warn!("Sensor {} has no init operation", entry.name);
                }
                Ok(Some(Ok(()))) => {
                    entry.initialized = true;
                    initialized += 1;
                    log_info!("Sensor {} initialized successfully", entry.name);
                }
                Ok(Some(Err(err))) | Err(err) => {
                    entry.initialized = false;
                    log_error!("Failed to initialize sensor {}: {}", entry.name, err);
                    result = Err(SensorError::HardwareFailure);
                }
            }
        }

        log_info!(
            "Sensor initialization complete: {}/{} successful",
            initialized,
            self.entries.len()
        );
        result
    }

    /// Register every entry, continuing past failures
    pub fn register_all<I>(&mut self, entries: I) -> SensorResult<()>
    where
        I: IntoIterator<Item = SensorEntry>,
    {
        let mut result = Ok(());
        for entry in entries {
            let name = entry.name;
            if let Err(err) = self.register(entry) {
                log_error!("Failed to register {}: {}", name, err);
                result = Err(err);
            }
        }
        result
    }

    /// Register then initialise
    ///
    /// Registration failures are logged and do not stop initialisation of
    /// the entries that made it in. The initialisation result is returned.
    pub fn system_init<I>(&mut self, entries: I) -> SensorResult<()>
    where
        I: IntoIterator<Item = SensorEntry>,
    {
        if self.register_all(entries).is_err() {
            log_warn!("Some sensors failed to register");
        }
        self.init_all()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SensorEntry> {
        self.entries.iter()
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub const fn capacity(&self) -> usize {
        N
    }
}
