//! Shared driver handle
//!
//! The registry owns each driver behind a [`SensorHandle`]; the heart-rate
//! task holds a clone of the same handle. Locks are only held for the
//! duration of one driver call. The periodic task uses [`SensorHandle::try_with`]
//! so a long call elsewhere (calibration holds the driver for about a second)
//! shows up as `Busy` instead of stalling a tick.

use std::sync::{Arc, Mutex, TryLockError};

use crate::errors::{SensorError, SensorResult};
use crate::sensor::Sensor;

/// Cloneable, thread-safe reference to a boxed driver
#[derive(Clone)]
pub struct SensorHandle {
    inner: Arc<Mutex<Box<dyn Sensor>>>,
}

impl SensorHandle {
    /// Box `sensor` behind a new handle
    pub fn new<S: Sensor + 'static>(sensor: S) -> Self {
        Self::from_box(Box::new(sensor))
    }

    /// Handle around an already boxed driver
    pub fn from_box(sensor: Box<dyn Sensor>) -> Self {
        Self { inner: Arc::new(Mutex::new(sensor)) }
    }

    /// Run `f` with exclusive access to the driver
    ///
    /// A poisoned lock means a driver call panicked; report it as a hardware
    /// failure instead of propagating the panic.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn Sensor) -> R) -> SensorResult<R> {
        let mut guard = self.inner.lock().map_err(|_| SensorError::HardwareFailure)?;
        Ok(f(guard.as_mut()))
    }

    /// Like [`with`](Self::with), but fails with `Busy` instead of waiting
    /// when another caller holds the driver
    pub fn try_with<R>(&self, f: impl FnOnce(&mut dyn Sensor) -> R) -> SensorResult<R> {
        let mut guard = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(SensorError::Busy),
            Err(TryLockError::Poisoned(_)) => return Err(SensorError::HardwareFailure),
        };
        Ok(f(guard.as_mut()))
    }

    /// True when both handles point at the same driver
    pub fn ptr_eq(&self, other: &SensorHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl core::fmt::Debug for SensorHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SensorHandle")
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}
