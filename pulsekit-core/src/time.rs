//! Time management for the sampling path
//!
//! Sensor readings are stamped with monotonic milliseconds since boot.
//! Drivers use the clock to bound transport waits and a [`Delay`] to pace
//! calibration, so both are injected rather than read from globals:
//! - [`MonotonicClock`] reads the host's monotonic clock (std)
//! - [`ManualClock`] only moves when told to, for deterministic tests

/// Timestamp in milliseconds since device boot
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource: Send {
    /// Current time in milliseconds since boot
    fn now(&self) -> Timestamp;
}

/// Blocking delay used between calibration samples
pub trait Delay: Send {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Monotonic time source backed by `std::time::Instant`
///
/// Starts at 0 when created, always increases
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    boot: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Clock starting at zero now
    pub fn new() -> Self {
        Self { boot: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.boot.elapsed().as_millis() as Timestamp
    }
}

/// Delay that sleeps the calling thread
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

/// Manually driven clock for tests and simulation
///
/// Clones share the same counter, so a test can keep one handle and advance
/// time while a driver owns another. Used as a [`Delay`] it advances instead
/// of sleeping.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: std::sync::Arc<core::sync::atomic::AtomicU64>,
}

#[cfg(feature = "std")]
impl ManualClock {
    /// Clock frozen at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: std::sync::Arc::new(core::sync::atomic::AtomicU64::new(start)),
        }
    }

    /// Jump to `timestamp`
    pub fn set(&self, timestamp: Timestamp) {
        self.now.store(timestamp, core::sync::atomic::Ordering::Release);
    }

    /// Move forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, core::sync::atomic::Ordering::AcqRel);
    }
}

#[cfg(feature = "std")]
impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(core::sync::atomic::Ordering::Acquire)
    }
}

#[cfg(feature = "std")]
impl Delay for ManualClock {
    fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }
}

/// Milliseconds elapsed since `earlier`, saturating at zero
pub fn elapsed_ms(clock: &dyn TimeSource, earlier: Timestamp) -> u64 {
    clock.now().saturating_sub(earlier)
}
