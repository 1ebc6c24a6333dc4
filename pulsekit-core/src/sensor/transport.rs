//! Transport Abstraction
//!
//! Drivers talk to hardware through small bus traits instead of a concrete
//! I2C or SPI implementation. Fetches are pull-based `nb` operations:
//!
//! - `Ok(value)`: a sample was ready
//! - `Err(nb::Error::WouldBlock)`: nothing yet, poll again
//! - `Err(nb::Error::Other(e))`: the bus failed
//!
//! [`poll_with_timeout`] turns such a fetch into a bounded blocking call.

use crate::errors::SensorError;
use crate::time::{elapsed_ms, TimeSource};

/// Errors reported by a bus implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Device did not acknowledge or is still booting
    NotReady,
    /// Transfer failed on the wire
    Transfer,
    /// Device answered with an empty FIFO
    NoData,
}

impl From<BusError> for SensorError {
    fn from(err: BusError) -> Self {
        match err {
            BusError::NotReady | BusError::Transfer => SensorError::HardwareFailure,
            BusError::NoData => SensorError::NoData,
        }
    }
}

/// PPG optical front end
pub trait PpgBus: Send {
    /// Check the device answers and is configured for sampling
    fn probe(&mut self) -> Result<(), BusError>;

    /// Program the output data rate
    fn set_sample_rate(&mut self, hz: u32) -> Result<(), BusError>;

    /// Pop the next red-channel sample from the FIFO
    fn fetch_red(&mut self) -> nb::Result<u32, BusError>;
}

/// Axis set of a 6-axis IMU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionAxis {
    /// Linear acceleration
    Accel,
    /// Angular rate
    Gyro,
}

/// 6-axis inertial measurement unit
pub trait MotionBus: Send {
    /// Check the device answers
    fn probe(&mut self) -> Result<(), BusError>;

    /// Fetch raw x/y/z counts of one axis set
    fn fetch(&mut self, axis: MotionAxis) -> nb::Result<[i32; 3], BusError>;
}

/// Poll `fetch` until it yields, fails, the timeout elapses or the poll
/// budget runs out
///
/// Timeout and budget exhaustion both report [`SensorError::Timeout`]. The
/// budget bounds the loop even when the clock does not advance.
pub fn poll_with_timeout<T, F>(
    clock: &dyn TimeSource,
    timeout_ms: u32,
    max_polls: u32,
    mut fetch: F,
) -> Result<T, SensorError>
where
    F: FnMut() -> nb::Result<T, BusError>,
{
    let started = clock.now();
    for _ in 0..max_polls {
        match fetch() {
            Ok(value) => return Ok(value),
            Err(nb::Error::Other(err)) => return Err(err.into()),
            Err(nb::Error::WouldBlock) => {
                if elapsed_ms(clock, started) >= u64::from(timeout_ms) {
                    return Err(SensorError::Timeout);
                }
                core::hint::spin_loop();
            }
        }
    }
    Err(SensorError::Timeout)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    #[test]
    fn returns_first_ready_value() {
        let clock = ManualClock::new(0);
        let mut polls = 0;
        let result = poll_with_timeout(&clock, 10, 100, || {
            polls += 1;
            if polls < 3 {
                Err(nb::Error::WouldBlock)
            } else {
                Ok(42u32)
            }
        });
        assert_eq!(result, Ok(42));
        assert_eq!(polls, 3);
    }

    #[test]
    fn bus_errors_map_to_sensor_errors() {
        let clock = ManualClock::new(0);
        let result: Result<u32, _> =
            poll_with_timeout(&clock, 10, 100, || Err(nb::Error::Other(BusError::Transfer)));
        assert_eq!(result, Err(SensorError::HardwareFailure));

        let result: Result<u32, _> =
            poll_with_timeout(&clock, 10, 100, || Err(nb::Error::Other(BusError::NoData)));
        assert_eq!(result, Err(SensorError::NoData));
    }

    #[test]
    fn frozen_clock_hits_poll_budget() {
        let clock = ManualClock::new(0);
        let mut polls = 0;
        let result: Result<u32, _> = poll_with_timeout(&clock, 10, 50, || {
            polls += 1;
            Err(nb::Error::WouldBlock)
        });
        assert_eq!(result, Err(SensorError::Timeout));
        assert_eq!(polls, 50);
    }

    #[test]
    fn elapsed_timeout_stops_polling() {
        let clock = ManualClock::new(0);
        let ticker = clock.clone();
        let mut polls = 0;
        let result: Result<u32, _> = poll_with_timeout(&clock, 10, 1_000, || {
            polls += 1;
            ticker.advance(4);
            Err(nb::Error::WouldBlock)
        });
        assert_eq!(result, Err(SensorError::Timeout));
        assert_eq!(polls, 3);
    }
}
