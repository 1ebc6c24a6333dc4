//! Heart-rate processing task
//!
//! PPG samples flow through the bandpass cascade into a beat detector; the
//! resulting rate and a four-state status are published for other threads.
//!
//! - [`state`]: published state and lock-free readers
//! - [`config`]: task tuning
//! - [`detector`]: beat detection seam and the zero-crossing detector
//! - [`processor`]: one tick of the task (std)
//! - [`monitor`]: worker thread with start/stop (std)

pub mod config;
pub mod detector;
pub mod state;

#[cfg(feature = "std")]
pub mod monitor;
#[cfg(feature = "std")]
pub mod processor;

pub use config::HeartRateConfig;
pub use detector::{BeatDetector, ZeroCrossingDetector};
pub use state::{HeartRateShared, HeartRateState, VitalsSnapshot};

#[cfg(feature = "std")]
pub use monitor::HeartRateMonitor;
#[cfg(feature = "std")]
pub use processor::HeartRateProcessor;
#[cfg(feature = "std")]
pub use state::HeartRateReader;
