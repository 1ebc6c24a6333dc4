//! Buffer Sizes
//!
//! Fixed capacities for the bounded collections of the core crate.

/// Registry capacity (sensor entries).
///
/// One slot per `SensorKind` with headroom for future kinds.
pub const MAX_SENSORS: usize = 8;

/// Beat-to-beat intervals averaged into a rate (~6 s at 80 BPM).
pub const BEAT_HISTORY_SIZE: usize = 8;
