//! Sensor Registry Example
//!
//! Registers the simulated PPG and IMU drivers, initialises them in one
//! pass and reads each sensor a few times.
//!
//! ## What You'll Learn
//!
//! - Building registry entries from concrete drivers
//! - How a failing device is reported without blocking the others
//! - Reading through a shared sensor handle
//! - Calibrating the PPG baseline
//!
//! ## Running the Example
//!
//! ```bash
//! RUST_LOG=debug cargo run --example 01_sensor_registry
//! ```

use pulsekit_core::drivers::{builtin_sensors, SimulationControls};
use pulsekit_core::time::{MonotonicClock, StdDelay};
use pulsekit_core::{SensorKind, SensorRegistry};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("PulseKit Sensor Registry Example");
    println!("================================\n");

    let controls = SimulationControls::new(72.0);
    let mut registry: SensorRegistry = SensorRegistry::new();

    match registry.system_init(builtin_sensors(MonotonicClock::new(), StdDelay, &controls)) {
        Ok(()) => println!("All sensors initialised\n"),
        Err(e) => println!("Some sensors failed to initialise: {}\n", e),
    }

    println!("Registered sensors:");
    for entry in registry.iter() {
        let caps = entry.handle().with(|s| s.capabilities()).unwrap_or_default();
        println!(
            "  {:<10} {:<28} init={} configure={} calibrate={}",
            entry.kind().name(),
            entry.name(),
            entry.is_initialized(),
            caps.configure,
            caps.calibrate,
        );
    }

    println!("\nReadings:");
    for kind in SensorKind::ALL {
        let Some(entry) = registry.get(kind) else {
            continue;
        };
        for _ in 0..3 {
            match entry.handle().with(|s| s.read()) {
                Ok(Ok(r)) if kind == SensorKind::HeartRate => {
                    println!("  {:<10} raw={} quality={}%", kind.name(), r.raw_value, r.quality)
                }
                Ok(Ok(r)) => println!(
                    "  {:<10} x={:.0} y={:.0} z={:.0} |v|={:.0}",
                    kind.name(),
                    r.x,
                    r.y,
                    r.z,
                    r.value
                ),
                Ok(Err(e)) | Err(e) => println!("  {:<10} read failed: {}", kind.name(), e),
            }
        }
    }

    println!("\nCalibrating PPG baseline (about 1 s)...");
    if let Some(ppg) = registry.get(SensorKind::HeartRate) {
        match ppg.handle().with(|s| s.calibrate()) {
            Ok(Ok(())) => println!("  calibrated"),
            Ok(Err(e)) | Err(e) => println!("  calibration failed: {}", e),
        }
        if let Ok(stats) = ppg.handle().with(|s| s.stats()) {
            println!(
                "  samples={} valid={} errors={} avg quality={}%",
                stats.total_samples, stats.valid_samples, stats.error_count, stats.avg_quality
            );
        }
    }

    println!("\nTaking the finger off and calibrating again...");
    controls.set_contact(false);
    if let Some(ppg) = registry.get(SensorKind::HeartRate) {
        if let Ok(Err(e)) = ppg.handle().with(|s| s.calibrate()) {
            println!("  calibration failed as expected: {}", e);
        }
    }
}
