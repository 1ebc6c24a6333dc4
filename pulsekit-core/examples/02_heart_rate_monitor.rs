//! Heart Rate Monitor Example
//!
//! Runs the heart-rate task on the simulated PPG and prints the published
//! rate once a second while the scenario changes underneath it.
//!
//! ## Timeline
//!
//! | time  | event                                  |
//! |-------|----------------------------------------|
//! | 0 s   | task started, pulse at 72 BPM          |
//! | 10 s  | pulse rises to 110 BPM                 |
//! | 20 s  | finger taken off (`NoContact`)         |
//! | 23 s  | finger back on                         |
//! | 33 s  | bus fault until the task hits `Error`  |
//!
//! ## Running the Example
//!
//! ```bash
//! RUST_LOG=info cargo run --example 02_heart_rate_monitor
//! ```

use std::thread;
use std::time::Duration;

use pulsekit_core::drivers::{builtin_sensors, SimulationControls};
use pulsekit_core::time::{MonotonicClock, StdDelay};
use pulsekit_core::{HeartRateMonitor, HeartRateReader, SensorKind, SensorRegistry};

fn report(reader: &HeartRateReader, seconds: u32) {
    let (bpm, valid) = reader.bpm();
    let snapshot = reader.snapshot();
    if valid {
        println!("[{:>2} s] {:<9} {:5.1} BPM", seconds, snapshot.state.name(), bpm);
    } else {
        println!("[{:>2} s] {:<9}   --", seconds, snapshot.state.name());
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("PulseKit Heart Rate Monitor Example");
    println!("===================================\n");

    let controls = SimulationControls::new(72.0);
    let mut registry: SensorRegistry = SensorRegistry::new();
    if let Err(e) = registry.system_init(builtin_sensors(MonotonicClock::new(), StdDelay, &controls)) {
        println!("Sensor startup incomplete: {}", e);
    }

    let mut monitor = HeartRateMonitor::new();
    let reader = monitor.reader();
    let ppg = registry.get(SensorKind::HeartRate).map(|e| e.handle().clone());
    if let Err(e) = monitor.start(ppg) {
        println!("Could not start heart-rate task: {}", e);
        return;
    }

    for second in 1..=40 {
        thread::sleep(Duration::from_secs(1));
        match second {
            10 => controls.set_bpm(110.0),
            20 => controls.set_contact(false),
            23 => controls.set_contact(true),
            33 => controls.set_fault(true),
            _ => {}
        }
        report(&reader, second);
    }

    monitor.stop();
    println!("\nStopped: {}", monitor.state().name());
}
