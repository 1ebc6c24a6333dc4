//! Host-side configuration loading

use pulsekit_core::{HeartRateConfig, HeartRateState, SensorConfig, SensorKind, SensorReading};

#[test]
fn heart_rate_config_round_trips() {
    let config = HeartRateConfig::default()
        .with_no_contact_samples(80)
        .with_beat_window(300, 1500);

    let json = serde_json::to_string(&config).unwrap();
    let back: HeartRateConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn missing_fields_take_defaults() {
    let config: SensorConfig = serde_json::from_str(r#"{ "sample_rate_hz": 50 }"#).unwrap();
    assert_eq!(config, SensorConfig::default().with_sample_rate(50));

    let hr: HeartRateConfig = serde_json::from_str(r#"{ "min_beats": 6 }"#).unwrap();
    assert_eq!(hr.min_beats, 6);
    assert_eq!(hr.period_ms, 10);
    assert!(hr.validate().is_ok());
}

#[test]
fn readings_and_enums_serialise() {
    let reading = SensorReading::scalar(1_000, 100_000.0, 100_000, 90);
    let value = serde_json::to_value(reading).unwrap();
    assert_eq!(value["timestamp"], 1_000);
    assert_eq!(value["quality"], 90);

    assert_eq!(serde_json::to_string(&SensorKind::HeartRate).unwrap(), "\"HeartRate\"");
    assert_eq!(serde_json::to_string(&HeartRateState::NoContact).unwrap(), "\"NoContact\"");
}
