use lscan_core::{
    CharacterSelection, EngineConfig, LogMagnitude, NormalizedSample, Precision,
};

#[test]
fn empty_yaml_yields_defaults() {
    let config: EngineConfig = serde_yaml::from_str("{}").expect("parse");
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.working_precision, 128);
    assert_eq!(config.scan_precision, 64);
    assert_eq!(config.sample_count, 5000);
    assert_eq!(config.grid_points, 500);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_yaml_overrides_fields() {
    let config: EngineConfig =
        serde_yaml::from_str("scan_precision: 96\nseed: 7\nlimits:\n  max_samples: 10\n")
            .expect("parse");
    assert_eq!(config.scan_precision, 96);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.limits.max_samples, 10);
    assert_eq!(config.limits.max_modulus, 10_000);
    assert_eq!(config.limits.max_height, 1.0e6);
}

#[test]
fn height_cap_reads_from_yaml_and_must_be_positive() {
    let config: EngineConfig =
        serde_yaml::from_str("limits:\n  max_height: 5000.0\n").expect("parse");
    assert_eq!(config.limits.max_height, 5000.0);
    assert_eq!(config.limits.max_samples, 100_000);
    assert!(config.validate().is_ok());

    let mut config = EngineConfig::default();
    config.limits.max_height = 0.0;
    assert_eq!(config.validate().unwrap_err().info().code, "max_height_invalid");
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = EngineConfig::default();
    config.working_precision = 0;
    assert!(config.validate().is_err());

    let mut config = EngineConfig::default();
    config.grid_step = Some(-1.0);
    assert_eq!(config.validate().unwrap_err().info().code, "grid_step_invalid");
}

#[test]
fn precision_rejects_zero_through_serde() {
    assert!(serde_json::from_str::<Precision>("0").is_err());
    let precision: Precision = serde_json::from_str("64").expect("parse");
    assert_eq!(precision.bits(), 64);
}

#[test]
fn log_magnitude_keeps_zero_tag() {
    let sample = NormalizedSample {
        t: 1500.0,
        character_index: 2,
        raw: LogMagnitude::NegInfinity,
        normalized: LogMagnitude::NegInfinity,
        sigma: 0.98,
        sigma_clamped: false,
    };
    let json = serde_json::to_string(&sample).expect("serialize");
    assert!(json.contains("neg-infinity"));
    let decoded: NormalizedSample = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, sample);

    let selection: CharacterSelection = serde_json::from_str("\"all\"").expect("parse");
    assert_eq!(selection, CharacterSelection::All);
}

#[test]
fn log_magnitude_helpers() {
    assert!(LogMagnitude::from_magnitude(0.0).is_zero_magnitude());
    assert_eq!(LogMagnitude::from_magnitude(1.0), LogMagnitude::Finite(0.0));
    assert_eq!(LogMagnitude::Finite(2.0).scaled(2.0), LogMagnitude::Finite(1.0));
    assert_eq!(LogMagnitude::NegInfinity.scaled(2.0), LogMagnitude::NegInfinity);
    assert_eq!(LogMagnitude::NegInfinity.as_f64(), f64::NEG_INFINITY);
}
