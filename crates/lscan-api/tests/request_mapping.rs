use lscan_api::{internal_index, CltAllRequest, QueryParams, ScanAllRequest, ScanRequest};
use lscan_core::EngineConfig;
use proptest::prelude::*;

#[test]
fn missing_parameters_take_documented_defaults() {
    let empty = QueryParams::default();
    let scan = ScanRequest::from_query(&empty).unwrap();
    assert_eq!((scan.q, scan.start, scan.end, scan.steps, scan.character), (1, 0.0, 30.0, 100, 1));
    let clt_all = CltAllRequest::from_query(&empty).unwrap();
    assert_eq!((clt_all.q, clt_all.height, clt_all.samples), (7, 1000.0, None));
    let scan_all = ScanAllRequest::from_query(&empty).unwrap();
    assert_eq!(scan_all.q, 7);
}

#[test]
fn scan_all_step_resolution_order() {
    let mut config = EngineConfig::default();
    let request = ScanAllRequest::default();
    assert!((request.resolve_step(&config).unwrap() - 30.0 / 500.0).abs() < 1e-15);

    config.grid_step = Some(0.25);
    assert_eq!(request.resolve_step(&config).unwrap(), 0.25);

    let explicit = ScanAllRequest {
        step: Some(0.5),
        ..request
    };
    assert_eq!(explicit.resolve_step(&config).unwrap(), 0.5);

    let by_points = ScanAllRequest {
        points: Some(10),
        ..request
    };
    assert_eq!(by_points.resolve_step(&config).unwrap(), 3.0);

    let both = ScanAllRequest {
        step: Some(0.5),
        points: Some(10),
        ..request
    };
    assert_eq!(both.resolve_step(&config).unwrap(), 0.5);
}

#[test]
fn requests_deserialize_with_defaults() {
    let request: ScanRequest = serde_json::from_str(r#"{"q": 5, "char": 3}"#).unwrap();
    assert_eq!(request.q, 5);
    assert_eq!(request.character, 3);
    assert_eq!(request.steps, 100);
    let clt: CltAllRequest = serde_yaml::from_str("T: 250.0\nsummary: true\n").unwrap();
    assert_eq!(clt.height, 250.0);
    assert!(clt.summary);
}

proptest! {
    #[test]
    fn one_based_mapping_is_shift_by_one(n in 1u64..u64::MAX) {
        prop_assert_eq!(internal_index(n), n - 1);
    }

    #[test]
    fn query_values_roundtrip(q in 1u64..10_000, start in -1.0e3f64..1.0e3) {
        let params = QueryParams::parse(&format!("q={q}&start={start}"));
        let scan = ScanRequest::from_query(&params).unwrap();
        prop_assert_eq!(scan.q, q);
        prop_assert_eq!(scan.start, start);
    }
}

#[test]
fn config_loads_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.yaml");
    std::fs::write(&path, "scan_precision: 96\nlimits:\n  max_samples: 10\n").unwrap();
    let config = lscan_api::load_config(&path).unwrap();
    assert_eq!(config.scan_precision, 96);
    assert_eq!(config.limits.max_samples, 10);
    assert_eq!(config.limits.max_modulus, 10_000);

    std::fs::write(&path, "grid_points: 0\n").unwrap();
    let err = lscan_api::load_config(&path).unwrap_err();
    assert_eq!(err.info().code, "grid_points_zero");

    let err = lscan_api::load_config(&dir.path().join("missing.yaml")).unwrap_err();
    assert_eq!(err.family(), "Config");
}
