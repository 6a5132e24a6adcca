use lscan_core::errors::{ErrorInfo, LscanError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("modulus", 7)
        .with_context("reason", "example")
}

#[test]
fn invalid_modulus_surface() {
    let err = LscanError::invalid_modulus(0);
    assert_eq!(err.info().code, "modulus_lt_one");
    assert_eq!(err.info().context.get("modulus").map(String::as_str), Some("0"));
    assert_eq!(err.family(), "InvalidModulus");
}

#[test]
fn invalid_character_index_surface() {
    let err = LscanError::invalid_character_index(7, 6, 6);
    assert_eq!(err.info().code, "character_index_out_of_range");
    assert_eq!(err.info().context.get("group_size").map(String::as_str), Some("6"));
    assert!(err.info().hint.is_some());
}

#[test]
fn evaluation_error_surface() {
    let err = LscanError::Evaluation(sample_info("E001", "non finite value"));
    assert_eq!(err.info().code, "E001");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = LscanError::InvalidRange(
        ErrorInfo::new("step_zero", "grid step must be positive")
            .with_context("t_step", 0.0)
            .with_hint("pass a positive step"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("invalid range: grid step must be positive (code: step_zero)"));
    assert!(rendered.contains("t_step=0"));
    assert!(rendered.contains("hint: pass a positive step"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = LscanError::invalid_modulus(0);
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "InvalidModulus");
    assert_eq!(json["detail"]["code"], "modulus_lt_one");
    let decoded: LscanError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}
