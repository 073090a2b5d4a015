//! Tuning loader tests - coercion of malformed user input

use sprint40::config::{
    tuning_from_json, tuning_from_json_with, tuning_from_lookup, ENV_ARR_MS, ENV_GRAVITY_MS,
    ENV_LINES_TARGET,
};
use sprint40::types::Tuning;

#[test]
fn test_empty_object_gives_defaults() {
    assert_eq!(tuning_from_json("{}").unwrap(), Tuning::default());
}

#[test]
fn test_full_document() {
    let json = r#"{
        "gravityMs": 1000,
        "lockDelayMs": 250,
        "countdownSeconds": 0,
        "linesTarget": 20,
        "softDropMs": 5,
        "dasMs": 133,
        "arrMs": 10
    }"#;
    let t = tuning_from_json(json).unwrap();
    assert_eq!(
        t,
        Tuning {
            gravity_ms: 1000,
            lock_delay_ms: 250,
            countdown_seconds: 0,
            lines_target: 20,
            soft_drop_ms: 5,
            das_ms: 133,
            arr_ms: 10,
        }
    );
}

#[test]
fn test_negative_and_fractional_values_are_coerced() {
    let t = tuning_from_json(r#"{"dasMs": -20, "arrMs": 16.9, "softDropMs": 0.4}"#).unwrap();
    assert_eq!(t.das_ms, 0);
    assert_eq!(t.arr_ms, 16);
    // floored to 0, then raised to the 1ms minimum
    assert_eq!(t.soft_drop_ms, 1);
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let json = r#"{"dasMs": 9000, "linesTarget": 1e9, "countdownSeconds": 99}"#;
    let t = tuning_from_json(json).unwrap();
    assert_eq!(t.das_ms, 500);
    assert_eq!(t.lines_target, 1000);
    assert_eq!(t.countdown_seconds, 10);
}

#[test]
fn test_strings_and_garbage() {
    let json = concat!(
        r#"{"gravityMs": "650", "dasMs": "fast", "arrMs": null,"#,
        r#" "lockDelayMs": [1], "extra": true}"#,
    );
    let t = tuning_from_json(json).unwrap();
    assert_eq!(t.gravity_ms, 650);
    assert_eq!(t.das_ms, Tuning::default().das_ms);
    assert_eq!(t.arr_ms, Tuning::default().arr_ms);
    assert_eq!(t.lock_delay_ms, Tuning::default().lock_delay_ms);
}

#[test]
fn test_garbage_falls_back_to_base_not_default() {
    let base = Tuning {
        das_ms: 90,
        ..Tuning::default()
    };
    let t = tuning_from_json_with(r#"{"dasMs": false}"#, base).unwrap();
    assert_eq!(t.das_ms, 90);
}

#[test]
fn test_non_object_documents_are_errors() {
    assert!(tuning_from_json("[1, 2]").is_err());
    assert!(tuning_from_json("42").is_err());
    assert!(tuning_from_json("{ not json").is_err());
}

#[test]
fn test_env_style_lookup() {
    let t = tuning_from_lookup(Tuning::default(), |name| match name {
        ENV_GRAVITY_MS => Some("  400 ".to_string()),
        ENV_ARR_MS => Some("-1".to_string()),
        ENV_LINES_TARGET => Some("lots".to_string()),
        _ => None,
    });
    assert_eq!(t.gravity_ms, 400);
    assert_eq!(t.arr_ms, 0);
    assert_eq!(t.lines_target, 40);
    assert_eq!(t.das_ms, Tuning::default().das_ms);
}
