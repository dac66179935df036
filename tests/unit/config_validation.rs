//! Unit tests for configuration validation.

use actuator_sweep::config::parse_config;
use actuator_sweep::error::{ConfigError, Error, Field, Location};

const GROUPS: &str = r#"
motor_groups:
  strong:
    motor_ids: [31, 32]
    default_params: {kp: 300.0, kd: 6.0, max_torque: 80.0}
"#;

fn with_groups(tests: &str) -> String {
    format!("{}{}", GROUPS, tests)
}

fn config_error(yaml: &str) -> ConfigError {
    match parse_config(yaml) {
        Err(Error::Config(e)) => e,
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let yaml = with_groups(
        r#"
waveform_tests:
  - type: sine
    amplitude: 0.0
    motor_groups:
      strong: {kd: 0.0}
piecewise_tests:
  - positions: [0.0, 5.0]
"#,
    );

    assert!(parse_config(&yaml).is_ok());
}

/// Test that a suite needs at least one motor group.
#[test]
fn test_no_motor_groups() {
    let yaml = r#"
waveform_tests:
  - type: sine
"#;

    assert_eq!(config_error(yaml), ConfigError::NoMotorGroups);
}

/// Test that a group needs at least one motor.
#[test]
fn test_empty_group() {
    let yaml = r#"
motor_groups:
  idle:
    motor_ids: []
    default_params: {kp: 1.0, kd: 1.0, max_torque: 1.0}
"#;

    assert!(matches!(config_error(yaml), ConfigError::EmptyGroup(g) if g.as_str() == "idle"));
}

/// Test that a motor may not appear twice in one group.
#[test]
fn test_duplicate_motor_in_group() {
    let yaml = r#"
motor_groups:
  strong:
    motor_ids: [31, 32, 31]
    default_params: {kp: 1.0, kd: 1.0, max_torque: 1.0}
"#;

    assert!(matches!(
        config_error(yaml),
        ConfigError::DuplicateMotorId { motor_id: 31, .. }
    ));
}

/// Test that a negative default gain is rejected.
#[test]
fn test_negative_default_gain() {
    let yaml = r#"
motor_groups:
  strong:
    motor_ids: [31]
    default_params: {kp: -1.0, kd: 1.0, max_torque: 1.0}
"#;

    match config_error(yaml) {
        ConfigError::InvalidValue {
            location: Location::GroupDefaults(group),
            field: Field::Kp,
            value,
        } => {
            assert_eq!(group.as_str(), "strong");
            assert_eq!(value, -1.0);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Test that a negative override is rejected and names the test.
#[test]
fn test_negative_override() {
    let yaml = with_groups(
        r#"
waveform_tests:
  - name: bad_override
    type: sine
    motor_groups:
      strong: {max_torque: -5.0}
"#,
    );

    match config_error(&yaml) {
        ConfigError::InvalidValue {
            location: Location::GroupOverride { test, group },
            field: Field::MaxTorque,
            ..
        } => {
            assert_eq!(test.as_str(), "bad_override");
            assert_eq!(group.as_str(), "strong");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Test that a waveform needs a positive frequency.
#[test]
fn test_zero_frequency() {
    let yaml = with_groups(
        r#"
waveform_tests:
  - type: triangle
    frequency: 0.0
"#,
    );

    assert!(matches!(
        config_error(&yaml),
        ConfigError::InvalidValue { field: Field::Frequency, .. }
    ));
}

/// Test that a test needs a positive duration.
#[test]
fn test_negative_duration() {
    let yaml = with_groups(
        r#"
piecewise_tests:
  - duration: -1.0
"#,
    );

    assert!(matches!(
        config_error(&yaml),
        ConfigError::InvalidValue { field: Field::Duration, .. }
    ));
}

/// Test that a piecewise test needs two positions.
#[test]
fn test_single_position() {
    let yaml = with_groups(
        r#"
piecewise_tests:
  - positions: [5.0]
"#,
    );

    assert!(matches!(
        config_error(&yaml),
        ConfigError::TooFewPositions { count: 1, .. }
    ));
}

/// Test that the error message names the offending value and place.
#[test]
fn test_error_message() {
    let yaml = with_groups(
        r#"
waveform_tests:
  - name: slow
    type: sine
    frequency: -2.0
"#,
    );

    let err = parse_config(&yaml).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Configuration error: Invalid frequency = -2 in test 'slow'"
    );
}
