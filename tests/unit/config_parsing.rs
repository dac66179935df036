//! Unit tests for YAML configuration parsing.

use actuator_sweep::config::{
    load_config, parse_config, Degrees, Hertz, Seconds, SuiteConfig, TestCase, WaveformKind,
};
use actuator_sweep::error::{ConfigError, Error};

/// Test parsing a motor group with its default gains.
#[test]
fn test_parse_motor_group() {
    let yaml = r#"
motor_groups:
  strong:
    motor_ids: [31, 32, 33]
    default_params:
      kp: 300
      kd: 6.0
      max_torque: 80.0
"#;

    let config: SuiteConfig = serde_yaml::from_str(yaml).expect("Failed to parse YAML");
    let group = config.group("strong").expect("Group not found");

    assert_eq!(group.motor_ids.as_slice(), &[31, 32, 33]);
    assert_eq!(group.default_params.kp, 300.0);
    assert_eq!(group.default_params.kd, 6.0);
    assert_eq!(group.default_params.max_torque, 80.0);
    assert!(config.tests.is_empty());
}

/// Test that omitted waveform fields take their defaults.
#[test]
fn test_waveform_defaults() {
    let yaml = r#"
waveform_tests:
  - type: triangle
"#;

    let config: SuiteConfig = serde_yaml::from_str(yaml).expect("Failed to parse YAML");
    let TestCase::Waveform(ref wave) = config.tests[0] else {
        panic!("expected a waveform test");
    };

    assert_eq!(wave.kind, WaveformKind::Triangle);
    assert_eq!(wave.amplitude, Degrees(20.0));
    assert_eq!(wave.frequency, Hertz(0.5));
    assert_eq!(wave.duration, Seconds(10.0));
    assert!(!wave.send_velocity);
    assert!(wave.active_motors.is_none());
    assert!(wave.motor_groups.is_empty());
}

/// Test that omitted piecewise fields take their defaults.
#[test]
fn test_piecewise_defaults() {
    let yaml = r#"
piecewise_tests:
  - {}
"#;

    let config: SuiteConfig = serde_yaml::from_str(yaml).expect("Failed to parse YAML");
    let TestCase::Piecewise(ref piecewise) = config.tests[0] else {
        panic!("expected a piecewise test");
    };

    let positions: Vec<f32> = piecewise.positions.iter().map(|p| p.0).collect();
    assert_eq!(positions, vec![0.0, 10.0, 0.0, -10.0, 0.0]);
    assert_eq!(piecewise.duration, Seconds(5.0));
    assert_eq!(config.tests[0].name(), "piecewise_0");
}

/// Test parsing partial group overrides.
#[test]
fn test_parse_partial_overrides() {
    let yaml = r#"
waveform_tests:
  - type: sine
    active_motors: [31, 41]
    motor_groups:
      strong: {kp: 350.0}
      weak: {kd: 1.5, max_torque: 20.0}
"#;

    let config: SuiteConfig = serde_yaml::from_str(yaml).expect("Failed to parse YAML");
    let test = &config.tests[0];

    assert_eq!(test.active_motors(), Some(&[31, 41][..]));
    let overrides = test.motor_groups();
    let lookup = |name: &str| {
        overrides
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| *v)
            .unwrap()
    };
    let strong = lookup("strong");
    assert_eq!(strong.kp, Some(350.0));
    assert_eq!(strong.kd, None);
    let weak = lookup("weak");
    assert_eq!(weak.kp, None);
    assert_eq!(weak.max_torque, Some(20.0));
}

/// Test that top-level lists run ahead of nested ones of the same kind.
#[test]
fn test_top_level_and_nested_lists_merge() {
    let yaml = r#"
piecewise_tests:
  - name: top_steps
waveform_tests:
  - name: top_wave
    type: square
actuator_tests:
  waveform_tests:
    - name: nested_wave
      type: sine
  piecewise_tests:
    - name: nested_steps
"#;

    let config: SuiteConfig = serde_yaml::from_str(yaml).expect("Failed to parse YAML");
    let names: Vec<&str> = config.test_names().collect();

    assert_eq!(names, vec!["top_wave", "nested_wave", "top_steps", "nested_steps"]);
}

/// Test that misspelled keys are rejected instead of ignored.
#[test]
fn test_unknown_field_rejected() {
    let yaml = r#"
motor_groups:
  strong:
    motor_ids: [31]
    default_params: {kp: 1.0, kd: 1.0, max_torque: 1.0}
waveform_tests:
  - type: sine
    amplitud: 10.0
"#;

    assert!(matches!(
        parse_config(yaml),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test that an unsupported waveform type is rejected.
#[test]
fn test_unknown_waveform_type_rejected() {
    let yaml = r#"
waveform_tests:
  - type: sawtooth
"#;

    assert!(serde_yaml::from_str::<SuiteConfig>(yaml).is_err());
}

/// Test loading the suite from a file on disk.
#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suite.yaml");
    std::fs::write(
        &path,
        r#"
motor_groups:
  hip:
    motor_ids: [1]
    default_params: {kp: 10.0, kd: 1.0, max_torque: 5.0}
waveform_tests:
  - type: sine
    duration: 1.0
"#,
    )
    .unwrap();

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(config.test_names().collect::<Vec<_>>(), vec!["sine_0"]);
}
