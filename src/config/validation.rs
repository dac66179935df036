//! Configuration validation.

use crate::error::{name, ConfigError, Error, Field, Location, Result};

use super::params::{MotorParams, ParamOverride};
use super::test_case::{PiecewiseTest, TestCase, WaveformTest};
use super::{MotorGroup, SuiteConfig};

/// Validate a suite configuration.
///
/// Checks:
/// - At least one motor group, each with at least one motor and no repeats
/// - Gains and torque limits are finite and non-negative, in defaults and overrides
/// - Waveform frequency and duration are positive
/// - Piecewise tests have at least two finite positions and a positive duration
///
/// Group and motor references are checked later, per test, by the resolver.
pub fn validate_config(config: &SuiteConfig) -> Result<()> {
    if config.motor_groups.is_empty() {
        return Err(Error::Config(ConfigError::NoMotorGroups));
    }

    for (group_name, group) in config.motor_groups.iter() {
        validate_group(group_name.as_str(), group)?;
    }

    for test in config.tests.iter() {
        validate_test(test)?;
    }

    Ok(())
}

fn validate_group(group_name: &str, group: &MotorGroup) -> Result<()> {
    if group.motor_ids.is_empty() {
        return Err(Error::Config(ConfigError::EmptyGroup(name(group_name))));
    }

    if let Some(motor_id) = group.first_duplicate() {
        return Err(Error::Config(ConfigError::DuplicateMotorId {
            group: name(group_name),
            motor_id,
        }));
    }

    validate_params(&group.default_params, || {
        Location::GroupDefaults(name(group_name))
    })
}

fn validate_params(params: &MotorParams, location: impl Fn() -> Location) -> Result<()> {
    check_gain(params.kp, Field::Kp, &location)?;
    check_gain(params.kd, Field::Kd, &location)?;
    check_gain(params.max_torque, Field::MaxTorque, &location)
}

fn validate_override(overrides: &ParamOverride, location: impl Fn() -> Location) -> Result<()> {
    if let Some(kp) = overrides.kp {
        check_gain(kp, Field::Kp, &location)?;
    }
    if let Some(kd) = overrides.kd {
        check_gain(kd, Field::Kd, &location)?;
    }
    if let Some(max_torque) = overrides.max_torque {
        check_gain(max_torque, Field::MaxTorque, &location)?;
    }
    Ok(())
}

fn check_gain(value: f32, field: Field, location: &impl Fn() -> Location) -> Result<()> {
    // NaN fails both comparisons
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(location(), field, value))
    }
}

fn check_positive(value: f32, field: Field, test: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(Location::Test(name(test)), field, value))
    }
}

fn invalid(location: Location, field: Field, value: f32) -> Error {
    Error::Config(ConfigError::InvalidValue {
        location,
        field,
        value,
    })
}

fn validate_test(test: &TestCase) -> Result<()> {
    let test_name = test.name();

    for (group_name, overrides) in test.motor_groups().iter() {
        validate_override(overrides, || Location::GroupOverride {
            test: name(test_name),
            group: group_name.clone(),
        })?;
    }

    match test {
        TestCase::Waveform(wave) => validate_waveform(test_name, wave),
        TestCase::Piecewise(piecewise) => validate_piecewise(test_name, piecewise),
    }
}

fn validate_waveform(test_name: &str, wave: &WaveformTest) -> Result<()> {
    if !wave.amplitude.0.is_finite() {
        return Err(invalid(
            Location::Test(name(test_name)),
            Field::Amplitude,
            wave.amplitude.0,
        ));
    }
    check_positive(wave.frequency.0, Field::Frequency, test_name)?;
    check_positive(wave.duration.0, Field::Duration, test_name)
}

fn validate_piecewise(test_name: &str, piecewise: &PiecewiseTest) -> Result<()> {
    if piecewise.positions.len() < 2 {
        return Err(Error::Config(ConfigError::TooFewPositions {
            test: name(test_name),
            count: piecewise.positions.len(),
        }));
    }

    if let Some(bad) = piecewise.positions.iter().find(|p| !p.0.is_finite()) {
        return Err(invalid(Location::Test(name(test_name)), Field::Position, bad.0));
    }

    check_positive(piecewise.duration.0, Field::Duration, test_name)
}
