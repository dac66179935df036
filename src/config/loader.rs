//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{message, ConfigError, Error, Result};

use super::SuiteConfig;

/// Load a test suite from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
///
/// # Example
///
/// ```rust,ignore
/// use actuator_sweep::load_config;
///
/// let suite = load_config("leg_tests.yaml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SuiteConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        let msg = format!("{}: {}", path.display(), e);
        Error::Config(ConfigError::IoError(message(&msg)))
    })?;

    parse_config(&content)
}

/// Parse a test suite from a YAML string.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SuiteConfig> {
    let config: SuiteConfig = serde_yaml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(message(&e.to_string()))))?;

    super::validation::validate_config(&config)?;

    tracing::debug!(
        groups = config.motor_groups.len(),
        tests = config.tests.len(),
        "loaded test suite"
    );

    Ok(config)
}
