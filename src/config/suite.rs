//! Suite configuration - root configuration structure.

use core::fmt::Write;

use heapless::{FnvIndexMap, String};
#[cfg(not(feature = "std"))]
use heapless::Vec;
use serde::Deserialize;

use crate::error::ConfigError;

use super::group::MotorGroup;
use super::test_case::{PiecewiseTest, TestCase, WaveformTest};
use super::MAX_GROUPS;

/// Maximum tests of one kind in one list without `std`.
pub const MAX_TESTS_PER_LIST: usize = 32;

/// Maximum test cases in a suite.
pub const MAX_TESTS: usize = 64;

/// Global motor groups, keyed by name.
pub type MotorGroups = FnvIndexMap<String<32>, MotorGroup, MAX_GROUPS>;

/// Test cases in execution order, heap-backed under `std`.
///
/// Holds at most [`MAX_TESTS`] cases either way.
#[cfg(feature = "std")]
pub type TestList = std::vec::Vec<TestCase>;

/// Test cases in execution order.
#[cfg(not(feature = "std"))]
pub type TestList = Vec<TestCase, MAX_TESTS>;

#[cfg(feature = "std")]
type RawList<T> = std::vec::Vec<T>;

#[cfg(not(feature = "std"))]
type RawList<T> = Vec<T, MAX_TESTS_PER_LIST>;

/// Root configuration structure from YAML.
///
/// Accepts the test lists either at top level or nested under
/// `actuator_tests`. Tests run waveform-first, then piecewise, each in file
/// order, with top-level entries ahead of nested ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawSuite")]
pub struct SuiteConfig {
    /// Global motor group definitions.
    pub motor_groups: MotorGroups,

    /// Test cases in execution order.
    pub tests: TestList,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSuite {
    #[serde(default)]
    motor_groups: MotorGroups,
    #[serde(default)]
    waveform_tests: RawList<WaveformTest>,
    #[serde(default)]
    piecewise_tests: RawList<PiecewiseTest>,
    #[serde(default)]
    actuator_tests: Option<RawTests>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTests {
    #[serde(default)]
    waveform_tests: RawList<WaveformTest>,
    #[serde(default)]
    piecewise_tests: RawList<PiecewiseTest>,
}

impl TryFrom<RawSuite> for SuiteConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSuite) -> Result<Self, Self::Error> {
        let nested = raw.actuator_tests.unwrap_or_default();

        let waveforms = raw
            .waveform_tests
            .into_iter()
            .chain(nested.waveform_tests)
            .map(TestCase::Waveform);
        let piecewise = raw
            .piecewise_tests
            .into_iter()
            .chain(nested.piecewise_tests)
            .map(TestCase::Piecewise);

        let mut suite = SuiteConfig::new(raw.motor_groups);
        for case in waveforms.chain(piecewise) {
            suite.push(case)?;
        }
        Ok(suite)
    }
}

impl SuiteConfig {
    /// Create a suite with no tests.
    pub fn new(motor_groups: MotorGroups) -> Self {
        Self {
            motor_groups,
            tests: TestList::new(),
        }
    }

    /// Append a test case, naming it `<kind>_<index>` if it has no name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CapacityExceeded` if the suite is full.
    pub fn push(&mut self, mut case: TestCase) -> Result<(), ConfigError> {
        let index = self.tests.len();
        if index >= MAX_TESTS {
            return Err(ConfigError::CapacityExceeded("test cases"));
        }
        let kind = case.kind_str();
        let slot = case.name_slot();
        if slot.is_none() {
            let mut name = String::new();
            // "piecewise_63" is the longest default and fits.
            let _ = write!(name, "{}_{}", kind, index);
            *slot = Some(name);
        }
        // Capacity checked above
        #[allow(clippy::let_unit_value)]
        let _ = self.tests.push(case);
        Ok(())
    }

    /// Get a motor group by name.
    pub fn group(&self, name: &str) -> Option<&MotorGroup> {
        self.motor_groups
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a test case by name.
    pub fn test(&self, name: &str) -> Option<&TestCase> {
        self.tests.iter().find(|t| t.name() == name)
    }

    /// List all group names.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.motor_groups.keys().map(|s| s.as_str())
    }

    /// List all test names in execution order.
    pub fn test_names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(|t| t.name())
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::new(MotorGroups::new())
    }
}
