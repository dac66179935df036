//! Configuration module for actuator-sweep.
//!
//! Provides types for loading and validating motor groups and test cases
//! from YAML files (with `std` feature) or values built in code.

mod group;
mod params;
mod suite;
mod test_case;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use group::{MotorGroup, MAX_GROUP_MOTORS};
pub use params::{MotorParams, ParamOverride};
pub use suite::{MotorGroups, SuiteConfig, TestList, MAX_TESTS, MAX_TESTS_PER_LIST};
pub use test_case::{
    ActiveMotors, GroupOverrides, PiecewiseTest, TestCase, WaveformKind, WaveformTest,
    MAX_POSITIONS,
};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, DegreesPerSec, Hertz, Seconds};

/// Actuator identifier as used by the robot control interface.
pub type MotorId = u32;

/// Maximum number of global motor groups.
pub const MAX_GROUPS: usize = 16;

/// Maximum number of motors commanded by one test case.
pub const MAX_RESOLVED_MOTORS: usize = 64;
