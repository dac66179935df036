//! Test execution.
//!
//! Runs resolved test cases against an [`ActuatorInterface`] backend and
//! collects per-test outcomes into a [`SuiteReport`].
//!
//! [`ActuatorInterface`]: crate::actuator::ActuatorInterface

#[cfg(feature = "std")]
mod delay;
mod report;
mod test_runner;

#[cfg(feature = "std")]
pub use delay::StdDelay;
pub use report::{ErrorPolicy, SuiteReport, TestOutcome, TestReport};
pub use test_runner::{RunnerConfig, TestRunner};
