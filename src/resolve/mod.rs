//! Per-test motor parameter resolution.
//!
//! Combines the global motor groups with a test case's group overrides and
//! active-motor list into the exact set of motors to command and the gains
//! each one receives.

mod resolved;
mod resolver;

pub use resolved::{ResolvedMotor, ResolvedMotorConfig};
pub use resolver::resolve;
