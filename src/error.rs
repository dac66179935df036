//! Error types for actuator-sweep.
//!
//! Three failure areas, matching the points where a run can stop:
//! loading the suite, resolving a test case against the motor groups,
//! and dispatching to the actuator backend.

use core::fmt;

use crate::config::MotorId;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Bounded name used inside error payloads.
pub type Name = heapless::String<32>;

/// Bounded free-form message used inside error payloads.
pub type Message = heapless::String<128>;

/// Unified error type for all actuator-sweep operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Suite loading or validation error. Aborts the whole run.
    Config(ConfigError),
    /// Per-test resolution error. Aborts the current test case.
    Resolution(ResolutionError),
    /// Actuator backend failure. Aborts the current test case.
    Dispatch(DispatchError),
}

/// Parameter field named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Proportional gain.
    Kp,
    /// Derivative gain.
    Kd,
    /// Torque limit.
    MaxTorque,
    /// Waveform amplitude.
    Amplitude,
    /// Waveform frequency.
    Frequency,
    /// Test duration.
    Duration,
    /// Piecewise waypoint.
    Position,
    /// Control period.
    Period,
}

impl Field {
    /// YAML key of this field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Kp => "kp",
            Field::Kd => "kd",
            Field::MaxTorque => "max_torque",
            Field::Amplitude => "amplitude",
            Field::Frequency => "frequency",
            Field::Duration => "duration",
            Field::Position => "positions",
            Field::Period => "period",
        }
    }
}

/// Where an invalid value was found.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// `default_params` of a global motor group.
    GroupDefaults(Name),
    /// A per-test override of a motor group.
    GroupOverride {
        /// Test name.
        test: Name,
        /// Overridden group name.
        group: Name,
    },
    /// A test case body.
    Test(Name),
    /// Runner settings.
    Runner,
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse YAML configuration
    ParseError(Message),
    /// No motor groups defined
    NoMotorGroups,
    /// Motor group has no motor IDs
    EmptyGroup(Name),
    /// Motor ID listed twice in the same group
    DuplicateMotorId {
        /// Group name
        group: Name,
        /// Repeated ID
        motor_id: MotorId,
    },
    /// Numeric field out of its domain (negative gain, non-positive frequency, NaN, ...)
    InvalidValue {
        /// Where the value was found
        location: Location,
        /// Offending field
        field: Field,
        /// Offending value
        value: f32,
    },
    /// Piecewise test with fewer than two positions
    TooFewPositions {
        /// Test name
        test: Name,
        /// Number of positions given
        count: usize,
    },
    /// A fixed-capacity collection overflowed
    CapacityExceeded(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(Message),
}

/// Errors raised while resolving one test case.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionError {
    /// Test overrides a group that is not defined globally
    UnknownGroup(Name),
    /// Active motor is not a member of any referenced group
    MotorNotReachable(MotorId),
    /// Motor ID belongs to no global group
    UnownedMotor(MotorId),
    /// Motor ID belongs to more than one global group
    AmbiguousOwnership {
        /// Motor ID
        motor_id: MotorId,
        /// First owning group
        first: Name,
        /// Second owning group
        second: Name,
    },
    /// Active set exceeds the resolver capacity (payload is the capacity)
    TooManyMotors(usize),
}

/// Actuator call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Torque enable or disable
    SetTorque,
    /// Gain / torque limit configuration
    SetParams,
    /// Position (and velocity) command
    SendCommands,
    /// State readback
    ReadStates,
}

/// Actuator backend failure.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchError {
    /// Failed operation
    pub operation: Operation,
    /// Motor involved, if the call was for a single motor
    pub motor_id: Option<MotorId>,
    /// Backend error rendered with `Debug`
    pub message: Message,
}

impl DispatchError {
    /// Build a dispatch error from a backend error value.
    pub fn new<E: fmt::Debug>(operation: Operation, motor_id: Option<MotorId>, source: &E) -> Self {
        use core::fmt::Write;
        let mut message = Message::new();
        // Truncation on overflow is fine for a diagnostic string.
        let _ = write!(message, "{:?}", source);
        Self {
            operation,
            motor_id,
            message,
        }
    }
}

/// Copy a `&str` into a bounded name, truncating at the capacity.
pub(crate) fn name(s: &str) -> Name {
    let mut out = Name::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Copy a `&str` into a bounded message, truncating at the capacity.
pub(crate) fn message(s: &str) -> Message {
    let mut out = Message::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Resolution(e) => write!(f, "Resolution error: {}", e),
            Error::Dispatch(e) => write!(f, "Dispatch error: {}", e),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::GroupDefaults(group) => write!(f, "default_params of group '{}'", group),
            Location::GroupOverride { test, group } => {
                write!(f, "override of group '{}' in test '{}'", group, test)
            }
            Location::Test(test) => write!(f, "test '{}'", test),
            Location::Runner => f.write_str("runner settings"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::NoMotorGroups => write!(f, "No motor groups defined"),
            ConfigError::EmptyGroup(group) => write!(f, "Motor group '{}' has no motor_ids", group),
            ConfigError::DuplicateMotorId { group, motor_id } => {
                write!(f, "Motor {} listed twice in group '{}'", motor_id, group)
            }
            ConfigError::InvalidValue {
                location,
                field,
                value,
            } => write!(f, "Invalid {} = {} in {}", field, value, location),
            ConfigError::TooFewPositions { test, count } => write!(
                f,
                "Piecewise test '{}' needs at least 2 positions, got {}",
                test, count
            ),
            ConfigError::CapacityExceeded(what) => write!(f, "Too many {}", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::UnknownGroup(group) => write!(f, "Unknown motor group '{}'", group),
            ResolutionError::MotorNotReachable(id) => {
                write!(f, "Motor {} not reachable via any referenced group", id)
            }
            ResolutionError::UnownedMotor(id) => write!(f, "Motor {} belongs to no motor group", id),
            ResolutionError::AmbiguousOwnership {
                motor_id,
                first,
                second,
            } => write!(
                f,
                "Motor {} belongs to both '{}' and '{}'",
                motor_id, first, second
            ),
            ResolutionError::TooManyMotors(n) => write!(f, "More than {} active motors", n),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::SetTorque => "set_torque_enabled",
            Operation::SetParams => "set_motor_params",
            Operation::SendCommands => "send_commands",
            Operation::ReadStates => "read_states",
        })
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.motor_id {
            Some(id) => write!(f, "{} failed for motor {}: {}", self.operation, id, self.message),
            None => write!(f, "{} failed: {}", self.operation, self.message),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ResolutionError> for Error {
    fn from(e: ResolutionError) -> Self {
        Error::Resolution(e)
    }
}

impl From<DispatchError> for Error {
    fn from(e: DispatchError) -> Self {
        Error::Dispatch(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ResolutionError {}

#[cfg(feature = "std")]
impl std::error::Error for DispatchError {}
