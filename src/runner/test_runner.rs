//! Test case execution against an actuator backend.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::actuator::{ActuatorCommand, ActuatorInterface};
use crate::config::units::Seconds;
use crate::config::{MotorGroups, MotorId, SuiteConfig, TestCase, MAX_RESOLVED_MOTORS};
use crate::error::{name, ConfigError, DispatchError, Error, Field, Location, Operation, Result};
use crate::motion::{sample, MotionExecutor, DEFAULT_PERIOD};
use crate::record::Recorder;
use crate::resolve::{resolve, ResolvedMotorConfig};

use super::report::{ErrorPolicy, SuiteReport, TestOutcome, TestReport};

/// Runner settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerConfig {
    /// Control period between command batches.
    pub period: Seconds,
    /// Pause after disabling torque, before applying gains.
    pub settle_time: Seconds,
    /// Suite behavior after a failed test case.
    pub error_policy: ErrorPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            settle_time: Seconds(1.0),
            error_policy: ErrorPolicy::ContinueOnError,
        }
    }
}

/// Drives test cases through an actuator backend at a fixed rate.
///
/// Generic over:
/// - `A`: actuator backend (must implement [`ActuatorInterface`])
/// - `D`: delay provider between ticks (must implement `DelayNs`)
///
/// # Example
///
/// ```rust,ignore
/// use actuator_sweep::{load_config, RunnerConfig, TestRunner};
///
/// let suite = load_config("leg_tests.yaml")?;
/// let mut runner = TestRunner::new(backend, delay, RunnerConfig::default());
/// let report = runner.run_suite(&suite);
/// assert!(report.all_passed());
/// ```
pub struct TestRunner<A, D>
where
    A: ActuatorInterface,
    D: DelayNs,
{
    actuators: A,
    delay: D,
    config: RunnerConfig,
}

impl<A, D> TestRunner<A, D>
where
    A: ActuatorInterface,
    D: DelayNs,
{
    /// Create a runner.
    pub fn new(actuators: A, delay: D, config: RunnerConfig) -> Self {
        Self {
            actuators,
            delay,
            config,
        }
    }

    /// Runner settings.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Borrow the actuator backend.
    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    /// Release the backend and delay provider.
    pub fn into_parts(self) -> (A, D) {
        (self.actuators, self.delay)
    }

    /// Run every test case in the suite, without recording.
    pub fn run_suite(&mut self, suite: &SuiteConfig) -> SuiteReport {
        self.run_suite_with(suite, |_| (), |_, _, _| {})
    }

    /// Run every test case in the suite.
    ///
    /// `recorder_for` builds a fresh recorder for each test; `finished`
    /// receives it back with the test's result. Failures follow the
    /// configured [`ErrorPolicy`].
    pub fn run_suite_with<R, F, G>(
        &mut self,
        suite: &SuiteConfig,
        mut recorder_for: F,
        mut finished: G,
    ) -> SuiteReport
    where
        R: Recorder,
        F: FnMut(&TestCase) -> R,
        G: FnMut(&TestCase, R, &Result<TestOutcome>),
    {
        let mut report = SuiteReport::default();

        for (index, case) in suite.tests.iter().enumerate() {
            let mut recorder = recorder_for(case);
            let result = self.run_test(&suite.motor_groups, case, &mut recorder);

            if let Err(ref e) = result {
                tracing::error!(test = case.name(), error = %e, "test case failed");
            }
            finished(case, recorder, &result);

            let failed = result.is_err();
            report.push(TestReport {
                name: name(case.name()),
                result,
            });

            if failed && self.config.error_policy == ErrorPolicy::AbortSuite {
                let skipped = suite.tests.len() - index - 1;
                if skipped > 0 {
                    tracing::warn!(skipped, "aborting suite after failure");
                }
                report.set_skipped(skipped);
                break;
            }
        }

        report
    }

    /// Run one test case: resolve, configure, stream, disable.
    ///
    /// Torque is disabled on the active motors afterwards even when streaming
    /// fails; the first error is returned.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a non-positive control period and a
    /// resolution error, both before any motor is touched, or the first
    /// dispatch error from the backend.
    pub fn run_test<R: Recorder>(
        &mut self,
        groups: &MotorGroups,
        case: &TestCase,
        recorder: &mut R,
    ) -> Result<TestOutcome> {
        let period = self.config.period.0;
        if !(period.is_finite() && period > 0.0) {
            return Err(Error::Config(ConfigError::InvalidValue {
                location: Location::Runner,
                field: Field::Period,
                value: period,
            }));
        }

        let resolved = resolve(groups, case)?;
        let motor_ids = resolved.motor_id_list();

        if resolved.is_empty() {
            tracing::warn!(
                test = case.name(),
                "no active motors, streaming empty command batches"
            );
        }

        tracing::info!(
            test = case.name(),
            kind = case.kind_str(),
            motors = resolved.len(),
            duration = case.duration().0,
            send_velocity = case.send_velocity(),
            "starting test"
        );

        let result = self
            .prepare(&resolved, &motor_ids)
            .and_then(|()| self.stream(case, &resolved, &motor_ids, recorder));
        let teardown = self.disable_all(&motor_ids);

        if let Err(ref e) = teardown {
            tracing::warn!(test = case.name(), error = %e, "failed to disable motors");
        }

        let ticks = result?;
        teardown?;

        tracing::info!(test = case.name(), ticks, "test complete");
        Ok(TestOutcome {
            motors: resolved.len(),
            ticks,
        })
    }

    /// Disable torque, wait, then apply the resolved gains.
    fn prepare(&mut self, resolved: &ResolvedMotorConfig, motor_ids: &[MotorId]) -> Result<()> {
        self.disable_all(motor_ids)?;
        self.pause(self.config.settle_time);

        for motor in resolved {
            tracing::debug!(
                motor_id = motor.motor_id,
                group = motor.group.as_str(),
                kp = motor.params.kp,
                kd = motor.params.kd,
                max_torque = motor.params.max_torque,
                "configuring motor"
            );
            self.actuators
                .set_motor_params(motor.motor_id, &motor.params)
                .map_err(|e| dispatch(Operation::SetParams, Some(motor.motor_id), &e))?;
        }
        Ok(())
    }

    /// Send one command batch per tick until the test duration elapses.
    fn stream<R: Recorder>(
        &mut self,
        case: &TestCase,
        resolved: &ResolvedMotorConfig,
        motor_ids: &[MotorId],
        recorder: &mut R,
    ) -> Result<u32> {
        recorder.begin(resolved, case.send_velocity());

        let mut executor = MotionExecutor::new(case.duration(), self.config.period);
        let mut commands: Vec<ActuatorCommand, MAX_RESOLVED_MOTORS> = Vec::new();

        while let Some(t) = executor.advance() {
            let target = sample(case, t);
            recorder.time_point(t);

            commands.clear();
            for &motor_id in motor_ids {
                // Same capacity as the resolved set
                let _ = commands.push(ActuatorCommand {
                    motor_id,
                    position: target.position,
                    velocity: target.velocity,
                });
                recorder.command(motor_id, &target);
            }

            self.actuators
                .send_commands(&commands)
                .map_err(|e| dispatch(Operation::SendCommands, None, &e))?;
            self.actuators
                .read_states(motor_ids, &mut |state| recorder.state(&state))
                .map_err(|e| dispatch(Operation::ReadStates, None, &e))?;

            tracing::trace!(t = t.0, position = target.position.0, "tick");
            self.pause(self.config.period);
        }

        Ok(executor.current_tick())
    }

    /// Disable torque on every motor, trying all of them before reporting
    /// the first failure.
    fn disable_all(&mut self, motor_ids: &[MotorId]) -> Result<()> {
        let mut first_error = None;
        for &motor_id in motor_ids {
            if let Err(e) = self.actuators.set_torque_enabled(motor_id, false) {
                tracing::warn!(motor_id, error = ?e, "failed to disable motor");
                first_error.get_or_insert_with(|| dispatch(Operation::SetTorque, Some(motor_id), &e));
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn pause(&mut self, duration: Seconds) {
        let micros = duration.as_micros_u32();
        if micros > 0 {
            self.delay.delay_us(micros);
        }
    }
}

fn dispatch<E: core::fmt::Debug>(operation: Operation, motor_id: Option<MotorId>, e: &E) -> Error {
    Error::Dispatch(DispatchError::new(operation, motor_id, e))
}
