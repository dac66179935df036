//! Suite outcome reporting.

use heapless::{String, Vec};

use crate::config::MAX_TESTS;
use crate::error::Error;

/// What to do with the rest of the suite after a test case fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorPolicy {
    /// Record the failure and run the next test case.
    #[default]
    ContinueOnError,
    /// Stop at the first failed test case.
    AbortSuite,
}

/// A test case that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestOutcome {
    /// Active motors.
    pub motors: usize,
    /// Command batches sent.
    pub ticks: u32,
}

/// Result of one test case.
#[derive(Debug, Clone, PartialEq)]
pub struct TestReport {
    /// Test name.
    pub name: String<32>,
    /// Outcome or the error that aborted it.
    pub result: Result<TestOutcome, Error>,
}

/// Results of a suite run, in execution order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuiteReport {
    reports: Vec<TestReport, MAX_TESTS>,
    skipped: usize,
}

impl SuiteReport {
    pub(crate) fn push(&mut self, report: TestReport) {
        // Suites hold at most MAX_TESTS cases
        let _ = self.reports.push(report);
    }

    pub(crate) fn set_skipped(&mut self, skipped: usize) {
        self.skipped = skipped;
    }

    /// Per-test results for every test that ran.
    pub fn reports(&self) -> &[TestReport] {
        &self.reports
    }

    /// Tests not run because the suite aborted.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of completed tests.
    pub fn completed(&self) -> usize {
        self.reports.iter().filter(|r| r.result.is_ok()).count()
    }

    /// Failed tests.
    pub fn failures(&self) -> impl Iterator<Item = &TestReport> {
        self.reports.iter().filter(|r| r.result.is_err())
    }

    /// True when every test in the suite ran and completed.
    pub fn all_passed(&self) -> bool {
        self.skipped == 0 && self.failures().next().is_none()
    }
}
