//! Test cases
//!
//! A [`TestCase`] pairs a name and a body with the outcome of its most recent
//! execution. Cases that declare an [`ExpectedError`] are only correct when the
//! body raises a value of that type.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{CaseResult, MissingError};

/// Signature of a case body.
///
/// The body receives its own case so it can call
/// [`TestCase::set_expected_failure_reason`] while running.
pub type TestFn = fn(&mut TestCase) -> CaseResult;

/// Declared error type of an exception-expectation case
#[derive(Clone, Copy)]
pub struct ExpectedError {
    label: &'static str,
    matches_error: fn(&anyhow::Error) -> bool,
    matches_panic: fn(&(dyn Any + Send)) -> bool,
}

impl ExpectedError {
    /// Expect a value of type `T`, reported as `label` when missing.
    pub const fn of<T>(label: &'static str) -> Self
    where
        T: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self {
            label,
            matches_error: error_is::<T>,
            matches_panic: payload_is::<T>,
        }
    }

    /// Label used in the missing-error reason.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// True if `err` carries a value of the declared type.
    pub fn matches_error(&self, err: &anyhow::Error) -> bool {
        (self.matches_error)(err)
    }

    /// True if a panic payload is a value of the declared type.
    pub fn matches_panic(&self, payload: &(dyn Any + Send)) -> bool {
        (self.matches_panic)(payload)
    }
}

impl fmt::Debug for ExpectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectedError")
            .field("label", &self.label)
            .finish()
    }
}

fn error_is<T>(err: &anyhow::Error) -> bool
where
    T: fmt::Display + fmt::Debug + Send + Sync + 'static,
{
    err.is::<T>()
}

fn payload_is<T: 'static>(payload: &(dyn Any + Send)) -> bool {
    payload.is::<T>()
}

/// Final classification of an executed case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No failure was recorded
    Passed,
    /// Failed with exactly the pinned expected failure reason
    ExpectedFailure,
    /// Any other failure
    Failed,
}

impl Verdict {
    /// Whether this verdict counts toward the passed total.
    pub fn counts_as_passed(self) -> bool {
        !matches!(self, Verdict::Failed)
    }
}

/// One independently reported unit of test logic
pub struct TestCase {
    name: String,
    body: TestFn,
    expected: Option<ExpectedError>,
    location: Option<(&'static str, u32)>,
    passed: bool,
    reason: String,
    expected_reason: String,
}

impl TestCase {
    /// Create a plain case.
    pub fn new(name: impl Into<String>, body: TestFn) -> Self {
        Self {
            name: name.into(),
            body,
            expected: None,
            location: None,
            passed: true,
            reason: String::new(),
            expected_reason: String::new(),
        }
    }

    /// Turn this into an exception-expectation case.
    pub fn expecting(mut self, expected: ExpectedError) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Pin an acceptable failure reason before the case runs.
    pub fn expect_failure(mut self, reason: impl Into<String>) -> Self {
        self.expected_reason = reason.into();
        self
    }

    /// Record where the case was declared.
    pub fn declared_at(mut self, file: &'static str, line: u32) -> Self {
        self.location = Some((file, line));
        self
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration site, when known
    pub fn location(&self) -> Option<(&'static str, u32)> {
        self.location
    }

    /// Declared error type of an exception-expectation case
    pub fn expected_error(&self) -> Option<&ExpectedError> {
        self.expected.as_ref()
    }

    /// False once a failure has been recorded
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Recorded failure reason, empty while passing
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Pinned acceptable failure reason, empty if none
    pub fn expected_failure_reason(&self) -> &str {
        &self.expected_reason
    }

    /// Declare that failing with exactly `reason` counts as a pass.
    pub fn set_expected_failure_reason(&mut self, reason: impl Into<String>) {
        self.expected_reason = reason.into();
    }

    /// Record a failure.
    pub fn set_failed(&mut self, reason: impl Into<String>) {
        self.passed = false;
        self.reason = reason.into();
    }

    /// Clear the outcome of a previous execution.
    ///
    /// The expected failure reason is kept.
    pub fn reset(&mut self) {
        self.passed = true;
        self.reason.clear();
    }

    /// Execute the body.
    pub fn run(&mut self) -> CaseResult {
        let body = self.body;
        body(self)
    }

    /// Execute the body with the case's error expectation applied.
    ///
    /// Without an expectation this is [`TestCase::run`]. With one, a matching
    /// error or panic payload is success, any other error or panic passes
    /// through untouched, and a body that raises nothing yields
    /// [`MissingError`].
    pub fn run_ex(&mut self) -> CaseResult {
        let Some(expected) = self.expected else {
            return self.run();
        };

        match panic::catch_unwind(AssertUnwindSafe(|| self.run())) {
            Ok(Ok(())) => Err(MissingError::new(expected.label()).into()),
            Ok(Err(err)) if expected.matches_error(&err) => Ok(()),
            Ok(Err(err)) => Err(err),
            Err(payload) if expected.matches_panic(payload.as_ref()) => Ok(()),
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Classify the recorded outcome.
    ///
    /// An expected failure requires a non-empty pinned reason equal to the
    /// recorded reason, byte for byte.
    pub fn verdict(&self) -> Verdict {
        if self.passed {
            Verdict::Passed
        } else if !self.expected_reason.is_empty() && self.expected_reason == self.reason {
            Verdict::ExpectedFailure
        } else {
            Verdict::Failed
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("expected", &self.expected)
            .field("passed", &self.passed)
            .field("reason", &self.reason)
            .field("expected_reason", &self.expected_reason)
            .finish()
    }
}
