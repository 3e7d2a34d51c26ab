//! Case execution and the run transcript
//!
//! ## Transcript
//!
//! ```text
//! Running 2 tests
//! -------------
//! Test can be created
//! Passed
//! -------------
//! Test that throws unexpectedly can be created
//! Expected failure
//! Unexpected exception thrown
//! -------------
//! All test passed.
//! ```
//!
//! The format is fixed. Per case the last lines are `Passed`,
//! `Expected failure` plus the reason, or `Failed` plus the reason. When any
//! case failed, the footer lists `Passed tests: <p>` and `Failed tests: <f>`.

use std::any::Any;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use meretdd_core::{ConfirmError, MissingError, TestCase, Verdict, UNEXPECTED_ERROR};
use tracing::{debug, info, warn};

use crate::config::RunnerConfig;

const SEPARATOR: &str = "-------------";

/// Counts from one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cases executed
    pub total: usize,
    /// Cases counted as passed, including expected failures
    pub passed: usize,
    /// Cases reported as failed
    pub failed: usize,
    /// Cases that failed with their pinned reason
    pub expected_failures: usize,
}

impl RunSummary {
    /// True if no case was reported as failed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, verdict: Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Passed => self.passed += 1,
            Verdict::ExpectedFailure => {
                self.passed += 1;
                self.expected_failures += 1;
            }
            Verdict::Failed => self.failed += 1,
        }
    }
}

/// Execute `cases` in order, writing the transcript to `output`.
///
/// Never fails: every case error is absorbed at its own boundary, and sink
/// errors only stop the transcript.
pub(crate) fn run_cases(
    cases: &mut [TestCase],
    config: &RunnerConfig,
    output: &mut dyn Write,
) -> RunSummary {
    let mut transcript = Transcript::new(output);
    let mut summary = RunSummary::default();

    info!(total = cases.len(), "Starting test run");
    transcript.line(format_args!("Running {} tests", cases.len()));

    for case in cases.iter_mut() {
        transcript.line(format_args!("{}", SEPARATOR));
        transcript.line(format_args!("{}", case.name()));

        execute(case, config);

        let verdict = case.verdict();
        summary.record(verdict);
        debug!(
            name = case.name(),
            location = ?case.location(),
            verdict = ?verdict,
            "Case finished"
        );

        match verdict {
            Verdict::Passed => transcript.line(format_args!("Passed")),
            Verdict::ExpectedFailure => {
                transcript.line(format_args!("Expected failure\n{}", case.reason()))
            }
            Verdict::Failed => transcript.line(format_args!("Failed\n{}", case.reason())),
        }
    }

    transcript.line(format_args!("{}", SEPARATOR));
    if summary.all_passed() {
        transcript.line(format_args!("All test passed."));
    } else {
        transcript.line(format_args!(
            "Passed tests: {}\nFailed tests: {}",
            summary.passed, summary.failed
        ));
    }
    transcript.flush();

    info!(
        passed = summary.passed,
        failed = summary.failed,
        expected_failures = summary.expected_failures,
        "Test run complete"
    );
    summary
}

/// Run one case inside its failure boundary and record the outcome.
fn execute(case: &mut TestCase, config: &RunnerConfig) {
    case.reset();

    let outcome = {
        let _quiet = config.quiet_panics.then(QuietPanics::install);
        panic::catch_unwind(AssertUnwindSafe(|| case.run_ex()))
    };

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => case.set_failed(failure_reason(&err)),
        Err(payload) => {
            debug!(
                name = case.name(),
                panic = panic_message(payload.as_ref()),
                "Case body panicked"
            );
            case.set_failed(UNEXPECTED_ERROR);
        }
    }
}

/// Reason recorded for an error returned by a case body.
fn failure_reason(err: &anyhow::Error) -> String {
    if let Some(confirm) = err.downcast_ref::<ConfirmError>() {
        confirm.reason().to_string()
    } else if let Some(missing) = err.downcast_ref::<MissingError>() {
        missing.to_string()
    } else {
        debug!(error = %err, "Discarding unexpected error detail");
        UNEXPECTED_ERROR.to_string()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "(non-string panic)"
    }
}

#[allow(deprecated)]
type PanicHook = Box<dyn Fn(&panic::PanicInfo<'_>) + Sync + Send + 'static>;

/// Replaces the panic hook with a silent one until dropped.
///
/// The hook is process-global. The runner executes one case at a time on one
/// thread; panics raised by other threads while a case runs are silenced too.
struct QuietPanics {
    previous: Option<PanicHook>,
}

impl QuietPanics {
    fn install() -> Self {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(previous);
        }
    }
}

/// Line writer over the output sink.
///
/// The first write error is logged and silences the rest of the transcript.
struct Transcript<'a> {
    out: &'a mut dyn Write,
    failed: bool,
}

impl<'a> Transcript<'a> {
    fn new(out: &'a mut dyn Write) -> Self {
        Self { out, failed: false }
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        let result = writeln!(self.out, "{}", args);
        self.check(result);
    }

    fn flush(&mut self) {
        let result = self.out.flush();
        self.check(result);
    }

    fn check(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if !self.failed {
                warn!(error = %e, "Output sink failed, transcript truncated");
            }
            self.failed = true;
        }
    }
}
