//! Test registry
//!
//! A [`Registry`] holds cases in registration order and moves through two
//! phases:
//!
//! 1. Registering: cases may be added
//! 2. Frozen: the first run froze it; cases may run again but no new ones
//!    are accepted
//!
//! The process-wide registry is built from every `test_case!` /
//! `test_case_ex!` declaration the first time [`run_tests`] is called.
//! Local registries built with [`Registry::new`] serve embedders and tests.

use std::fmt;
use std::io::Write;

use meretdd_core::{ExpectedError, HarnessError, Result, TestCase, TestFn};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::config::RunnerConfig;
use crate::declare::declarations;
use crate::runner::{run_cases, RunSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Registering,
    Frozen,
}

/// Ordered collection of test cases
pub struct Registry {
    cases: Vec<TestCase>,
    phase: Phase,
}

impl Registry {
    /// Create an empty registry open for registration.
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            phase: Phase::Registering,
        }
    }

    /// Create a registry holding every declared case, in declaration order.
    pub fn from_declarations() -> Self {
        let cases = declarations()
            .into_iter()
            .map(|decl| decl.instantiate())
            .collect::<Vec<_>>();
        info!(count = cases.len(), "Collected declared test cases");
        Self {
            cases,
            phase: Phase::Registering,
        }
    }

    /// Append a case.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::RegistryFrozen`] once a run has started.
    pub fn register(&mut self, case: TestCase) -> Result<&mut TestCase> {
        if self.phase == Phase::Frozen {
            warn!(name = case.name(), "Rejected registration into frozen registry");
            return Err(HarnessError::RegistryFrozen {
                name: case.name().to_string(),
            });
        }
        let index = self.cases.len();
        self.cases.push(case);
        Ok(&mut self.cases[index])
    }

    /// Build and register a plain case.
    pub fn case(&mut self, name: impl Into<String>, body: TestFn) -> Result<&mut TestCase> {
        self.register(TestCase::new(name, body))
    }

    /// Build and register a case that must raise a `T`, labelled `label`.
    pub fn case_ex<T>(
        &mut self,
        name: impl Into<String>,
        label: &'static str,
        body: TestFn,
    ) -> Result<&mut TestCase>
    where
        T: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.register(TestCase::new(name, body).expecting(ExpectedError::of::<T>(label)))
    }

    /// Stop accepting registrations.
    pub fn freeze(&mut self) {
        self.phase = Phase::Frozen;
    }

    /// Whether registration is closed.
    pub fn is_frozen(&self) -> bool {
        self.phase == Phase::Frozen
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True if no case is registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Registered cases, in registration order.
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Run every case with `config`, writing the transcript to `output`.
    ///
    /// Freezes the registry.
    pub fn run_with(&mut self, config: &RunnerConfig, output: &mut dyn Write) -> RunSummary {
        self.freeze();
        run_cases(&mut self.cases, config, output)
    }

    /// Run every case with the loaded configuration and return the number of
    /// failed cases.
    pub fn run(&mut self, output: &mut dyn Write) -> usize {
        let config = RunnerConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring runner configuration");
            RunnerConfig::default()
        });
        self.run_with(&config, output).failed
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("cases", &self.cases.len())
            .field("phase", &self.phase)
            .finish()
    }
}

/// Process-wide registry of declared cases
static GLOBAL_REGISTRY: Lazy<Mutex<Registry>> =
    Lazy::new(|| Mutex::new(Registry::from_declarations()));

/// Run every declared case, writing the transcript to `output`.
///
/// Returns the number of cases reported as failed; 0 means success. Suitable
/// as a process exit status.
///
/// # Panics
///
/// Panics if called from inside a case body while a run is in progress.
pub fn run_tests(output: &mut dyn Write) -> usize {
    let Some(mut registry) = GLOBAL_REGISTRY.try_lock() else {
        panic!("run_tests called while a run is already in progress");
    };
    registry.run(output)
}
