//! Failure signals and harness errors
//!
//! A case body reports failure by returning one of these as an error. The
//! runner is the only place that turns them back into case state.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Result of a case body.
///
/// `Err` carries a [`ConfirmError`], a [`MissingError`], or anything else the
/// body raised. Anything else is reported as an unexpected error.
pub type CaseResult = anyhow::Result<()>;

/// Reason recorded for any error the harness does not recognize.
pub const UNEXPECTED_ERROR: &str = "Unexpected exception thrown";

/// An assertion in a case body did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ConfirmError {
    reason: String,
}

impl ConfirmError {
    /// Failure of a boolean confirmation on `line`.
    pub fn boolean(expected: bool, line: u32) -> Self {
        Self {
            reason: format!("Confirm failed on line {}\nExpected: {}", line, expected),
        }
    }

    /// The text recorded as the case's failure reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A case declared an expected error type and the body raised nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Expected exception type {ex_type} was not thrown")]
pub struct MissingError {
    ex_type: &'static str,
}

impl MissingError {
    /// Missing error of the type labelled `ex_type`.
    pub const fn new(ex_type: &'static str) -> Self {
        Self { ex_type }
    }

    /// Label of the type that was expected.
    pub fn ex_type(&self) -> &'static str {
        self.ex_type
    }
}

/// Errors from the harness itself, never from a case body
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Registration attempted after a run started
    #[error("Registry is frozen: cannot register '{name}' after a run started")]
    RegistryFrozen {
        /// Name of the rejected case
        name: String,
    },

    /// Invalid runner configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (config file, output sink)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Wrap an arbitrary value as a body error.
///
/// The value can be recovered with `anyhow::Error::downcast_ref::<T>()`, which
/// is how declared error types are matched.
pub fn thrown<T>(value: T) -> anyhow::Error
where
    T: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
{
    anyhow::Error::msg(value)
}
