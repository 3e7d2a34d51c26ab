//! Core types for MereTdd
//!
//! This crate defines what a single test case is and how its body signals
//! failure:
//! - TestCase: name, body and outcome of one case
//! - ExpectedError: declared error type of an exception-expectation case
//! - Verdict: final classification of an executed case
//! - ConfirmError / MissingError: failure signals returned by case bodies
//! - confirm_true!, confirm_false!, throw!: body-side macros
//!
//! Registration and running live in `meretdd-runner`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
mod confirm;
pub mod error;

pub use case::{ExpectedError, TestCase, TestFn, Verdict};
pub use error::{
    thrown, CaseResult, ConfirmError, HarnessError, MissingError, Result, UNEXPECTED_ERROR,
};
