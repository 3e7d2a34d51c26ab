//! Registration and running for MereTdd
//!
//! Declare cases anywhere in a binary with [`test_case!`] or [`test_case_ex!`],
//! then call [`run_tests`] once from `main`:
//!
//! ```ignore
//! use meretdd_runner::{confirm_true, test_case};
//!
//! test_case!("Test passing grades", {
//!     confirm_true!(is_passing_grade(60));
//! });
//!
//! fn main() {
//!     let failed = meretdd_runner::run_tests(&mut std::io::stdout());
//!     std::process::exit(failed as i32);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod declare;
pub mod logging;
pub mod registry;
pub mod runner;

pub use config::RunnerConfig;
pub use declare::{declarations, CaseDecl};
pub use logging::init_logging;
pub use registry::{run_tests, Registry};
pub use runner::RunSummary;

// Core types, re-exported so the declaration macros resolve through this crate
pub use meretdd_core::{
    confirm_false, confirm_true, throw, thrown, CaseResult, ConfirmError, ExpectedError,
    HarnessError, MissingError, TestCase, TestFn, Verdict, UNEXPECTED_ERROR,
};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
