//! MereTdd - a minimal self-registering unit-test harness
//!
//! Cases are declared with [`test_case!`] and [`test_case_ex!`], check their
//! expectations with [`confirm_true!`] and [`confirm_false!`], and are run in
//! declaration order by [`run_tests`], which returns the number of failed
//! cases.
//!
//! # Quick Start
//!
//! ```ignore
//! use meretdd::{confirm_false, confirm_true, test_case, test_case_ex, throw};
//!
//! test_case!("Test will pass without any confirms", {});
//!
//! test_case!("Test passing grades", {
//!     confirm_false!(is_passing_grade(0));
//!     confirm_true!(is_passing_grade(100));
//! });
//!
//! test_case_ex!("Test with throw can be created", i32, {
//!     throw!(1);
//! });
//!
//! fn main() {
//!     let failed = meretdd::run_tests(&mut std::io::stdout());
//!     std::process::exit(failed as i32);
//! }
//! ```
//!
//! # Architecture
//!
//! `meretdd-core` defines cases and failure signals; `meretdd-runner` owns the
//! registry, the declaration macros and the runner. This crate re-exports both.

pub use meretdd_core::*;
pub use meretdd_runner::*;
