//! Case creation sample suite.
//!
//! Every case here either passes or fails with its pinned reason, so the run
//! reports no failures.

use meretdd::{test_case, test_case_ex, throw};

test_case!("Test can be created", {});

test_case_ex!("Test with throw can be created", i32, {
    throw!(1);
});

test_case!("Test that throws unexpectedly can be created", |t| {
    t.set_expected_failure_reason("Unexpected exception thrown");

    throw!("Unexpected");
});

test_case_ex!("Test that never throws can be created", i32, |t| {
    t.set_expected_failure_reason("Expected exception type i32 was not thrown");
});

test_case_ex!("Test that throws wrong type can be created", i32, |t| {
    t.set_expected_failure_reason("Unexpected exception thrown");

    throw!("Wrong type");
});

test_case!("Test that panics can be created", |t| {
    t.set_expected_failure_reason("Unexpected exception thrown");

    let values: Vec<u32> = Vec::new();
    let _ = values[0];
});

test_case_ex!("Test with panic payload can be created", u8, {
    std::panic::panic_any(3u8);
});

fn main() {
    meretdd::init_logging();
    let failed = meretdd::run_tests(&mut std::io::stdout());
    std::process::exit(failed.min(255) as i32);
}
