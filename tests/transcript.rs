//! End-to-end check of the run transcript.
//!
//! Runs the declared cases into a buffer and compares the full report. Exits
//! non-zero when the report or the failure count differ.

use meretdd::{confirm_false, confirm_true, test_case, test_case_ex, throw};

const CONFIRM_LINE: u32 = line!() + 4;

test_case!("Confirm failure matches its pinned reason", |t| {
    t.set_expected_failure_reason(confirm_reason(CONFIRM_LINE));
    confirm_true!(false);
});

test_case!("Empty body passes", {});

test_case!("Confirms in order pass", {
    confirm_false!(false);
    confirm_true!(true);
});

test_case_ex!("Declared error type is thrown", i32, {
    throw!(1);
});

test_case!("Mismatched pinned reason fails", |t| {
    t.set_expected_failure_reason("boom");
    t.set_failed("bam");
});

test_case!("Unused pinned reason passes", |t| {
    t.set_expected_failure_reason("never happens");
});

fn confirm_reason(line: u32) -> String {
    format!("Confirm failed on line {}\nExpected: true", line)
}

fn expected_transcript() -> String {
    format!(
        "Running 6 tests\n\
         -------------\n\
         Confirm failure matches its pinned reason\n\
         Expected failure\n\
         {}\n\
         -------------\n\
         Empty body passes\n\
         Passed\n\
         -------------\n\
         Confirms in order pass\n\
         Passed\n\
         -------------\n\
         Declared error type is thrown\n\
         Passed\n\
         -------------\n\
         Mismatched pinned reason fails\n\
         Failed\n\
         bam\n\
         -------------\n\
         Unused pinned reason passes\n\
         Passed\n\
         -------------\n\
         Passed tests: 5\n\
         Failed tests: 1\n",
        confirm_reason(CONFIRM_LINE)
    )
}

fn main() {
    meretdd::init_logging();

    let mut out = Vec::new();
    let failed = meretdd::run_tests(&mut out);
    let actual = String::from_utf8_lossy(&out);
    let expected = expected_transcript();

    if failed != 1 || actual != expected {
        eprintln!("failed count: {} (expected 1)", failed);
        eprintln!("--- expected ---\n{}--- actual ---\n{}", expected, actual);
        std::process::exit(1);
    }
    println!("{}", actual);
}
