//! Confirmation macros
//!
//! Each macro returns early from the enclosing case body with an error, so the
//! first failing confirmation skips the rest of the body. They can only be
//! used in functions returning [`CaseResult`](crate::CaseResult).

/// Fail the current case unless `actual` is true.
///
/// ```ignore
/// confirm_true!(is_passing_grade(60));
/// ```
#[macro_export]
macro_rules! confirm_true {
    ($actual:expr $(,)?) => {
        if !($actual) {
            return ::core::result::Result::Err(::core::convert::Into::into(
                $crate::ConfirmError::boolean(true, ::core::line!()),
            ));
        }
    };
}

/// Fail the current case unless `actual` is false.
#[macro_export]
macro_rules! confirm_false {
    ($actual:expr $(,)?) => {
        if $actual {
            return ::core::result::Result::Err(::core::convert::Into::into(
                $crate::ConfirmError::boolean(false, ::core::line!()),
            ));
        }
    };
}

/// Raise an arbitrary value from the current case body.
///
/// Exception-expectation cases match the value's type.
///
/// ```ignore
/// throw!(1);
/// throw!("Unexpected");
/// ```
#[macro_export]
macro_rules! throw {
    ($value:expr $(,)?) => {
        return ::core::result::Result::Err($crate::thrown($value))
    };
}

#[cfg(test)]
mod tests {
    use crate::{CaseResult, ConfirmError};

    fn check(flag: bool) -> CaseResult {
        confirm_true!(flag);
        confirm_false!(!flag);
        Ok(())
    }

    fn throw_int() -> CaseResult {
        throw!(5);
    }

    #[test]
    fn test_confirm_passes_through() {
        assert!(check(true).is_ok());
    }

    #[test]
    fn test_confirm_true_reports_its_line() {
        fn body() -> CaseResult {
            confirm_true!(1 + 1 == 3);
            Ok(())
        }
        let line = line!() - 3;
        let err = body().unwrap_err();
        let confirm = err.downcast_ref::<ConfirmError>().unwrap();
        assert_eq!(
            confirm.reason(),
            format!("Confirm failed on line {}\nExpected: true", line)
        );
    }

    #[test]
    fn test_confirm_false_reason() {
        fn body() -> CaseResult {
            confirm_false!(true);
            Ok(())
        }
        let line = line!() - 3;
        let err = body().unwrap_err();
        let confirm = err.downcast_ref::<ConfirmError>().unwrap();
        assert_eq!(
            confirm.reason(),
            format!("Confirm failed on line {}\nExpected: false", line)
        );
    }

    #[test]
    fn test_first_failure_stops_body() {
        fn body(hits: &mut u32) -> CaseResult {
            *hits += 1;
            confirm_true!(false);
            *hits += 1;
            Ok(())
        }
        let mut hits = 0;
        assert!(body(&mut hits).is_err());
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_throw_carries_value() {
        let err = throw_int().unwrap_err();
        assert_eq!(err.downcast_ref::<i32>(), Some(&5));
    }
}
