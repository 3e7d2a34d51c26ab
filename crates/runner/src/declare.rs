//! Case declarations
//!
//! [`test_case!`](crate::test_case) and [`test_case_ex!`](crate::test_case_ex)
//! turn a body into a `CaseDecl` static submitted to `inventory`. Nothing is
//! called at startup; the global registry collects every declaration the
//! first time it is used and orders them by declaration site.

use meretdd_core::{ExpectedError, TestCase, TestFn};

/// A case declared in source
#[derive(Debug, Clone, Copy)]
pub struct CaseDecl {
    /// Display name
    pub name: &'static str,
    /// Declaring file
    pub file: &'static str,
    /// Declaring line
    pub line: u32,
    /// Declaring column, breaks ties between declarations on one line
    pub column: u32,
    /// Declared error type, for exception-expectation cases
    pub expected: Option<ExpectedError>,
    /// Case body
    pub body: TestFn,
}

impl CaseDecl {
    /// Create a declaration.
    pub const fn new(
        name: &'static str,
        file: &'static str,
        line: u32,
        column: u32,
        expected: Option<ExpectedError>,
        body: TestFn,
    ) -> Self {
        Self {
            name,
            file,
            line,
            column,
            expected,
            body,
        }
    }

    /// Build a fresh case from this declaration.
    pub fn instantiate(&self) -> TestCase {
        let case = TestCase::new(self.name, self.body).declared_at(self.file, self.line);
        match self.expected {
            Some(expected) => case.expecting(expected),
            None => case,
        }
    }

    fn site(&self) -> (&'static str, u32, u32) {
        (self.file, self.line, self.column)
    }
}

inventory::collect!(CaseDecl);

/// Every declared case, in declaration order.
///
/// `inventory` yields the most recently registered declaration first, so the
/// list is reversed before the stable sort. Declarations sharing a site, such
/// as several produced by one user macro call, keep their expansion order.
pub fn declarations() -> Vec<&'static CaseDecl> {
    let mut decls: Vec<&'static CaseDecl> = inventory::iter::<CaseDecl>.into_iter().collect();
    decls.reverse();
    decls.sort_by_key(|decl| decl.site());
    decls
}

/// Declare a test case.
///
/// The body is a block that may use `confirm_true!`, `confirm_false!`,
/// `throw!` and `?`. Name the case handle to reach it from the body:
///
/// ```ignore
/// test_case!("Test passing grades", {
///     confirm_false!(is_passing_grade(0));
/// });
///
/// test_case!("Test that throws unexpectedly can be created", |t| {
///     t.set_expected_failure_reason("Unexpected exception thrown");
///     throw!("Unexpected");
/// });
/// ```
#[macro_export]
macro_rules! test_case {
    ($name:expr, |$case:ident| $body:block $(,)?) => {
        $crate::__declare_case!($name, ::core::option::Option::None, |$case| $body);
    };
    ($name:expr, $body:block $(,)?) => {
        $crate::__declare_case!($name, ::core::option::Option::None, |_case| $body);
    };
}

/// Declare a test case that is only correct if its body raises a `$ty`.
///
/// ```ignore
/// test_case_ex!("Test with throw can be created", i32, {
///     throw!(1);
/// });
/// ```
#[macro_export]
macro_rules! test_case_ex {
    ($name:expr, $ty:ty, |$case:ident| $body:block $(,)?) => {
        $crate::__declare_case!(
            $name,
            ::core::option::Option::Some($crate::ExpectedError::of::<$ty>(::core::stringify!($ty))),
            |$case| $body
        );
    };
    ($name:expr, $ty:ty, $body:block $(,)?) => {
        $crate::test_case_ex!($name, $ty, |_case| $body);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __declare_case {
    ($name:expr, $expected:expr, |$case:ident| $body:block) => {
        const _: () = {
            #[allow(unused_variables, unreachable_code, clippy::diverging_sub_expression)]
            fn body($case: &mut $crate::TestCase) -> $crate::CaseResult {
                $body;
                ::core::result::Result::Ok(())
            }

            $crate::__private::inventory::submit! {
                $crate::CaseDecl::new(
                    $name,
                    ::core::file!(),
                    ::core::line!(),
                    ::core::column!(),
                    $expected,
                    body,
                )
            }
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use meretdd_core::CaseResult;

    fn empty(_: &mut TestCase) -> CaseResult {
        Ok(())
    }

    macro_rules! two_cases {
        () => {
            crate::test_case!("same site, declared first", {});
            crate::test_case!("same site, declared second", {});
        };
    }

    two_cases!();

    #[test]
    fn test_same_site_keeps_expansion_order() {
        let names: Vec<_> = declarations()
            .into_iter()
            .map(|decl| decl.name)
            .filter(|name| name.starts_with("same site"))
            .collect();
        assert_eq!(
            names,
            vec!["same site, declared first", "same site, declared second"]
        );
    }

    #[test]
    fn test_instantiate_plain() {
        let decl = CaseDecl::new("plain", "a.rs", 3, 1, None, empty);
        let case = decl.instantiate();
        assert_eq!(case.name(), "plain");
        assert_eq!(case.location(), Some(("a.rs", 3)));
        assert!(case.expected_error().is_none());
        assert!(case.passed());
    }

    #[test]
    fn test_instantiate_expecting() {
        let decl = CaseDecl::new(
            "ex",
            "a.rs",
            9,
            1,
            Some(ExpectedError::of::<i32>("i32")),
            empty,
        );
        let case = decl.instantiate();
        assert_eq!(case.expected_error().map(|e| e.label()), Some("i32"));
    }

    #[test]
    fn test_site_orders_by_file_line_column() {
        let a = CaseDecl::new("a", "a.rs", 10, 5, None, empty);
        let b = CaseDecl::new("b", "a.rs", 10, 9, None, empty);
        let c = CaseDecl::new("c", "a.rs", 2, 1, None, empty);
        let d = CaseDecl::new("d", "b.rs", 1, 1, None, empty);
        let mut decls = vec![d, b, a, c];
        decls.sort_by_key(|decl| decl.site());
        let names: Vec<_> = decls.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["c", "a", "b", "d"]);
    }
}
