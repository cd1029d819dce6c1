//! Precondition check helpers
//!
//! A check takes a value and a predicate; if the predicate holds the
//! operation fails with a validation error carrying the supplied message.
//! Checks chain with `?`, so they run in declared order and the first
//! failure prevents later checks from evaluating.

use credits_core::{AppError, AppResult};

/// Fail with a validation error when `predicate` holds for `value`.
pub fn check<T, F>(value: &T, predicate: F, message: &str) -> AppResult<()>
where
    F: FnOnce(&T) -> bool,
{
    if predicate(value) {
        Err(AppError::validation(message))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_passes_when_predicate_is_false() {
        assert!(check(&5, |n| *n < 0, "must not be negative").is_ok());
    }

    #[test]
    fn test_check_fails_with_message() {
        let err = check(&-1, |n| *n < 0, "must not be negative").unwrap_err();
        assert_eq!(err.to_string(), "must not be negative");
    }

    #[test]
    fn test_chain_stops_at_first_failure() {
        fn run(value: &Option<i32>) -> AppResult<()> {
            check(value, |v| v.is_none(), "value is required")?;
            check(value, |v| v.is_some_and(|n| n < 0), "value must not be negative")?;
            Ok(())
        }

        // Missing value reports the first failing check only
        let err = run(&None).unwrap_err();
        assert_eq!(err.to_string(), "value is required");

        let err = run(&Some(-3)).unwrap_err();
        assert_eq!(err.to_string(), "value must not be negative");

        assert!(run(&Some(3)).is_ok());
    }
}
