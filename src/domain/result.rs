//! Result type alias for Careline
//!
//! Provides a convenient Result type alias that uses CarelineError as the
//! error type.

use super::errors::CarelineError;

/// Result type alias for Careline operations
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use careline::domain::result::Result;
/// use careline::domain::errors::CarelineError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CarelineError::EmptyCart)
/// }
/// ```
pub type Result<T> = std::result::Result<T, CarelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CarelineError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(CarelineError::NotAuthenticated);
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
