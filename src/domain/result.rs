//! Result type alias for curvequery
//!
//! This module provides a convenient Result type alias that uses
//! [`CurveQueryError`] as the error type.

use super::errors::CurveQueryError;

/// Result type alias for curvequery operations
///
/// # Examples
///
/// ```
/// use curvequery::domain::result::Result;
/// use curvequery::domain::errors::CurveQueryError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CurveQueryError::Configuration("boom".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CurveQueryError>;
