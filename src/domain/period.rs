//! ISO-8601 period text
//!
//! The service accepts relative windows as ISO-8601 durations whose
//! components may individually be negative (`P-4M`, `P1Y-2D`, `PT-6H`).
//! [`Period`] keeps the caller's text verbatim so that route rendering is
//! byte-stable, and only checks the shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

fn period_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^P(?:-?\d+Y)?(?:-?\d+M)?(?:-?\d+W)?(?:-?\d+D)?(?:T(?:-?\d+H)?(?:-?\d+M)?(?:-?\d+(?:\.\d+)?S)?)?$",
        )
        .expect("period pattern is a valid regex")
    })
}

/// A relative duration such as `P5D` or `P-4M`
///
/// # Examples
///
/// ```
/// use curvequery::domain::Period;
/// use std::str::FromStr;
///
/// let period = Period::from_str("P-4M").unwrap();
/// assert!(period.is_negative());
/// assert_eq!(period.as_str(), "P-4M");
///
/// assert!(Period::from_str("5 days").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period(String);

impl Period {
    /// Parses an ISO-8601 period
    ///
    /// # Returns
    ///
    /// Returns `Err` if the text is not a period with at least one component
    pub fn new(text: impl Into<String>) -> Result<Self, String> {
        let text = text.into();
        let has_component = text.chars().any(|c| c.is_ascii_digit());
        let dangling_time = text.ends_with('T');
        if !has_component || dangling_time || !period_pattern().is_match(&text) {
            return Err(format!("'{text}' is not an ISO-8601 period"));
        }
        Ok(Self(text))
    }

    /// Whether any component subtracts time
    pub fn is_negative(&self) -> bool {
        self.0.contains('-')
    }

    /// Returns the period text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Period {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("P5D" ; "days")]
    #[test_case("P2W" ; "weeks")]
    #[test_case("P-4M" ; "negative months")]
    #[test_case("P1Y2M3D" ; "combined date")]
    #[test_case("PT15M" ; "minutes")]
    #[test_case("P1DT-6H" ; "negative hours")]
    #[test_case("PT0.5S" ; "fractional seconds")]
    fn test_valid_periods(text: &str) {
        let period = Period::new(text).unwrap();
        assert_eq!(period.as_str(), text);
    }

    #[test_case("" ; "empty")]
    #[test_case("P" ; "bare designator")]
    #[test_case("PT" ; "bare time designator")]
    #[test_case("P1DT" ; "dangling time designator")]
    #[test_case("5D" ; "missing designator")]
    #[test_case("P5X" ; "unknown unit")]
    #[test_case("P1D2Y" ; "out of order")]
    fn test_invalid_periods(text: &str) {
        assert!(Period::new(text).is_err());
    }

    #[test]
    fn test_negative_detection() {
        assert!(Period::new("P-1D").unwrap().is_negative());
        assert!(Period::new("P1DT-1H").unwrap().is_negative());
        assert!(!Period::new("P1D").unwrap().is_negative());
    }

    #[test]
    fn test_period_deserialize() {
        let period: Period = serde_json::from_str("\"P20D\"").unwrap();
        assert_eq!(period.to_string(), "P20D");
        assert!(serde_json::from_str::<Period>("\"twenty days\"").is_err());
    }
}
