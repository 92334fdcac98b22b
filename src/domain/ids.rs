//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers a curve query carries. Numeric ids are
//! rendered verbatim into query strings; [`TimeZoneId`] is validated for shape
//! only, the service resolves the actual IANA zone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market data (curve) identifier
///
/// # Examples
///
/// ```
/// use curvequery::domain::ids::MarketDataId;
///
/// let id = MarketDataId::new(100000001);
/// assert_eq!(id.to_string(), "100000001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketDataId(i32);

impl MarketDataId {
    /// Creates a new MarketDataId
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for MarketDataId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for MarketDataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side filter identifier
///
/// A filter id expands into a set of curves on the service, so queries keyed
/// by a filter are never split client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterId(i32);

impl FilterId {
    /// Creates a new FilterId
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for FilterId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side time transform identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformId(i32);

impl TransformId {
    /// Creates a new TransformId
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl From<i32> for TransformId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TransformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// IANA time zone name (e.g. `UTC`, `Europe/Rome`)
///
/// # Examples
///
/// ```
/// use curvequery::domain::ids::TimeZoneId;
/// use std::str::FromStr;
///
/// let tz = TimeZoneId::from_str("Europe/Istanbul").unwrap();
/// assert_eq!(tz.as_str(), "Europe/Istanbul");
/// assert!(TimeZoneId::from_str("Europe Rome").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeZoneId(String);

impl TimeZoneId {
    /// Creates a new TimeZoneId from a string
    ///
    /// # Returns
    ///
    /// Returns `Err` if the name is empty or contains whitespace
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Time zone cannot be empty".to_string());
        }
        if name.chars().any(char::is_whitespace) {
            return Err(format!("Time zone '{name}' cannot contain whitespace"));
        }
        Ok(Self(name))
    }

    /// Returns the time zone name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TimeZoneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TimeZoneId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeZoneId> for String {
    fn from(tz: TimeZoneId) -> Self {
        tz.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_id_display() {
        assert_eq!(MarketDataId::new(100000001).to_string(), "100000001");
        assert_eq!(MarketDataId::from(7).value(), 7);
    }

    #[test]
    fn test_market_data_id_serde_transparent() {
        let ids: Vec<MarketDataId> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(ids, vec![1.into(), 2.into(), 3.into()]);
    }

    #[test]
    fn test_time_zone_validation() {
        assert!(TimeZoneId::new("UTC").is_ok());
        assert!(TimeZoneId::new("").is_err());
        assert!(TimeZoneId::new("   ").is_err());
        assert!(TimeZoneId::new("Europe/ Rome").is_err());
    }

    #[test]
    fn test_time_zone_deserialize_rejects_invalid() {
        let tz: Result<TimeZoneId, _> = serde_json::from_str("\"\"");
        assert!(tz.is_err());

        let tz: TimeZoneId = serde_json::from_str("\"CET\"").unwrap();
        assert_eq!(tz.as_str(), "CET");
    }
}
