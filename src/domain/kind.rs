//! Query kinds and time granularity
//!
//! The kind fixes the route prefix of a query and which options it accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family of curve a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Actual,
    Versioned,
    Derived,
    BidAsk,
    MarketAssessment,
    Auction,
}

impl QueryKind {
    /// First path segment of every route of this kind
    ///
    /// Derived curves are served by the versioned endpoint.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            QueryKind::Actual => "ts",
            QueryKind::Versioned | QueryKind::Derived => "vts",
            QueryKind::BidAsk => "ba",
            QueryKind::MarketAssessment => "mas",
            QueryKind::Auction => "auction",
        }
    }

    /// Whether the route carries a granularity segment
    pub fn uses_granularity(&self) -> bool {
        matches!(
            self,
            QueryKind::Actual | QueryKind::Versioned | QueryKind::Derived
        )
    }

    /// Whether a version selection is required
    pub fn uses_version(&self) -> bool {
        matches!(self, QueryKind::Versioned | QueryKind::Derived)
    }

    /// Whether an analysis date may be set
    pub fn supports_analysis_date(&self) -> bool {
        self.uses_version()
    }

    /// Whether a product list is required
    pub fn requires_products(&self) -> bool {
        matches!(self, QueryKind::BidAsk | QueryKind::MarketAssessment)
    }

    /// Whether a filler policy may be set
    pub fn supports_filler(&self) -> bool {
        !matches!(self, QueryKind::Auction)
    }

    /// Human-readable name used in error messages and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Actual => "actual",
            QueryKind::Versioned => "versioned",
            QueryKind::Derived => "derived",
            QueryKind::BidAsk => "bid_ask",
            QueryKind::MarketAssessment => "market_assessment",
            QueryKind::Auction => "auction",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time granularity of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Minute,
    FiveMinute,
    TenMinute,
    FifteenMinute,
    ThirtyMinute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// Route token for this granularity
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Minute => "Minute",
            Granularity::FiveMinute => "FiveMinute",
            Granularity::TenMinute => "TenMinute",
            Granularity::FifteenMinute => "FifteenMinute",
            Granularity::ThirtyMinute => "ThirtyMinute",
            Granularity::Hour => "Hour",
            Granularity::Day => "Day",
            Granularity::Week => "Week",
            Granularity::Month => "Month",
            Granularity::Quarter => "Quarter",
            Granularity::Year => "Year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Minute" => Ok(Granularity::Minute),
            "FiveMinute" => Ok(Granularity::FiveMinute),
            "TenMinute" => Ok(Granularity::TenMinute),
            "FifteenMinute" => Ok(Granularity::FifteenMinute),
            "ThirtyMinute" => Ok(Granularity::ThirtyMinute),
            "Hour" => Ok(Granularity::Hour),
            "Day" => Ok(Granularity::Day),
            "Week" => Ok(Granularity::Week),
            "Month" => Ok(Granularity::Month),
            "Quarter" => Ok(Granularity::Quarter),
            "Year" => Ok(Granularity::Year),
            _ => Err(format!("Unknown granularity: {s}")),
        }
    }
}
