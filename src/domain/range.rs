//! Extraction range selection
//!
//! An extraction range is exactly one of four shapes. Modelling it as a sum
//! type means a previously selected variant can never leak into the route
//! once another one replaces it.

use super::period::Period;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar date format used in routes and query strings
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Absolute calendar window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the window
    pub start: NaiveDate,
    /// Day after the last day of the window
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new date range
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `end` is strictly after `start`
    pub fn is_ordered(&self) -> bool {
        self.end > self.start
    }
}

/// Window between two durations relative to now
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodRange {
    /// Start offset
    pub from: Period,
    /// End offset
    pub to: Period,
}

impl PeriodRange {
    /// Create a new period range
    pub fn new(from: Period, to: Period) -> Self {
        Self { from, to }
    }
}

/// Named rolling or to-date window understood by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativeInterval {
    RollingWeek,
    RollingMonth,
    RollingQuarter,
    RollingYear,
    WeekToDate,
    MonthToDate,
    QuarterToDate,
    YearToDate,
}

impl RelativeInterval {
    /// Route token for this interval
    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeInterval::RollingWeek => "RollingWeek",
            RelativeInterval::RollingMonth => "RollingMonth",
            RelativeInterval::RollingQuarter => "RollingQuarter",
            RelativeInterval::RollingYear => "RollingYear",
            RelativeInterval::WeekToDate => "WeekToDate",
            RelativeInterval::MonthToDate => "MonthToDate",
            RelativeInterval::QuarterToDate => "QuarterToDate",
            RelativeInterval::YearToDate => "YearToDate",
        }
    }
}

impl fmt::Display for RelativeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelativeInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RollingWeek" => Ok(RelativeInterval::RollingWeek),
            "RollingMonth" => Ok(RelativeInterval::RollingMonth),
            "RollingQuarter" => Ok(RelativeInterval::RollingQuarter),
            "RollingYear" => Ok(RelativeInterval::RollingYear),
            "WeekToDate" => Ok(RelativeInterval::WeekToDate),
            "MonthToDate" => Ok(RelativeInterval::MonthToDate),
            "QuarterToDate" => Ok(RelativeInterval::QuarterToDate),
            "YearToDate" => Ok(RelativeInterval::YearToDate),
            _ => Err(format!("Unknown relative interval: {s}")),
        }
    }
}

/// The extraction window of a query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionRange {
    /// Absolute calendar dates
    DateRange(DateRange),
    /// A single duration anchored to now
    Period(Period),
    /// Two durations anchored to now
    PeriodRange(PeriodRange),
    /// A named interval
    RelativeInterval(RelativeInterval),
}

impl ExtractionRange {
    /// Whether the window is anchored to now rather than to calendar dates
    pub fn is_relative(&self) -> bool {
        !matches!(self, ExtractionRange::DateRange(_))
    }
}
