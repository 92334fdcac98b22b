//! Version selection for versioned and derived curves
//!
//! `MostRecent`, `LastOfDays` and `LastOfMonths` each carry a
//! [`VersionWindow`] holding up to three optional inner configurations. A
//! correct caller sets at most one of them; when more are present they are
//! resolved by a fixed priority (date range, then period, then period range)
//! so that the rendered route is deterministic rather than arbitrary.

use super::period::Period;
use super::range::{DateRange, PeriodRange};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used for version and version-limit rendering
pub const VERSION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Inner window of a `MostRecent`/`LastOf*` selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionWindow {
    pub date_range: Option<DateRange>,
    pub period: Option<Period>,
    pub period_range: Option<PeriodRange>,
}

/// The inner window that wins priority resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedWindow<'a> {
    DateRange(&'a DateRange),
    Period(&'a Period),
    PeriodRange(&'a PeriodRange),
    Bare,
}

impl VersionWindow {
    /// A window with nothing set (the bare `MostRecent` form)
    pub fn none() -> Self {
        Self::default()
    }

    /// A window bounded by calendar dates
    pub fn date_range(range: DateRange) -> Self {
        Self {
            date_range: Some(range),
            ..Self::default()
        }
    }

    /// A window bounded by a single period
    pub fn period(period: Period) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }

    /// A window bounded by two periods
    pub fn period_range(range: PeriodRange) -> Self {
        Self {
            period_range: Some(range),
            ..Self::default()
        }
    }

    /// Whether no inner configuration is set
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.period.is_none() && self.period_range.is_none()
    }

    /// First match wins: date range, period, period range, bare
    pub fn resolve(&self) -> ResolvedWindow<'_> {
        if let Some(range) = &self.date_range {
            ResolvedWindow::DateRange(range)
        } else if let Some(period) = &self.period {
            ResolvedWindow::Period(period)
        } else if let Some(range) = &self.period_range {
            ResolvedWindow::PeriodRange(range)
        } else {
            ResolvedWindow::Bare
        }
    }
}

/// Which recorded version(s) of a curve to read
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSelection {
    /// The last N versions
    LastN(u32),
    /// The most recent version, optionally bounded by a window
    MostRecent(VersionWindow),
    /// The last version of each day within the window
    LastOfDays(VersionWindow),
    /// The last version of each month within the window
    LastOfMonths(VersionWindow),
    /// Most-up-to-date value across versions, optionally capped
    Muv {
        #[serde(default)]
        limit: Option<NaiveDateTime>,
    },
    /// One exact version
    Version(NaiveDateTime),
}

impl VersionSelection {
    /// Route token of the selector
    pub fn selector(&self) -> &'static str {
        match self {
            VersionSelection::LastN(_) => "LastN",
            VersionSelection::MostRecent(_) => "MostRecent",
            VersionSelection::LastOfDays(_) => "LastOfDays",
            VersionSelection::LastOfMonths(_) => "LastOfMonths",
            VersionSelection::Muv { .. } => "MUV",
            VersionSelection::Version(_) => "Version",
        }
    }

    /// Inner window of the selections that carry one
    pub fn window(&self) -> Option<&VersionWindow> {
        match self {
            VersionSelection::MostRecent(window)
            | VersionSelection::LastOfDays(window)
            | VersionSelection::LastOfMonths(window) => Some(window),
            _ => None,
        }
    }
}
