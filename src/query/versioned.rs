//! Versioned and derived time-series queries (`vts`)
//!
//! Both kinds share the version grammar: the route carries a version
//! selector between the prefix and the granularity segment.

use super::builder::{FillerBuilder, QueryBuilder};
use super::execute::QueryExecutor;
use super::params::QueryParameters;
use crate::domain::{
    FillerPolicy, FillerValue, Granularity, QueryKind, Result, VersionSelection, VersionWindow,
    VersionedRow,
};
use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::watch;

/// Builder for versioned and derived series
#[derive(Clone)]
pub struct VersionedQuery {
    params: QueryParameters,
    executor: QueryExecutor,
}

impl VersionedQuery {
    /// Query over versioned curves
    pub fn new(executor: QueryExecutor) -> Self {
        Self::with_kind(QueryKind::Versioned, executor)
    }

    /// Query over derived curves
    pub fn derived(executor: QueryExecutor) -> Self {
        Self::with_kind(QueryKind::Derived, executor)
    }

    fn with_kind(kind: QueryKind, executor: QueryExecutor) -> Self {
        Self {
            params: QueryParameters::new(kind),
            executor,
        }
    }

    /// Aggregation granularity of the returned points
    pub fn in_granularity(&mut self, granularity: Granularity) -> &mut Self {
        self.params.granularity = Some(granularity);
        self
    }

    /// Read the last `n` versions
    pub fn for_last_n(&mut self, n: u32) -> &mut Self {
        self.params.set_version(VersionSelection::LastN(n));
        self
    }

    /// Read the most recent version within `window`
    ///
    /// [`VersionWindow::none`] selects the most recent version overall.
    pub fn for_most_recent(&mut self, window: VersionWindow) -> &mut Self {
        self.params.set_version(VersionSelection::MostRecent(window));
        self
    }

    /// Read the last version of each day within `window`
    pub fn for_last_of_days(&mut self, window: VersionWindow) -> &mut Self {
        self.params.set_version(VersionSelection::LastOfDays(window));
        self
    }

    /// Read the last version of each month within `window`
    pub fn for_last_of_months(&mut self, window: VersionWindow) -> &mut Self {
        self.params.set_version(VersionSelection::LastOfMonths(window));
        self
    }

    /// Read the most-up-to-date value across all versions
    pub fn for_muv(&mut self) -> &mut Self {
        self.params.set_version(VersionSelection::Muv { limit: None });
        self
    }

    /// Read the most-up-to-date value among versions up to `limit`
    pub fn for_muv_until(&mut self, limit: NaiveDateTime) -> &mut Self {
        self.params
            .set_version(VersionSelection::Muv { limit: Some(limit) });
        self
    }

    /// Read one exact version
    pub fn for_version(&mut self, version: NaiveDateTime) -> &mut Self {
        self.params.set_version(VersionSelection::Version(version));
        self
    }

    /// Anchor a relative extraction range to `date` instead of today
    pub fn with_analysis_date(&mut self, date: NaiveDate) -> &mut Self {
        self.params.analysis_date = Some(date);
        self
    }

    /// Fill missing points with a fixed value
    pub fn with_filler_custom_value(&mut self, value: f64) -> &mut Self {
        self.params.filler = FillerPolicy::CustomValue(FillerValue::Scalar(value));
        self
    }

    /// Validate, compile and dispatch the current configuration
    ///
    /// # Errors
    ///
    /// See [`QueryExecutor::execute_raw`].
    pub async fn execute(&self, cancel: &watch::Receiver<bool>) -> Result<Vec<VersionedRow>> {
        self.executor.execute(&self.params, cancel).await
    }
}

impl QueryBuilder for VersionedQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }

    fn params_mut(&mut self) -> &mut QueryParameters {
        &mut self.params
    }

    fn executor(&self) -> &QueryExecutor {
        &self.executor
    }
}

impl FillerBuilder for VersionedQuery {}
