//! Chainable setters shared by every query builder
//!
//! Each setter mutates the builder's [`QueryParameters`] in place and returns
//! the builder so calls can be chained. Builders stay usable after
//! `execute`; later calls see every change made in between.

use super::execute::QueryExecutor;
use super::params::QueryParameters;
use super::route::OutboundRequest;
use crate::domain::{
    DateRange, ExtractionRange, FillerPolicy, FilterId, MarketDataId, Period, PeriodRange,
    QueryError, RelativeInterval, TimeZoneId, TransformId,
};
use chrono::NaiveDate;

/// Setters available on every query kind
pub trait QueryBuilder {
    /// Current parameters
    fn params(&self) -> &QueryParameters;

    /// Mutable access for the provided setters
    fn params_mut(&mut self) -> &mut QueryParameters;

    /// Executor used by `requests` and `execute`
    fn executor(&self) -> &QueryExecutor;

    /// Read the given curves, replacing any filter id
    fn for_market_data<I>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<MarketDataId>,
    {
        self.params_mut().set_ids(ids.into_iter().map(Into::into));
        self
    }

    /// Read the curves matched by a filter, replacing any id list
    fn for_filter_id(&mut self, filter: impl Into<FilterId>) -> &mut Self {
        self.params_mut().set_filter(filter.into());
        self
    }

    /// Render timestamps in the given time zone
    fn in_time_zone(&mut self, time_zone: TimeZoneId) -> &mut Self {
        self.params_mut().time_zone = Some(time_zone);
        self
    }

    /// Apply a server-side time transform
    fn with_time_transform(&mut self, transform: TransformId) -> &mut Self {
        self.params_mut().transform = Some(transform);
        self
    }

    /// Extract between two calendar dates
    fn in_absolute_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> &mut Self {
        self.params_mut()
            .set_range(ExtractionRange::DateRange(DateRange::new(start, end)));
        self
    }

    /// Extract over a period relative to now
    fn in_relative_period(&mut self, period: Period) -> &mut Self {
        self.params_mut().set_range(ExtractionRange::Period(period));
        self
    }

    /// Extract between two periods relative to now
    fn in_relative_period_range(&mut self, from: Period, to: Period) -> &mut Self {
        self.params_mut()
            .set_range(ExtractionRange::PeriodRange(PeriodRange::new(from, to)));
        self
    }

    /// Extract over a named relative interval
    fn in_relative_interval(&mut self, interval: RelativeInterval) -> &mut Self {
        self.params_mut()
            .set_range(ExtractionRange::RelativeInterval(interval));
        self
    }

    /// Compile the current state without sending anything
    ///
    /// # Errors
    ///
    /// Returns the configuration error `execute` would raise.
    fn requests(&self) -> Result<Vec<OutboundRequest>, QueryError> {
        self.executor().plan(self.params())
    }
}

/// Filler setters for kinds that support missing-point substitution
pub trait FillerBuilder: QueryBuilder {
    /// Return missing points as null
    fn with_filler_null(&mut self) -> &mut Self {
        self.params_mut().filler = FillerPolicy::Null;
        self
    }

    /// Omit missing points
    fn with_filler_no_fill(&mut self) -> &mut Self {
        self.params_mut().filler = FillerPolicy::NoFill;
        self
    }

    /// Fill with the latest valid value found within `period`
    fn with_filler_latest_value(&mut self, period: Period) -> &mut Self {
        self.params_mut().filler = FillerPolicy::LatestValidValue(period);
        self
    }

    /// Let the service decide
    fn with_default_filler(&mut self) -> &mut Self {
        self.params_mut().filler = FillerPolicy::Unset;
        self
    }
}
