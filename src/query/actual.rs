//! Actual time-series queries (`ts`)

use super::builder::{FillerBuilder, QueryBuilder};
use super::execute::QueryExecutor;
use super::params::QueryParameters;
use crate::domain::{ActualRow, FillerPolicy, FillerValue, Granularity, QueryKind, Result};
use tokio::sync::watch;

/// Builder for actual series
#[derive(Clone)]
pub struct ActualQuery {
    params: QueryParameters,
    executor: QueryExecutor,
}

impl ActualQuery {
    pub fn new(executor: QueryExecutor) -> Self {
        Self {
            params: QueryParameters::new(QueryKind::Actual),
            executor,
        }
    }

    /// Aggregation granularity of the returned points
    pub fn in_granularity(&mut self, granularity: Granularity) -> &mut Self {
        self.params.granularity = Some(granularity);
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
    pub async fn execute(&self, cancel: &watch::Receiver<bool>) -> Result<Vec<ActualRow>> {
        self.executor.execute(&self.params, cancel).await
    }
}

impl QueryBuilder for ActualQuery {
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

impl FillerBuilder for ActualQuery {}
