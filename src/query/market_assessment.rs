//! Market assessment queries (`mas`)

use super::builder::{FillerBuilder, QueryBuilder};
use super::execute::QueryExecutor;
use super::params::QueryParameters;
use crate::domain::{
    FillerPolicy, FillerValue, MarketAssessmentFillerValue, MarketAssessmentRow, QueryKind,
    Result,
};
use tokio::sync::watch;

/// Builder for market assessment series
#[derive(Clone)]
pub struct MarketAssessmentQuery {
    params: QueryParameters,
    executor: QueryExecutor,
}

impl MarketAssessmentQuery {
    pub fn new(executor: QueryExecutor) -> Self {
        Self {
            params: QueryParameters::new(QueryKind::MarketAssessment),
            executor,
        }
    }

    /// Products to read, replacing any previous list
    pub fn for_products<I>(&mut self, products: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.params.products = Some(products.into_iter().map(Into::into).collect());
        self
    }

    /// Fill missing points with fixed assessment values
    pub fn with_filler_custom_value(&mut self, value: MarketAssessmentFillerValue) -> &mut Self {
        self.params.filler = FillerPolicy::CustomValue(FillerValue::MarketAssessment(value));
        self
    }

    /// Validate, compile and dispatch the current configuration
    ///
    /// # Errors
    ///
    /// See [`QueryExecutor::execute_raw`].
    pub async fn execute(
        &self,
        cancel: &watch::Receiver<bool>,
    ) -> Result<Vec<MarketAssessmentRow>> {
        self.executor.execute(&self.params, cancel).await
    }
}

impl QueryBuilder for MarketAssessmentQuery {
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

impl FillerBuilder for MarketAssessmentQuery {}
