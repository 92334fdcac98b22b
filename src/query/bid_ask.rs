//! Bid/ask queries (`ba`)

use super::builder::{FillerBuilder, QueryBuilder};
use super::execute::QueryExecutor;
use super::params::QueryParameters;
use crate::domain::{BidAskFillerValue, BidAskRow, FillerPolicy, FillerValue, QueryKind, Result};
use tokio::sync::watch;

/// Builder for bid/ask series
///
/// The route carries no granularity; products such as `M+1` select the
/// delivery periods to read.
#[derive(Clone)]
pub struct BidAskQuery {
    params: QueryParameters,
    executor: QueryExecutor,
}

impl BidAskQuery {
    pub fn new(executor: QueryExecutor) -> Self {
        Self {
            params: QueryParameters::new(QueryKind::BidAsk),
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

    /// Fill missing points with fixed bid/ask values
    pub fn with_filler_custom_value(&mut self, value: BidAskFillerValue) -> &mut Self {
        self.params.filler = FillerPolicy::CustomValue(FillerValue::BidAsk(value));
        self
    }

    /// Validate, compile and dispatch the current configuration
    ///
    /// # Errors
    ///
    /// See [`QueryExecutor::execute_raw`].
    pub async fn execute(&self, cancel: &watch::Receiver<bool>) -> Result<Vec<BidAskRow>> {
        self.executor.execute(&self.params, cancel).await
    }
}

impl QueryBuilder for BidAskQuery {
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

impl FillerBuilder for BidAskQuery {}
