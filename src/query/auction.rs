//! Auction queries (`auction`)

use super::builder::QueryBuilder;
use super::execute::QueryExecutor;
use super::params::QueryParameters;
use crate::domain::{AuctionRow, QueryKind, Result};
use tokio::sync::watch;

/// Builder for auction curves
///
/// Auction routes carry neither granularity nor filler.
#[derive(Clone)]
pub struct AuctionQuery {
    params: QueryParameters,
    executor: QueryExecutor,
}

impl AuctionQuery {
    pub fn new(executor: QueryExecutor) -> Self {
        Self {
            params: QueryParameters::new(QueryKind::Auction),
            executor,
        }
    }

    /// Validate, compile and dispatch the current configuration
    ///
    /// # Errors
    ///
    /// See [`QueryExecutor::execute_raw`].
    pub async fn execute(&self, cancel: &watch::Receiver<bool>) -> Result<Vec<AuctionRow>> {
        self.executor.execute(&self.params, cancel).await
    }
}

impl QueryBuilder for AuctionQuery {
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
