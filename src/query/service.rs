//! Entry point for building queries against one curve service

use super::actual::ActualQuery;
use super::auction::AuctionQuery;
use super::bid_ask::BidAskQuery;
use super::execute::QueryExecutor;
use super::market_assessment::MarketAssessmentQuery;
use super::versioned::VersionedQuery;
use crate::adapters::{HttpTransport, Transport};
use crate::config::CurveQueryConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Hands out query builders sharing one transport
///
/// # Example
///
/// ```no_run
/// use curvequery::config::load_config;
/// use curvequery::domain::{Granularity, RelativeInterval};
/// use curvequery::query::{QueryBuilder, QueryService};
/// use tokio::sync::watch;
///
/// # async fn example() -> curvequery::domain::Result<()> {
/// let config = load_config("curvequery.toml")?;
/// let service = QueryService::from_config(&config)?;
/// let (_cancel_tx, cancel) = watch::channel(false);
///
/// let mut query = service.create_actual();
/// query
///     .for_market_data([100000001])
///     .in_granularity(Granularity::Day)
///     .in_relative_interval(RelativeInterval::RollingMonth);
/// let rows = query.execute(&cancel).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct QueryService {
    executor: QueryExecutor,
}

impl QueryService {
    /// Use an explicit transport
    pub fn new(transport: Arc<dyn Transport>, partition_size: usize) -> Self {
        Self {
            executor: QueryExecutor::with_partition_size(transport, partition_size),
        }
    }

    /// Use the HTTP transport described by the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built
    pub fn from_config(config: &CurveQueryConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.service)?;
        tracing::debug!(
            base_url = %config.service.base_url,
            partition_size = config.query.partition_size,
            "Query service created"
        );
        Ok(Self::new(Arc::new(transport), config.query.partition_size))
    }

    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    pub fn create_actual(&self) -> ActualQuery {
        ActualQuery::new(self.executor.clone())
    }

    pub fn create_versioned(&self) -> VersionedQuery {
        VersionedQuery::new(self.executor.clone())
    }

    pub fn create_derived(&self) -> VersionedQuery {
        VersionedQuery::derived(self.executor.clone())
    }

    pub fn create_bid_ask(&self) -> BidAskQuery {
        BidAskQuery::new(self.executor.clone())
    }

    pub fn create_market_assessment(&self) -> MarketAssessmentQuery {
        MarketAssessmentQuery::new(self.executor.clone())
    }

    pub fn create_auction(&self) -> AuctionQuery {
        AuctionQuery::new(self.executor.clone())
    }
}
