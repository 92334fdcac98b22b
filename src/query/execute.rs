//! Execution fan-out
//!
//! Every call to [`QueryExecutor::execute`] is a fresh cycle: validate,
//! partition, compile each partition, dispatch all of them concurrently and
//! concatenate the rows. Nothing is cached between calls.

use super::params::QueryParameters;
use super::partition::{PartitionByIds, PartitionStrategy};
use super::route::{compile, OutboundRequest};
use super::validate::validate;
use crate::adapters::transport::{cancelled, Transport};
use crate::domain::{CurveQueryError, QueryError, Result, TransportError};
use crate::{log_execution_complete, log_partition_dispatch};
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Validate, partition and compile one query
///
/// # Errors
///
/// Returns the first configuration error found; no partition is built
/// when validation fails.
pub fn plan(
    params: &QueryParameters,
    partitioner: &dyn PartitionStrategy,
) -> std::result::Result<Vec<OutboundRequest>, QueryError> {
    validate(params)?;
    partitioner.partition(params).iter().map(compile).collect()
}

/// Dispatches compiled queries through a transport
#[derive(Clone)]
pub struct QueryExecutor {
    transport: Arc<dyn Transport>,
    partitioner: Arc<dyn PartitionStrategy>,
}

impl QueryExecutor {
    /// Create an executor with an explicit partition strategy
    pub fn new(transport: Arc<dyn Transport>, partitioner: Arc<dyn PartitionStrategy>) -> Self {
        Self {
            transport,
            partitioner,
        }
    }

    /// Create an executor that splits id lists into chunks of `max_ids`
    pub fn with_partition_size(transport: Arc<dyn Transport>, max_ids: usize) -> Self {
        Self::new(transport, Arc::new(PartitionByIds::new(max_ids)))
    }

    /// Validate, partition and compile without sending anything
    ///
    /// # Errors
    ///
    /// See [`plan`].
    pub fn plan(
        &self,
        params: &QueryParameters,
    ) -> std::result::Result<Vec<OutboundRequest>, QueryError> {
        plan(params, self.partitioner.as_ref())
    }

    /// Execute a query and return the raw JSON rows of every partition
    ///
    /// Rows of one partition keep the order the transport returned them in;
    /// no order is guaranteed across partitions.
    ///
    /// # Errors
    ///
    /// - [`CurveQueryError::Query`] before any request is sent
    /// - [`CurveQueryError::Transport`] if any partition fails; rows of the
    ///   partitions that already succeeded are discarded
    /// - [`CurveQueryError::Cancelled`] if `cancel` is raised
    pub async fn execute_raw(
        &self,
        params: &QueryParameters,
        cancel: &watch::Receiver<bool>,
    ) -> Result<Vec<Value>> {
        let started = Instant::now();
        let requests = self.plan(params)?;
        let total = requests.len();

        if *cancel.borrow() {
            return Err(CurveQueryError::Cancelled);
        }

        let calls = requests.iter().enumerate().map(|(index, request)| {
            let cancel = cancel.clone();
            async move {
                log_partition_dispatch!(index, total, request.path);
                tokio::select! {
                    biased;
                    _ = cancelled(cancel.clone()) => Err(CurveQueryError::Cancelled),
                    result = self.transport.send(request, cancel) => match result {
                        Ok(payload) => Ok(payload.into_rows()),
                        Err(TransportError::Cancelled) => Err(CurveQueryError::Cancelled),
                        Err(e) => {
                            tracing::error!(
                                partition = index,
                                path = %request.path,
                                error = %e,
                                "Partition request failed"
                            );
                            Err(CurveQueryError::Transport(e))
                        }
                    }
                }
            }
        });

        let rows: Vec<Value> = try_join_all(calls).await?.into_iter().flatten().collect();

        log_execution_complete!(params.kind(), total, rows.len(), started.elapsed());

        Ok(rows)
    }

    /// Execute a query and decode every row into `R`
    ///
    /// # Errors
    ///
    /// As [`QueryExecutor::execute_raw`], plus
    /// [`TransportError::InvalidResponse`] for rows that do not decode.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        params: &QueryParameters,
        cancel: &watch::Receiver<bool>,
    ) -> Result<Vec<R>> {
        self.execute_raw(params, cancel)
            .await?
            .into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| {
                    CurveQueryError::Transport(TransportError::InvalidResponse(e.to_string()))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::transport::Payload;
    use crate::domain::{
        ExtractionRange, FilterId, Granularity, MarketDataId, QueryKind, RelativeInterval,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Echoes one row per requested id and records every request
    #[derive(Default)]
    struct EchoTransport {
        sent: Mutex<Vec<OutboundRequest>>,
    }

    #[async_trait]
    impl Transport for EchoTransport {
        async fn send(
            &self,
            request: &OutboundRequest,
            _cancel: watch::Receiver<bool>,
        ) -> std::result::Result<Payload, TransportError> {
            self.sent.lock().unwrap().push(request.clone());
            let rows = request
                .values("id")
                .into_iter()
                .map(|id| serde_json::json!({ "id": id.parse::<i32>().unwrap() }))
                .collect::<Vec<_>>();
            if rows.is_empty() {
                Ok(Payload::Empty)
            } else {
                Ok(Payload::Rows(rows))
            }
        }
    }

    /// Never answers
    struct HangingTransport;

    #[async_trait]
    impl Transport for HangingTransport {
        async fn send(
            &self,
            _request: &OutboundRequest,
            _cancel: watch::Receiver<bool>,
        ) -> std::result::Result<Payload, TransportError> {
            std::future::pending().await
        }
    }

    fn actual(ids: impl IntoIterator<Item = i32>) -> QueryParameters {
        let mut params = QueryParameters::new(QueryKind::Actual);
        params.set_ids(ids.into_iter().map(MarketDataId::new));
        params.granularity = Some(Granularity::Day);
        params.set_range(ExtractionRange::RelativeInterval(
            RelativeInterval::RollingMonth,
        ));
        params
    }

    #[derive(serde::Deserialize)]
    struct IdRow {
        id: i32,
    }

    #[tokio::test]
    async fn test_execute_concatenates_partitions() {
        let transport = Arc::new(EchoTransport::default());
        let executor = QueryExecutor::with_partition_size(transport.clone(), 2);
        let (_tx, rx) = watch::channel(false);

        let rows: Vec<IdRow> = executor.execute(&actual(1..=5), &rx).await.unwrap();

        let mut ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(transport.sent.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_payload_contributes_no_rows() {
        let transport = Arc::new(EchoTransport::default());
        let executor = QueryExecutor::with_partition_size(transport, 25);
        let (_tx, rx) = watch::channel(false);

        let mut params = actual([1]);
        params.set_filter(FilterId::new(3));

        let rows = executor.execute_raw(&params, &rx).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_query_sends_nothing() {
        let transport = Arc::new(EchoTransport::default());
        let executor = QueryExecutor::with_partition_size(transport.clone(), 25);
        let (_tx, rx) = watch::channel(false);

        let mut params = actual([1, 2]);
        params.range = None;

        let result = executor.execute_raw(&params, &rx).await;
        assert!(matches!(
            result,
            Err(CurveQueryError::Query(QueryError::MissingExtractionRange))
        ));
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_already_cancelled_sends_nothing() {
        let transport = Arc::new(EchoTransport::default());
        let executor = QueryExecutor::with_partition_size(transport.clone(), 25);
        let (_tx, rx) = watch::channel(true);

        let result = executor.execute_raw(&actual([1]), &rx).await;
        assert!(matches!(result, Err(CurveQueryError::Cancelled)));
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_partitions() {
        let executor = QueryExecutor::with_partition_size(Arc::new(HangingTransport), 1);
        let (tx, rx) = watch::channel(false);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        });

        let result = tokio::time::timeout(
            Duration::from_secs(2),
            executor.execute_raw(&actual([1, 2, 3]), &rx),
        )
        .await
        .expect("execution should stop once cancelled");
        assert!(matches!(result, Err(CurveQueryError::Cancelled)));
    }

    #[tokio::test]
    async fn test_undecodable_rows_fail() {
        let executor = QueryExecutor::with_partition_size(Arc::new(EchoTransport::default()), 25);
        let (_tx, rx) = watch::channel(false);

        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            missing: String,
        }

        let result = executor.execute::<Strict>(&actual([1]), &rx).await;
        assert!(matches!(
            result,
            Err(CurveQueryError::Transport(TransportError::InvalidResponse(_)))
        ));
    }
}
