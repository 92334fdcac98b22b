//! Integration tests for concurrent partition dispatch

mod common;

use async_trait::async_trait;
use common::RecordingTransport;
use curvequery::adapters::{Payload, Transport};
use curvequery::domain::{
    CurveQueryError, ExtractionRange, Granularity, MarketDataId, QueryKind, RelativeInterval,
    TransportError,
};
use curvequery::query::{OutboundRequest, QueryExecutor, QueryParameters};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Barrier};

fn actual(count: i32) -> QueryParameters {
    let mut params = QueryParameters::new(QueryKind::Actual);
    params.set_ids((1..=count).map(MarketDataId::new));
    params.granularity = Some(Granularity::Day);
    params.set_range(ExtractionRange::RelativeInterval(
        RelativeInterval::RollingMonth,
    ));
    params
}

/// Holds every request until `parties` requests are in flight at once
struct RendezvousTransport {
    barrier: Barrier,
}

#[async_trait]
impl Transport for RendezvousTransport {
    async fn send(
        &self,
        _request: &OutboundRequest,
        _cancel: watch::Receiver<bool>,
    ) -> Result<Payload, TransportError> {
        self.barrier.wait().await;
        Ok(Payload::Empty)
    }
}

/// Blocks until cancelled and counts the requests it saw
#[derive(Default)]
struct BlockingTransport {
    started: AtomicUsize,
    observed_cancel: AtomicUsize,
}

#[async_trait]
impl Transport for BlockingTransport {
    async fn send(
        &self,
        _request: &OutboundRequest,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<Payload, TransportError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let _ = cancel.wait_for(|raised| *raised).await;
        self.observed_cancel.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::Cancelled)
    }
}

#[tokio::test]
async fn test_partitions_are_dispatched_concurrently() {
    let transport = Arc::new(RendezvousTransport {
        barrier: Barrier::new(3),
    });
    let executor = QueryExecutor::with_partition_size(transport, 10);
    let (_tx, cancel) = watch::channel(false);

    // Sequential dispatch would never release the barrier
    let rows = tokio::time::timeout(
        Duration::from_secs(5),
        executor.execute_raw(&actual(30), &cancel),
    )
    .await
    .expect("partitions should be in flight together")
    .unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_one_failed_partition_fails_execution() {
    // Partitions are 1-10, 11-20 and 21-25; only the middle one fails
    let transport = Arc::new(RecordingTransport::failing_on_id(11));
    let executor = QueryExecutor::with_partition_size(transport.clone(), 10);
    let (_tx, cancel) = watch::channel(false);

    let requests = executor.plan(&actual(25)).unwrap();
    assert_eq!(requests.len(), 3);
    assert!(!requests[0].values("id").contains(&"11"));
    assert!(requests[1].values("id").contains(&"11"));
    assert!(!requests[2].values("id").contains(&"11"));

    let result = executor.execute_raw(&actual(25), &cancel).await;

    // Rows of the first partition were produced but are not returned
    assert!(matches!(
        result,
        Err(CurveQueryError::Transport(TransportError::ServerError { status: 500, .. }))
    ));
    let sent = transport.requests();
    assert!(sent.iter().any(|r| r.values("id").contains(&"1")));
    assert!(sent.iter().any(|r| r.values("id").contains(&"11")));
}

#[tokio::test]
async fn test_healthy_partitions_succeed_without_failing_id() {
    let transport = Arc::new(RecordingTransport::failing_on_id(99));
    let executor = QueryExecutor::with_partition_size(transport, 10);
    let (_tx, cancel) = watch::channel(false);

    let rows = executor.execute_raw(&actual(25), &cancel).await.unwrap();

    assert_eq!(rows.len(), 25);
}

#[tokio::test]
async fn test_rows_of_all_partitions_are_concatenated() {
    let transport = Arc::new(RecordingTransport::default());
    let executor = QueryExecutor::with_partition_size(transport.clone(), 4);
    let (_tx, cancel) = watch::channel(false);

    let rows = executor.execute_raw(&actual(10), &cancel).await.unwrap();

    assert_eq!(rows.len(), 10);
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn test_cancel_reaches_every_partition() {
    let transport = Arc::new(BlockingTransport::default());
    let executor = QueryExecutor::with_partition_size(transport.clone(), 1);
    let (tx, cancel) = watch::channel(false);

    let handle = {
        let executor = executor.clone();
        tokio::spawn(async move { executor.execute_raw(&actual(4), &cancel).await })
    };

    while transport.started.load(Ordering::SeqCst) < 4 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    tx.send(true).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(result, Err(CurveQueryError::Cancelled)));
}

#[tokio::test]
async fn test_raised_signal_issues_nothing() {
    let transport = Arc::new(RecordingTransport::default());
    let executor = QueryExecutor::with_partition_size(transport.clone(), 5);
    let (_tx, cancel) = watch::channel(true);

    let result = executor.execute_raw(&actual(20), &cancel).await;

    assert!(matches!(result, Err(CurveQueryError::Cancelled)));
    assert!(transport.requests().is_empty());
}
