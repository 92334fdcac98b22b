//! Integration tests for the HTTP transport against a mock curve service

use curvequery::adapters::{HttpTransport, Payload, Transport};
use curvequery::config::{api_key, RetryConfig, ServiceConfig};
use curvequery::domain::{Granularity, RelativeInterval, TransportError};
use curvequery::query::{QueryBuilder, QueryService};
use mockito::{Matcher, Server};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn service_config(base_url: &str, max_retries: usize) -> ServiceConfig {
    ServiceConfig {
        base_url: base_url.to_string(),
        api_key: Some(api_key("test-key")),
        timeout_seconds: 5,
        retry: RetryConfig {
            max_retries,
            initial_delay_ms: 10,
            max_delay_ms: 50,
            backoff_multiplier: 2.0,
        },
    }
}

fn rolling_month_request() -> curvequery::query::OutboundRequest {
    let service = QueryService::new(
        Arc::new(HttpTransport::new(&service_config("http://localhost", 0)).unwrap()),
        25,
    );
    let mut query = service.create_actual();
    query
        .for_market_data([100000001])
        .in_granularity(Granularity::Day)
        .in_relative_interval(RelativeInterval::RollingMonth);
    query.requests().unwrap().remove(0)
}

#[tokio::test]
async fn test_rows_are_returned() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ts/Day/RollingMonth")
        .match_query(Matcher::UrlEncoded("id".into(), "100000001".into()))
        .match_header("x-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(
            r#"[{"providerName":"P","curveName":"C","id":100000001,"time":"2018-01-01T00:00:00+01:00","value":42.5}]"#,
        )
        .create_async()
        .await;

    let transport = HttpTransport::new(&service_config(&server.url(), 0)).unwrap();
    let (_tx, cancel) = watch::channel(false);

    let payload = transport
        .send(&rolling_month_request(), cancel)
        .await
        .unwrap();

    mock.assert_async().await;
    let rows = payload.into_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["value"], 42.5);
}

#[tokio::test]
async fn test_rows_decode_through_query() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/ts/Day/RollingMonth")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"providerName":"P","curveName":"C","id":100000001,"time":"2018-01-01T00:00:00+01:00","value":null}]"#,
        )
        .create_async()
        .await;

    let transport = HttpTransport::new(&service_config(&server.url(), 0)).unwrap();
    let service = QueryService::new(Arc::new(transport), 25);
    let mut query = service.create_actual();
    query
        .for_market_data([100000001])
        .in_granularity(Granularity::Day)
        .in_relative_interval(RelativeInterval::RollingMonth);

    let (_tx, cancel) = watch::channel(false);
    let rows = query.execute(&cancel).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].curve_name, "C");
    assert!(rows[0].value.is_none());
}

#[tokio::test]
async fn test_no_content_is_empty() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/ts/Day/RollingMonth")
        .match_query(Matcher::Any)
        .with_status(204)
        .create_async()
        .await;

    let transport = HttpTransport::new(&service_config(&server.url(), 0)).unwrap();
    let (_tx, cancel) = watch::channel(false);

    let payload = transport
        .send(&rolling_month_request(), cancel)
        .await
        .unwrap();

    assert_eq!(payload, Payload::Empty);
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ts/Day/RollingMonth")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .expect(3)
        .create_async()
        .await;

    let transport = HttpTransport::new(&service_config(&server.url(), 2)).unwrap();
    let (_tx, cancel) = watch::channel(false);

    let result = transport.send(&rolling_month_request(), cancel).await;

    mock.assert_async().await;
    assert!(matches!(
        result,
        Err(TransportError::ServerError { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ts/Day/RollingMonth")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("bad period")
        .expect(1)
        .create_async()
        .await;

    let transport = HttpTransport::new(&service_config(&server.url(), 3)).unwrap();
    let (_tx, cancel) = watch::channel(false);

    let result = transport.send(&rolling_month_request(), cancel).await;

    mock.assert_async().await;
    match result {
        Err(TransportError::ClientError { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "bad period");
        }
        other => panic!("expected a client error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_content_type_is_rejected() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/ts/Day/RollingMonth")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/x-msgpack")
        .with_body(vec![0x90])
        .create_async()
        .await;

    let transport = HttpTransport::new(&service_config(&server.url(), 0)).unwrap();
    let (_tx, cancel) = watch::channel(false);

    let result = transport.send(&rolling_month_request(), cancel).await;

    assert!(matches!(
        result,
        Err(TransportError::UnsupportedContentType(_))
    ));
}

#[tokio::test]
async fn test_cancel_during_backoff() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/ts/Day/RollingMonth")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let mut config = service_config(&server.url(), 5);
    config.retry.initial_delay_ms = 10_000;
    config.retry.max_delay_ms = 10_000;
    let transport = HttpTransport::new(&config).unwrap();
    let (tx, cancel) = watch::channel(false);

    let request = rolling_month_request();
    let send = transport.send(&request, cancel);
    let trigger = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        tx.send(true).unwrap();
    };

    let (result, ()) = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(send, trigger)
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(TransportError::Cancelled)));
}
