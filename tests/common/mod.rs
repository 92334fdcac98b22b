//! Shared test transport

use async_trait::async_trait;
use curvequery::adapters::{Payload, Transport};
use curvequery::domain::TransportError;
use curvequery::query::OutboundRequest;
use std::sync::Mutex;
use tokio::sync::watch;

/// Records every request and answers with one row per `id` parameter
///
/// Requests carrying an id listed in `fail_ids` fail with a 500.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<OutboundRequest>>,
    pub fail_ids: Vec<String>,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn failing_on_id(id: i32) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_ids: vec![id.to_string()],
        }
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        request: &OutboundRequest,
        _cancel: watch::Receiver<bool>,
    ) -> Result<Payload, TransportError> {
        self.sent.lock().unwrap().push(request.clone());

        let ids = request.values("id");
        if ids.iter().any(|id| self.fail_ids.iter().any(|failing| failing.as_str() == *id)) {
            return Err(TransportError::ServerError {
                status: 500,
                message: "boom".to_string(),
            });
        }

        let rows: Vec<serde_json::Value> = ids
            .into_iter()
            .map(|id| {
                serde_json::json!({
                    "providerName": "Provider",
                    "curveName": format!("Curve {id}"),
                    "id": id.parse::<i32>().unwrap(),
                    "time": "2018-01-01T00:00:00+01:00",
                    "value": 1.0
                })
            })
            .collect();

        if rows.is_empty() {
            Ok(Payload::Empty)
        } else {
            Ok(Payload::Rows(rows))
        }
    }
}
