//! Transport trait definition
//!
//! The query engine decides *which* requests to send; a [`Transport`]
//! decides *how*: connection handling, authentication, retries and wire
//! decoding all live behind this trait.

use crate::domain::TransportError;
use crate::query::route::OutboundRequest;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;

/// Rows returned for one request
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The service reported no content
    Empty,
    /// One JSON object per data point
    Rows(Vec<Value>),
}

impl Payload {
    /// Rows of the payload, empty for [`Payload::Empty`]
    pub fn into_rows(self) -> Vec<Value> {
        match self {
            Payload::Empty => Vec::new(),
            Payload::Rows(rows) => rows,
        }
    }
}

/// Trait for curve service transports
///
/// # Example
///
/// ```no_run
/// use curvequery::adapters::{Payload, Transport};
/// use curvequery::domain::TransportError;
/// use curvequery::query::route::OutboundRequest;
/// use async_trait::async_trait;
/// use tokio::sync::watch;
///
/// struct Offline;
///
/// #[async_trait]
/// impl Transport for Offline {
///     async fn send(
///         &self,
///         _request: &OutboundRequest,
///         _cancel: watch::Receiver<bool>,
///     ) -> Result<Payload, TransportError> {
///         Ok(Payload::Empty)
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one compiled request
    ///
    /// `cancel` flips to `true` when the caller aborts the execution; the
    /// same signal is handed to every partition of that execution.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for network failures, non-success
    /// statuses, unsupported content types and undecodable bodies.
    async fn send(
        &self,
        request: &OutboundRequest,
        cancel: watch::Receiver<bool>,
    ) -> Result<Payload, TransportError>;
}

/// Resolve once the signal is raised; never resolve if the sender is gone
pub async fn cancelled(mut cancel: watch::Receiver<bool>) {
    let closed = cancel.wait_for(|raised| *raised).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}
