//! Adapters to the curve service
//!
//! [`Transport`] is the seam between query compilation and the network;
//! [`HttpTransport`] is the production implementation.

pub mod http;
pub mod transport;

pub use http::HttpTransport;
pub use transport::{cancelled, Payload, Transport};
