//! Route compilation
//!
//! Turns validated [`QueryParameters`] into an [`OutboundRequest`]: the path
//! `{prefix}/[{version}/]{granularity?}/{range}` plus ordered query pairs.
//! The range and version compilers are pure and independent of each other.

pub mod query_string;
pub mod range;
pub mod version;

pub use query_string::{encode, query_pairs};
pub use range::range_route;
pub use version::{version_limit, version_route};

use crate::domain::QueryError;
use crate::query::params::QueryParameters;
use std::fmt;

/// HTTP method of an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
        }
    }
}

/// A compiled request, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: Method,
    /// Path relative to the service root, without a leading slash
    pub path: String,
    /// Query parameters in rendering order; names may repeat
    pub query: Vec<(String, String)>,
}

impl OutboundRequest {
    /// Percent-encoded query string
    pub fn query_string(&self) -> String {
        encode(&self.query)
    }

    /// `path?query`, or just the path when there are no parameters
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string())
        }
    }

    /// Values of a repeated parameter, in order
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

impl fmt::Display for OutboundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path_and_query())
    }
}

/// Compile one set of parameters into a request
///
/// Expects parameters that passed [`crate::query::validate::validate`]; the
/// only error it can still raise is a `LastOf*` selection without a window.
pub fn compile(params: &QueryParameters) -> Result<OutboundRequest, QueryError> {
    let kind = params.kind();
    let mut segments = vec![kind.route_prefix().to_string()];

    if kind.uses_version() {
        let selection = params
            .version
            .as_ref()
            .ok_or_else(|| QueryError::MissingVersionSelection {
                kind: kind.to_string(),
            })?;
        segments.push(version_route(selection)?);
    }

    if kind.uses_granularity() {
        let granularity = params
            .granularity
            .ok_or_else(|| QueryError::MissingGranularity {
                kind: kind.to_string(),
            })?;
        segments.push(granularity.to_string());
    }

    let range = params
        .range
        .as_ref()
        .ok_or(QueryError::MissingExtractionRange)?;
    segments.push(range_route(range));

    Ok(OutboundRequest {
        method: Method::Get,
        path: segments.join("/"),
        query: query_pairs(params),
    })
}
