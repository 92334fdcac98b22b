//! Domain error types
//!
//! This module defines the error hierarchy for curvequery. Configuration
//! mistakes detected before any network activity are [`QueryError`]s, failures
//! reported by the transport are [`TransportError`]s, and both surface through
//! the top-level [`CurveQueryError`]. None of them expose third-party types.

use thiserror::Error;

/// Main curvequery error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum CurveQueryError {
    /// Configuration file or settings errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Query configuration rejected before dispatch
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Failure reported by the transport for one of the partitions
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Execution aborted through the cancellation signal
    #[error("Execution cancelled")]
    Cancelled,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Query configuration errors
///
/// Raised synchronously by the validator or the route compilers. A query that
/// fails with one of these never reaches the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Neither an identifier list nor a filter id was set
    #[error("Either a market data id list or a filter id must be provided")]
    MissingIdentifiers,

    /// The identifier list was set but is empty
    #[error("Market data id list cannot be empty")]
    EmptyIdentifierList,

    /// Both an identifier list and a filter id were provided
    #[error("Market data ids and filter id are mutually exclusive")]
    ConflictingIdentifiers,

    /// No extraction range was selected
    #[error("Extraction range must be provided")]
    MissingExtractionRange,

    /// Absolute date range whose end is not after its start
    #[error("Invalid date range: end {end} must be after start {start}")]
    InvalidDateRange { start: String, end: String },

    /// No granularity for a kind whose route carries one
    #[error("Granularity must be provided for {kind} queries")]
    MissingGranularity { kind: String },

    /// No version selection for a versioned or derived query
    #[error("Version selection must be provided for {kind} queries")]
    MissingVersionSelection { kind: String },

    /// LastOfDays/LastOfMonths without any inner window
    #[error("{selector} requires a date range, period or period range")]
    MissingVersionWindow { selector: String },

    /// LastN with a zero count
    #[error("LastN version selection requires a count greater than zero")]
    InvalidLastN,

    /// No product list for bid/ask or market assessment queries
    #[error("Products must be provided for {kind} queries")]
    MissingProducts { kind: String },

    /// Latest-value filler with a negative period
    #[error("Filler period {0} must not be negative")]
    NegativeFillerPeriod(String),

    /// Custom-value filler without a usable payload
    #[error("Custom filler value must not be empty")]
    EmptyCustomFillerValue,

    /// Custom-value payload whose shape does not match the query kind
    #[error("Custom filler value shape does not match {kind} queries")]
    FillerShapeMismatch { kind: String },

    /// Analysis date combined with an absolute date range
    #[error("Analysis date can only be combined with a relative extraction range")]
    AnalysisDateWithAbsoluteRange,

    /// Option set on a kind that does not accept it
    #[error("{option} is not supported for {kind} queries")]
    UnsupportedOption { option: String, kind: String },

    /// Malformed scalar input (period text, time zone, product name)
    #[error("Invalid {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Transport errors
///
/// Errors that occur while sending a compiled request to the curve service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Failed to reach the service
    #[error("Failed to connect to curve service: {0}")]
    ConnectionFailed(String),

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Response carried a content type the transport cannot decode
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body could not be decoded into rows
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// The cancellation signal fired while the request was in flight
    #[error("Request cancelled")]
    Cancelled,
}

impl TransportError {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::ConnectionFailed(_)
                | TransportError::Timeout(_)
                | TransportError::ServerError { .. }
        )
    }
}

impl From<std::io::Error> for CurveQueryError {
    fn from(err: std::io::Error) -> Self {
        CurveQueryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CurveQueryError {
    fn from(err: serde_json::Error) -> Self {
        CurveQueryError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CurveQueryError {
    fn from(err: toml::de::Error) -> Self {
        CurveQueryError::Configuration(format!("TOML parse error: {err}"))
    }
}
