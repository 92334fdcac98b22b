//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use curvequery::logging::init_logging;
//! use curvequery::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the dispatch of one partition
///
/// # Example
///
/// ```no_run
/// use curvequery::log_partition_dispatch;
///
/// log_partition_dispatch!(0, 3, "ts/Day/RollingMonth");
/// ```
#[macro_export]
macro_rules! log_partition_dispatch {
    ($index:expr, $total:expr, $path:expr) => {
        tracing::debug!(
            partition = $index,
            partition_count = $total,
            path = %$path,
            "Dispatching partition"
        );
    };
}

/// Log the completion of an execution
///
/// # Example
///
/// ```no_run
/// use curvequery::log_execution_complete;
/// use std::time::Duration;
///
/// log_execution_complete!("actual", 3, 120, Duration::from_millis(250));
/// ```
#[macro_export]
macro_rules! log_execution_complete {
    ($kind:expr, $partitions:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            kind = %$kind,
            partition_count = $partitions,
            row_count = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Query execution completed"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use curvequery::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, 2000u64, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay_ms:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            reason = %$reason,
            "Retrying request after error"
        );
    };
}
