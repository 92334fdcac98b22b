//! Configuration management for curvequery.
//!
//! # Overview
//!
//! curvequery uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CURVEQUERY_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ServiceConfig`] - Curve service URL, API key, timeout and retries
//! - [`QueryConfig`] - Partition size of outbound requests
//! - [`LoggingConfig`] - File logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [service]
//! base_url = "https://api.example.com/v2.1"
//! api_key = "${CURVEQUERY_API_KEY}"
//! timeout_seconds = 60
//!
//! [service.retry]
//! max_retries = 3
//! initial_delay_ms = 1000
//!
//! [query]
//! partition_size = 25
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, CurveQueryConfig, LoggingConfig, QueryConfig, RetryConfig, ServiceConfig,
};
pub use secret::{api_key, ApiKey, ApiKeyValue};
