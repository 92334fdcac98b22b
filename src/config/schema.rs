//! Configuration schema types
//!
//! Maps `curvequery.toml` onto typed sections. Every section validates itself;
//! [`CurveQueryConfig::validate`] runs them all.

use crate::config::ApiKey;
use crate::query::partition::DEFAULT_PARTITION_SIZE;
use serde::{Deserialize, Serialize};

/// Main curvequery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveQueryConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Curve service connection
    pub service: ServiceConfig,

    /// Query execution settings
    #[serde(default)]
    pub query: QueryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CurveQueryConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.service.validate()?;
        self.query.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry policy of the HTTP transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt; zero disables retrying
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Upper bound of any single delay, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Factor applied to the delay after every retry
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backoff_multiplier < 1.0 {
            return Err("service.retry.backoff_multiplier must be >= 1.0".to_string());
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(
                "service.retry.initial_delay_ms must not exceed service.retry.max_delay_ms"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Curve service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Root URL every compiled path is appended to
    pub base_url: String,

    /// API key sent as `X-Api-Key`
    ///
    /// Stored securely in memory and zeroized on drop
    #[serde(default)]
    pub api_key: Option<ApiKey>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry policy
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ServiceConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("service.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("service.base_url must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("service.base_url '{}' is not a valid URL", self.base_url));
        }

        if self
            .api_key
            .as_ref()
            .is_some_and(|key| key.expose_secret().is_empty())
        {
            return Err("service.api_key cannot be blank when provided".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("service.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate()
    }
}

/// Query execution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Maximum curve ids carried by one outbound request
    #[serde(default = "default_partition_size")]
    pub partition_size: usize,
}

impl QueryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.partition_size == 0 {
            return Err("query.partition_size must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            partition_size: default_partition_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory of the log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation of the log files (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_partition_size() -> usize {
    DEFAULT_PARTITION_SIZE
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::api_key;

    fn service() -> ServiceConfig {
        ServiceConfig {
            base_url: "https://api.example.com/v2.1".to_string(),
            api_key: Some(api_key("key")),
            timeout_seconds: 30,
            retry: RetryConfig::default(),
        }
    }

    fn config() -> CurveQueryConfig {
        CurveQueryConfig {
            application: ApplicationConfig::default(),
            service: service(),
            query: QueryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(config().validate().is_ok());
        assert_eq!(QueryConfig::default().partition_size, 25);
        assert_eq!(RetryConfig::default().max_retries, 3);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("log_level"));
    }

    #[test]
    fn test_base_url_scheme_required() {
        let mut config = config();
        config.service.base_url = "api.example.com".to_string();
        assert!(config.validate().unwrap_err().contains("http://"));
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let mut config = config();
        config.service.api_key = Some(api_key(""));
        assert!(config.validate().unwrap_err().contains("api_key"));
    }

    #[test]
    fn test_missing_api_key_allowed() {
        let mut config = config();
        config.service.api_key = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_partition_size_rejected() {
        let mut config = config();
        config.query.partition_size = 0;
        assert!(config.validate().unwrap_err().contains("partition_size"));
    }

    #[test]
    fn test_retry_bounds() {
        let mut config = config();
        config.service.retry.backoff_multiplier = 0.5;
        assert!(config.validate().is_err());

        let mut config = self::config();
        config.service.retry.initial_delay_ms = 60_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().unwrap_err().contains("local_rotation"));
    }

    #[test]
    fn test_minimal_toml() {
        let config: CurveQueryConfig =
            toml::from_str("[service]\nbase_url = \"https://api.example.com\"\n").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.service.timeout_seconds, 60);
        assert_eq!(config.query.partition_size, DEFAULT_PARTITION_SIZE);
        assert!(!config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }
}
