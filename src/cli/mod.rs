//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for curvequery using clap.

pub mod commands;

use crate::config::{load_config, CurveQueryConfig, LoggingConfig};
use clap::{Parser, Subcommand};
use std::path::Path;

/// Exit code for configuration and query errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code for failures reported by the curve service
pub const EXIT_TRANSPORT_ERROR: i32 = 3;

/// Exit code when the run was interrupted
pub const EXIT_CANCELLED: i32 = 130;

/// curvequery - energy-market curve extraction
#[derive(Parser, Debug)]
#[command(name = "curvequery")]
#[command(version, about, long_about = None)]
#[command(author = "Curvequery Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "curvequery.toml", env = "CURVEQUERY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CURVEQUERY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the requests a query definition compiles to, without sending them
    Routes(commands::routes::RoutesArgs),

    /// Run a query definition against the configured service
    Extract(commands::extract::ExtractArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Cli {
    /// Level and logging section to start tracing with
    ///
    /// `--log-level` wins over `application.log_level`. Without a loadable
    /// configuration file, console logging at `info` is used.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let config = if Path::new(&self.config).exists() {
            load_config(&self.config).ok()
        } else {
            None
        };
        resolve_logging(self.log_level.as_deref(), config.as_ref())
    }
}

fn resolve_logging(
    cli_level: Option<&str>,
    config: Option<&CurveQueryConfig>,
) -> (String, LoggingConfig) {
    match config {
        Some(config) => (
            cli_level
                .unwrap_or(&config.application.log_level)
                .to_string(),
            config.logging.clone(),
        ),
        None => (
            cli_level.unwrap_or("info").to_string(),
            LoggingConfig::default(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_logging_settings_from_config() {
        let file = config_file(
            r#"
[application]
log_level = "debug"

[service]
base_url = "https://api.example.com"

[logging]
local_enabled = true
local_path = "/tmp/curvequery-logs"
local_rotation = "hourly"
"#,
        );
        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from(["curvequery", "--config", &path, "validate-config"]);

        let (level, logging) = cli.logging_settings();

        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_path, "/tmp/curvequery-logs");
        assert_eq!(logging.local_rotation, "hourly");
    }

    #[test]
    fn test_cli_log_level_beats_config() {
        let file = config_file(
            "[application]\nlog_level = \"debug\"\n\n[service]\nbase_url = \"https://api.example.com\"\n",
        );
        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "curvequery",
            "--config",
            &path,
            "--log-level",
            "warn",
            "validate-config",
        ]);

        assert_eq!(cli.logging_settings().0, "warn");
    }

    #[test]
    fn test_logging_settings_without_config() {
        let cli = Cli::parse_from([
            "curvequery",
            "--config",
            "/nonexistent/curvequery.toml",
            "validate-config",
        ]);

        let (level, logging) = cli.logging_settings();

        assert_eq!(level, "info");
        assert_eq!(logging, LoggingConfig::default());
    }

    #[test]
    fn test_cli_parse_routes() {
        let cli = Cli::parse_from(["curvequery", "routes", "--query", "q.toml"]);
        assert_eq!(cli.config, "curvequery.toml");
        match cli.command {
            Commands::Routes(args) => {
                assert_eq!(args.query.to_string_lossy(), "q.toml");
                assert_eq!(args.partition_size, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_extract_with_output() {
        let cli = Cli::parse_from([
            "curvequery",
            "--config",
            "custom.toml",
            "extract",
            "--query",
            "q.toml",
            "--output",
            "rows.json",
            "--pretty",
        ]);
        assert_eq!(cli.config, "custom.toml");
        match cli.command {
            Commands::Extract(args) => {
                assert!(args.pretty);
                assert_eq!(
                    args.output.as_deref().map(|p| p.to_string_lossy().into_owned()),
                    Some("rows.json".to_string())
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["curvequery", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_requires_query_file() {
        assert!(Cli::try_parse_from(["curvequery", "routes"]).is_err());
    }
}
