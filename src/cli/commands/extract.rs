//! `extract` command: run a query definition against the service

use crate::cli::{EXIT_CANCELLED, EXIT_CONFIG_ERROR, EXIT_TRANSPORT_ERROR};
use crate::config::load_config;
use crate::domain::CurveQueryError;
use crate::query::{QueryDefinition, QueryService};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::watch;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Query definition file (TOML)
    #[arg(short, long)]
    pub query: PathBuf,

    /// Write rows to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub async fn execute(
        &self,
        config_path: &str,
        cancel: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let started = Instant::now();

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let definition = QueryDefinition::from_file(&self.query)?;
        let params = match definition.into_parameters() {
            Ok(params) => params,
            Err(e) => {
                eprintln!("❌ Invalid query definition: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let service = QueryService::from_config(&config)?;

        tracing::info!(
            kind = %params.kind(),
            query = %self.query.display(),
            "Starting extraction"
        );

        let rows = match service.executor().execute_raw(&params, &cancel).await {
            Ok(rows) => rows,
            Err(CurveQueryError::Query(e)) => {
                eprintln!("❌ Invalid query: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
            Err(CurveQueryError::Cancelled) => {
                eprintln!("⚠️  Extraction cancelled");
                return Ok(EXIT_CANCELLED);
            }
            Err(CurveQueryError::Transport(e)) => {
                eprintln!("❌ Curve service request failed: {e}");
                return Ok(EXIT_TRANSPORT_ERROR);
            }
            Err(e) => return Err(e.into()),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&rows)?
        } else {
            serde_json::to_string(&rows)?
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!(
                    "✅ Wrote {} rows to {} in {:.2}s",
                    rows.len(),
                    path.display(),
                    started.elapsed().as_secs_f64()
                );
            }
            None => println!("{json}"),
        }

        Ok(0)
    }
}
