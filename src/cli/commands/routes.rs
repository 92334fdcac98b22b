//! `routes` command: compile a query definition offline

use crate::cli::EXIT_CONFIG_ERROR;
use crate::config::load_config;
use crate::domain::Result;
use crate::query::{plan, PartitionByIds, QueryDefinition, DEFAULT_PARTITION_SIZE};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the routes command
#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Query definition file (TOML)
    #[arg(short, long)]
    pub query: PathBuf,

    /// Maximum ids per request; defaults to `query.partition_size`
    #[arg(long)]
    pub partition_size: Option<usize>,
}

impl RoutesArgs {
    /// `--partition-size`, else the configured size, else the default
    fn partition_size(&self, config_path: &str) -> Result<usize> {
        match self.partition_size {
            Some(size) => Ok(size),
            None if Path::new(config_path).exists() => {
                Ok(load_config(config_path)?.query.partition_size)
            }
            None => Ok(DEFAULT_PARTITION_SIZE),
        }
    }

    /// Print one `GET path?query` line per outbound request
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let definition = QueryDefinition::from_file(&self.query)?;
        let kind = definition.kind;

        let params = match definition.into_parameters() {
            Ok(params) => params,
            Err(e) => {
                eprintln!("❌ Invalid query definition: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let partition_size = match self.partition_size(config_path) {
            Ok(size) => size,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };
        let partitioner = PartitionByIds::new(partition_size);

        match plan(&params, &partitioner) {
            Ok(requests) => {
                tracing::info!(kind = %kind, request_count = requests.len(), "Query compiled");
                for request in &requests {
                    println!("{request}");
                }
                Ok(0)
            }
            Err(e) => {
                eprintln!("❌ Invalid query: {e}");
                Ok(EXIT_CONFIG_ERROR)
            }
        }
    }
}
