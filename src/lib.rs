// curvequery - Energy-market curve query engine
// Copyright (c) 2025 Curvequery Contributors
// Licensed under the MIT License

//! # curvequery
//!
//! Client-side query construction for time-series services serving
//! energy-market curves: actual, versioned, derived, bid/ask, market
//! assessment and auction data.
//!
//! ## Overview
//!
//! Callers describe the data they want through a chainable, reusable builder.
//! On every `execute` the library:
//! - **Validates** the configuration before any network activity
//! - **Partitions** long curve id lists into bounded requests
//! - **Compiles** each partition into a route and query string
//! - **Dispatches** all partitions concurrently and concatenates the rows
//!
//! ## Architecture
//!
//! - [`query`] - Builders, validation, route compilation, partitioning, fan-out
//! - [`adapters`] - The [`adapters::Transport`] seam and its HTTP implementation
//! - [`domain`] - Value types, row types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use curvequery::config::load_config;
//! use curvequery::domain::{Granularity, Period, RelativeInterval, VersionWindow};
//! use curvequery::query::{QueryBuilder, QueryService};
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("curvequery.toml")?;
//!     let service = QueryService::from_config(&config)?;
//!     let (_cancel_tx, cancel) = watch::channel(false);
//!
//!     let mut query = service.create_versioned();
//!     query
//!         .for_market_data([100000001])
//!         .in_granularity(Granularity::Day)
//!         .in_relative_interval(RelativeInterval::RollingMonth)
//!         .for_last_of_months(VersionWindow::period(Period::new("P-4M")?));
//!
//!     // vts/LastOfMonths/P-4M/Day/RollingMonth?id=100000001
//!     let rows = query.execute(&cancel).await?;
//!     println!("{} rows", rows.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::CurveQueryError`]. Configuration
//! mistakes surface as [`domain::QueryError`] before anything is sent; failures
//! of any partition surface as [`domain::TransportError`] and fail the whole
//! execution.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod query;
