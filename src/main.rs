// curvequery - Energy-market curve query engine
// Copyright (c) 2025 Curvequery Contributors
// Licensed under the MIT License

use clap::Parser;
use curvequery::cli::{Cli, Commands};
use curvequery::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (log_level, logging_config) = cli.logging_settings();
    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "curvequery starting");

    // Raised on Ctrl+C or SIGTERM; every in-flight request observes it
    let (cancel_tx, cancel_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    if tokio::signal::ctrl_c().await.is_ok() {
                        let _ = cancel_tx.send(true);
                    }
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), cancelling in-flight requests");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, cancelling in-flight requests");
                }
            }
            let _ = cancel_tx.send(true);
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), cancelling in-flight requests");
                let _ = cancel_tx.send(true);
            }
        }
    });

    let exit_code = match execute_command(&cli, cancel_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    drop(_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, cancel: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Routes(args) => args.execute(&cli.config).await,
        Commands::Extract(args) => args.execute(&cli.config, cancel).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
    }
}
