// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! dagcheck - Workflow DAG checker
//!
//! Count the nodes and edges of a workflow graph and check that it is acyclic.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dagcheck::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "dagcheck=debug"
    } else {
        "dagcheck=info"
    };

    // Logs go to stderr; stdout carries only the response
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    let config = cli.config.as_deref();

    // Dispatch to command handlers
    match cli.command {
        Commands::Parse {
            payload,
            format,
            limits,
        } => {
            let analyzer = dagcheck::cli::build_analyzer(config, &limits)?;
            dagcheck::cli::parse::run(payload, format, analyzer, cli.verbose).await
        }
        Commands::Graph {
            payload,
            format,
            limits,
        } => {
            let analyzer = dagcheck::cli::build_analyzer(config, &limits)?;
            dagcheck::cli::graph::run(payload, format, analyzer).await
        }
        Commands::Ping => dagcheck::cli::ping::run().await,
    }
}
