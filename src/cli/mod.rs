// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for dagcheck.

pub mod graph;
pub mod parse;
pub mod ping;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use crate::errors::DagcheckResult;
use crate::graph::{AnalyzerConfig, DuplicatePolicy, GraphAnalyzer, WorkflowPayload};

/// Workflow graph checker
///
/// Reports node/edge counts and whether a workflow graph is acyclic.
#[derive(Parser, Debug)]
#[clap(
    name = "dagcheck",
    version,
    about = "Check whether a workflow graph is a directed acyclic graph",
    long_about = None,
    after_help = "Examples:\n\
        dagcheck parse pipeline.json          Analyze a payload file\n\
        cat pipeline.json | dagcheck parse    Analyze a payload from stdin\n\
        dagcheck graph -f mermaid flow.yaml   Render a payload as a diagram\n\
        dagcheck ping                         Liveness check\n\n\
        See 'dagcheck <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Analyzer config file (default: .dagcheck.yaml if present)
    #[clap(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a workflow payload
    Parse {
        /// Payload file (JSON, or YAML by extension); stdin when omitted or '-'
        payload: Option<PathBuf>,

        /// Output format
        #[clap(short, long, value_enum, default_value = "json", ignore_case = true)]
        format: OutputFormat,

        #[clap(flatten)]
        limits: AnalyzerArgs,
    },

    /// Show a workflow payload as a graph
    Graph {
        /// Payload file (JSON, or YAML by extension); stdin when omitted or '-'
        payload: Option<PathBuf>,

        /// Output format
        #[clap(short, long, value_enum, default_value = "text", ignore_case = true)]
        format: GraphFormat,

        #[clap(flatten)]
        limits: AnalyzerArgs,
    },

    /// Liveness check
    Ping,
}

/// Analyzer overrides shared by payload commands
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzerArgs {
    /// Reject payloads with more nodes than this
    #[clap(long, value_name = "N")]
    pub max_nodes: Option<usize>,

    /// Reject payloads with more edges than this
    #[clap(long, value_name = "N")]
    pub max_edges: Option<usize>,

    /// Collapse repeated node ids instead of rejecting them
    #[clap(long)]
    pub merge_duplicates: bool,
}

impl AnalyzerArgs {
    /// Layer command-line overrides on top of a loaded config
    pub fn apply(&self, mut config: AnalyzerConfig) -> DagcheckResult<AnalyzerConfig> {
        if self.max_nodes.is_some() {
            config.max_nodes = self.max_nodes;
        }
        if self.max_edges.is_some() {
            config.max_edges = self.max_edges;
        }
        if self.merge_duplicates {
            config.duplicate_policy = DuplicatePolicy::Merge;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Output format for the parse command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Response body `{"num_nodes", "num_edges", "is_dag"}`
    Json,
    /// Human-readable summary
    Text,
}

/// Graph output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// Topological order with direct predecessors
    Text,
    /// Graphviz DOT
    Dot,
    /// Mermaid flowchart
    Mermaid,
}

/// Build an analyzer from the config file and command-line overrides
pub fn build_analyzer(
    config_path: Option<&Path>,
    args: &AnalyzerArgs,
) -> DagcheckResult<GraphAnalyzer> {
    let cwd = std::env::current_dir()?;
    let config = args.apply(AnalyzerConfig::discover(config_path, &cwd)?)?;
    tracing::debug!(?config, "Analyzer configured");
    Ok(GraphAnalyzer::new(config))
}

/// Read a payload from a file, or from stdin for `None` / `-`
pub async fn load_payload(path: Option<&Path>) -> DagcheckResult<WorkflowPayload> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::debug!("Reading payload from {}", path.display());
            WorkflowPayload::from_file(path)
        }
        _ => {
            tracing::debug!("Reading payload from stdin");
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            WorkflowPayload::from_json(&content)
        }
    }
}
