// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! # dagcheck - Workflow DAG checker
//!
//! `dagcheck` takes a workflow graph submitted as a list of nodes and a list
//! of directed edges, counts them, and reports whether the graph is a
//! directed acyclic graph.
//!
//! ## Features
//!
//! - **Strict input checking** - edges to unknown nodes are reported, never guessed at
//! - **No recursion limits** - cycle detection runs on an explicit stack
//! - **Diagnostics** - first cycle found, topological order, DOT and Mermaid output
//!
//! ## Quick Start
//!
//! ```bash
//! # Analyze a payload file
//! dagcheck parse pipeline.json
//!
//! # Analyze from stdin
//! cat pipeline.json | dagcheck parse
//!
//! # Render as Mermaid
//! dagcheck graph --format mermaid pipeline.json
//! ```
//!
//! ## Library use
//!
//! ```
//! use dagcheck::{GraphAnalyzer, WorkflowPayload};
//!
//! let payload = WorkflowPayload::from_ids(["a", "b"], [("a", "b"), ("b", "a")]);
//! let result = GraphAnalyzer::default().analyze(&payload).unwrap();
//!
//! assert_eq!(result.num_nodes, 2);
//! assert!(!result.is_dag);
//! ```

pub mod cli;
pub mod errors;
pub mod graph;
pub mod utils;

// Re-export commonly used types
pub use errors::{DagcheckError, DagcheckResult};
pub use graph::{
    AnalysisResult, AnalyzerConfig, DuplicatePolicy, Edge, GraphAnalyzer, Node, WorkflowPayload,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
