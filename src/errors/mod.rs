// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Error types
//!
//! Every failure the analyzer can produce is a distinct variant, so callers
//! can tell a malformed payload apart from an I/O problem without string
//! matching.

use miette::Diagnostic;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dagcheck operations
pub type DagcheckResult<T> = Result<T, DagcheckError>;

/// Which end of an edge carried the bad reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEndpoint {
    Source,
    Target,
}

impl fmt::Display for EdgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Main error type for dagcheck
#[derive(Error, Debug, Diagnostic)]
pub enum DagcheckError {
    // ─────────────────────────────────────────────────────────────────────────
    // Graph Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Edge #{edge_index} {endpoint} references unknown node '{id}'")]
    #[diagnostic(
        code(dagcheck::unknown_node_reference),
        help("Every edge source and target must match the id of a node in the payload")
    )]
    UnknownNodeReference {
        edge_index: usize,
        endpoint: EdgeEndpoint,
        id: String,
    },

    #[error("Node id '{id}' appears more than once (entries #{first_index} and #{duplicate_index})")]
    #[diagnostic(
        code(dagcheck::duplicate_node_id),
        help("Give each node a unique id, or set `duplicate_policy: merge` to collapse duplicates")
    )]
    DuplicateNodeId {
        id: String,
        first_index: usize,
        duplicate_index: usize,
    },

    #[error("Payload has {actual} {what}, limit is {limit}")]
    #[diagnostic(code(dagcheck::limit_exceeded))]
    LimitExceeded {
        what: &'static str,
        limit: usize,
        actual: usize,
    },

    #[error("Graph contains a cycle: {}", .cycle.join(" → "))]
    #[diagnostic(
        code(dagcheck::cycle_detected),
        help("A topological order only exists for acyclic graphs")
    )]
    CycleDetected { cycle: Vec<String> },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Invalid configuration: {reason}")]
    #[diagnostic(code(dagcheck::invalid_config))]
    InvalidConfig { reason: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Payload / IO Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Payload file not found: {path}")]
    #[diagnostic(
        code(dagcheck::payload_not_found),
        help("Pass a path to a JSON or YAML payload, or '-' to read from stdin")
    )]
    PayloadNotFound { path: PathBuf },

    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(dagcheck::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(dagcheck::io_error))]
    Io { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(
        code(dagcheck::json_error),
        help("Expected an object with 'nodes' (each with an 'id') and 'edges' (each with 'source' and 'target')")
    )]
    Json { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(dagcheck::yaml_error))]
    Yaml { message: String },
}

impl From<std::io::Error> for DagcheckError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_json::Error> for DagcheckError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for DagcheckError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl DagcheckError {
    /// Short machine-readable kind, used in JSON error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownNodeReference { .. } => "unknown_node_reference",
            Self::DuplicateNodeId { .. } => "duplicate_node_id",
            Self::LimitExceeded { .. } => "limit_exceeded",
            Self::CycleDetected { .. } => "cycle_detected",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::PayloadNotFound { .. } => "payload_not_found",
            Self::FileReadError { .. } => "file_read_error",
            Self::Io { .. } => "io_error",
            Self::Json { .. } => "json_error",
            Self::Yaml { .. } => "yaml_error",
        }
    }

    /// Whether the error is caused by the payload contents rather than the environment
    pub fn is_malformed_payload(&self) -> bool {
        matches!(
            self,
            Self::UnknownNodeReference { .. }
                | Self::DuplicateNodeId { .. }
                | Self::LimitExceeded { .. }
                | Self::Json { .. }
                | Self::Yaml { .. }
        )
    }

    /// JSON error body for the `parse` response
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        })
    }
}
