// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Analyzer configuration
//!
//! Load analyzer settings from .dagcheck.yaml

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{DagcheckError, DagcheckResult};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = ".dagcheck.yaml";

/// How repeated node ids are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateNodeId`
    #[default]
    Reject,
    /// Collapse later occurrences into the first one
    Merge,
}

/// Analyzer configuration from .dagcheck.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Duplicate node id handling
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Upper bound on the number of supplied nodes
    #[serde(default)]
    pub max_nodes: Option<usize>,

    /// Upper bound on the number of supplied edges
    #[serde(default)]
    pub max_edges: Option<usize>,
}

impl AnalyzerConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> DagcheckResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DagcheckError::FileReadError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> DagcheckResult<Self> {
        // An empty file deserializes to unit, not a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `explicit` if given, else from `.dagcheck.yaml` in `dir` if present
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> DagcheckResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = dir.join(CONFIG_FILE);
        if default_path.exists() {
            tracing::debug!("Loading config from {}", default_path.display());
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject settings that can never be satisfied
    pub fn validate(&self) -> DagcheckResult<()> {
        if self.max_nodes == Some(0) {
            return Err(DagcheckError::InvalidConfig {
                reason: "max_nodes must be at least 1".into(),
            });
        }
        if self.max_edges == Some(0) {
            return Err(DagcheckError::InvalidConfig {
                reason: "max_edges must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Check payload sizes against the configured limits
    pub(crate) fn check_limits(&self, num_nodes: usize, num_edges: usize) -> DagcheckResult<()> {
        if let Some(limit) = self.max_nodes {
            if num_nodes > limit {
                return Err(DagcheckError::LimitExceeded {
                    what: "nodes",
                    limit,
                    actual: num_nodes,
                });
            }
        }
        if let Some(limit) = self.max_edges {
            if num_edges > limit {
                return Err(DagcheckError::LimitExceeded {
                    what: "edges",
                    limit,
                    actual: num_edges,
                });
            }
        }
        Ok(())
    }
}
