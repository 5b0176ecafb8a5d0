// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Workflow payload structures
//!
//! Defines the request and response shapes exchanged with the caller.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::errors::{DagcheckError, DagcheckResult};

/// A graph node, identified by an opaque id
///
/// Editors usually send more than the id (position, type, data); those
/// fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A directed edge between two node ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Submitted workflow graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPayload {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl WorkflowPayload {
    /// Build a payload from plain ids and id pairs
    pub fn from_ids<'a>(
        nodes: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().map(Node::new).collect(),
            edges: edges
                .into_iter()
                .map(|(source, target)| Edge::new(source, target))
                .collect(),
        }
    }

    /// Load a payload file, picking the format from the extension
    pub fn from_file(path: &Path) -> DagcheckResult<Self> {
        if !path.exists() {
            return Err(DagcheckError::PayloadNotFound {
                path: path.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| DagcheckError::FileReadError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Read a JSON payload from any reader (stdin for the CLI)
    pub fn from_reader(mut reader: impl Read) -> DagcheckResult<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json(&content)
    }

    /// Parse payload from JSON string
    pub fn from_json(json: &str) -> DagcheckResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Parse payload from YAML string
    pub fn from_yaml(yaml: &str) -> DagcheckResult<Self> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }
}

/// Node/edge counts and DAG-ness of a payload
///
/// Serializes to the response body `{"num_nodes", "num_edges", "is_dag"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_editor_payload_ignores_extra_fields() {
        let json = r#"{
            "nodes": [
                {"id": "customInput-1", "type": "customInput", "position": {"x": 0, "y": 0}, "data": {}},
                {"id": "llm-1", "type": "llm"}
            ],
            "edges": [
                {"id": "e1", "source": "customInput-1", "sourceHandle": "value", "target": "llm-1", "animated": true}
            ]
        }"#;

        let payload = WorkflowPayload::from_json(json).unwrap();

        assert_eq!(payload.nodes.len(), 2);
        assert_eq!(payload.nodes[0].id, "customInput-1");
        assert_eq!(payload.edges, vec![Edge::new("customInput-1", "llm-1")]);
    }

    #[test]
    fn test_missing_lists_are_rejected() {
        for json in [
            "{}",
            r#"{"nodes": [{"id": "a"}]}"#,
            r#"{"edges": []}"#,
            r#"{"node": [{"id": "a"}], "edge": []}"#,
        ] {
            let result = WorkflowPayload::from_json(json);
            assert!(
                matches!(result, Err(DagcheckError::Json { .. })),
                "accepted {json}"
            );
        }
    }

    #[test]
    fn test_yaml_missing_edges_rejected() {
        let result = WorkflowPayload::from_yaml("nodes:\n  - id: a\n");
        assert!(matches!(result, Err(DagcheckError::Yaml { .. })));
    }

    #[test]
    fn test_empty_lists_are_valid() {
        let payload = WorkflowPayload::from_json(r#"{"nodes": [], "edges": []}"#).unwrap();
        assert_eq!(payload, WorkflowPayload::default());
    }

    #[test]
    fn test_edge_without_target_is_rejected() {
        let result = WorkflowPayload::from_json(r#"{"nodes": [], "edges": [{"source": "a"}]}"#);
        assert!(matches!(result, Err(DagcheckError::Json { .. })));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "nodes:\n  - id: a\n  - id: b\nedges:\n  - source: a\n    target: b\n";
        let payload = WorkflowPayload::from_yaml(yaml).unwrap();

        assert_eq!(payload, WorkflowPayload::from_ids(["a", "b"], [("a", "b")]));
    }

    #[test]
    fn test_from_reader() {
        let payload =
            WorkflowPayload::from_reader(Cursor::new(r#"{"nodes":[{"id":"x"}],"edges":[]}"#))
                .unwrap();
        assert_eq!(payload.nodes, vec![Node::new("x")]);
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("graph.yml");
        std::fs::write(&yaml_path, "nodes:\n  - id: a\nedges: []\n").unwrap();
        assert_eq!(WorkflowPayload::from_file(&yaml_path).unwrap().nodes.len(), 1);

        let json_path = dir.path().join("graph.json");
        std::fs::write(&json_path, r#"{"nodes":[],"edges":[]}"#).unwrap();
        assert!(WorkflowPayload::from_file(&json_path).unwrap().nodes.is_empty());
    }

    #[test]
    fn test_from_file_missing() {
        let result = WorkflowPayload::from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(DagcheckError::PayloadNotFound { .. })));
    }

    #[test]
    fn test_result_serializes_response_fields() {
        let result = AnalysisResult {
            num_nodes: 3,
            num_edges: 2,
            is_dag: true,
        };

        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"num_nodes":3,"num_edges":2,"is_dag":true}"#
        );
    }
}
