// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Adjacency structure built from an untrusted payload
//!
//! Node ids are interned into dense vertex indices in first-occurrence
//! order, and every edge endpoint is resolved against that table before it
//! is stored. Nothing downstream ever looks up a raw id.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::errors::{DagcheckError, DagcheckResult, EdgeEndpoint};
use crate::graph::{AnalyzerConfig, DuplicatePolicy, Edge, Node, WorkflowPayload};

/// Validated outgoing-edge lists keyed by vertex index
#[derive(Debug)]
pub struct AdjacencyMap<'a> {
    ids: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
    targets: Vec<Vec<usize>>,
    merged_duplicates: usize,
}

impl<'a> AdjacencyMap<'a> {
    /// Build from a whole payload
    pub fn from_payload(
        payload: &'a WorkflowPayload,
        config: &AnalyzerConfig,
    ) -> DagcheckResult<Self> {
        Self::build(&payload.nodes, &payload.edges, config)
    }

    /// Build the adjacency structure, validating ids and limits
    pub fn build(
        nodes: &'a [Node],
        edges: &'a [Edge],
        config: &AnalyzerConfig,
    ) -> DagcheckResult<Self> {
        config.check_limits(nodes.len(), edges.len())?;

        let mut ids = Vec::with_capacity(nodes.len());
        let mut first_seen = Vec::with_capacity(nodes.len());
        let mut index = HashMap::with_capacity(nodes.len());
        let mut merged_duplicates = 0;

        for (position, node) in nodes.iter().enumerate() {
            match index.entry(node.id.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(ids.len());
                    ids.push(node.id.as_str());
                    first_seen.push(position);
                }
                Entry::Occupied(slot) => match config.duplicate_policy {
                    DuplicatePolicy::Reject => {
                        return Err(DagcheckError::DuplicateNodeId {
                            id: node.id.clone(),
                            first_index: first_seen[*slot.get()],
                            duplicate_index: position,
                        });
                    }
                    DuplicatePolicy::Merge => merged_duplicates += 1,
                },
            }
        }

        if merged_duplicates > 0 {
            tracing::warn!("Merged {} duplicate node id(s)", merged_duplicates);
        }

        let mut targets = vec![Vec::new(); ids.len()];

        for (edge_index, edge) in edges.iter().enumerate() {
            let source = Self::resolve(&index, &edge.source, edge_index, EdgeEndpoint::Source)?;
            let target = Self::resolve(&index, &edge.target, edge_index, EdgeEndpoint::Target)?;
            targets[source].push(target);
        }

        Ok(Self {
            ids,
            index,
            targets,
            merged_duplicates,
        })
    }

    fn resolve(
        index: &HashMap<&'a str, usize>,
        id: &str,
        edge_index: usize,
        endpoint: EdgeEndpoint,
    ) -> DagcheckResult<usize> {
        index
            .get(id)
            .copied()
            .ok_or_else(|| DagcheckError::UnknownNodeReference {
                edge_index,
                endpoint,
                id: id.to_string(),
            })
    }

    /// Number of distinct vertices
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of a vertex
    pub fn id(&self, vertex: usize) -> &'a str {
        self.ids[vertex]
    }

    /// Vertex index of an id, if registered
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Outgoing targets of a vertex, in edge order
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.targets[vertex]
    }

    /// All vertices in first-occurrence order
    pub fn vertices(&self) -> std::ops::Range<usize> {
        0..self.ids.len()
    }

    /// All stored edges as `(source, target)` vertex pairs, grouped by source
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .flat_map(|(source, targets)| targets.iter().map(move |&target| (source, target)))
    }

    /// Number of duplicate node entries collapsed under `DuplicatePolicy::Merge`
    pub fn merged_duplicates(&self) -> usize {
        self.merged_duplicates
    }
}
