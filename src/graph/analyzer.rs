// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Cycle detection for workflow graphs
//!
//! Three-color depth-first search over an [`AdjacencyMap`]. The traversal
//! keeps its own stack of `(vertex, next-neighbor)` frames, so a long chain
//! of nodes costs heap memory instead of call-stack depth.

use crate::errors::{DagcheckError, DagcheckResult};
use crate::graph::{AdjacencyMap, AnalysisResult, AnalyzerConfig, Edge, Node, WorkflowPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

#[derive(Debug)]
struct Frame {
    vertex: usize,
    next: usize,
}

/// Walk every vertex in input order, calling `finished` on each vertex as it
/// turns `Done`. Stops at the first back edge and returns the cycle it closes
/// as a vertex path whose first and last entries are equal.
fn depth_first(graph: &AdjacencyMap<'_>, mut finished: impl FnMut(usize)) -> Option<Vec<usize>> {
    let mut state = vec![VisitState::Unvisited; graph.len()];
    let mut stack: Vec<Frame> = Vec::new();

    for root in graph.vertices() {
        if state[root] != VisitState::Unvisited {
            continue;
        }

        state[root] = VisitState::InProgress;
        stack.push(Frame { vertex: root, next: 0 });

        while let Some(frame) = stack.last_mut() {
            let vertex = frame.vertex;

            match graph.neighbors(vertex).get(frame.next).copied() {
                Some(neighbor) => {
                    frame.next += 1;
                    match state[neighbor] {
                        VisitState::InProgress => return Some(cycle_path(&stack, neighbor)),
                        VisitState::Unvisited => {
                            state[neighbor] = VisitState::InProgress;
                            stack.push(Frame {
                                vertex: neighbor,
                                next: 0,
                            });
                        }
                        VisitState::Done => {}
                    }
                }
                None => {
                    state[vertex] = VisitState::Done;
                    finished(vertex);
                    stack.pop();
                }
            }
        }
    }

    None
}

/// The stack holds exactly the in-progress path, so the cycle is the suffix
/// starting at `back_to`.
fn cycle_path(stack: &[Frame], back_to: usize) -> Vec<usize> {
    let start = stack
        .iter()
        .rposition(|frame| frame.vertex == back_to)
        .unwrap_or(0);

    stack[start..]
        .iter()
        .map(|frame| frame.vertex)
        .chain(std::iter::once(back_to))
        .collect()
}

/// Stateless DAG analyzer
///
/// Holds only its configuration; every call builds and drops its own
/// adjacency and visit-state structures, so one analyzer can be shared
/// freely between threads.
#[derive(Debug, Clone, Default)]
pub struct GraphAnalyzer {
    config: AnalyzerConfig,
}

impl GraphAnalyzer {
    /// Create an analyzer with the given configuration
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Count nodes and edges and decide whether the payload is a DAG
    pub fn analyze(&self, payload: &WorkflowPayload) -> DagcheckResult<AnalysisResult> {
        self.analyze_parts(&payload.nodes, &payload.edges)
    }

    /// Same as [`analyze`](Self::analyze), over borrowed node and edge lists
    pub fn analyze_parts(&self, nodes: &[Node], edges: &[Edge]) -> DagcheckResult<AnalysisResult> {
        let graph = AdjacencyMap::build(nodes, edges, &self.config)?;
        let is_dag = depth_first(&graph, |_| {}).is_none();

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            vertices = graph.len(),
            is_dag,
            "Analyzed graph"
        );

        Ok(AnalysisResult {
            num_nodes: nodes.len(),
            num_edges: edges.len(),
            is_dag,
        })
    }

    /// Build the validated adjacency structure for a payload
    pub fn build_graph<'a>(
        &self,
        payload: &'a WorkflowPayload,
    ) -> DagcheckResult<AdjacencyMap<'a>> {
        AdjacencyMap::from_payload(payload, &self.config)
    }

    /// Analysis result, first cycle and the adjacency map from a single build
    pub fn inspect<'a>(&self, payload: &'a WorkflowPayload) -> DagcheckResult<Inspection<'a>> {
        let graph = self.build_graph(payload)?;
        let cycle = graph.find_cycle();

        Ok(Inspection {
            result: AnalysisResult {
                num_nodes: payload.nodes.len(),
                num_edges: payload.edges.len(),
                is_dag: cycle.is_none(),
            },
            cycle,
            graph,
        })
    }

    /// First cycle met in traversal order, as a closed id path (`a → b → a`)
    pub fn find_cycle(&self, payload: &WorkflowPayload) -> DagcheckResult<Option<Vec<String>>> {
        Ok(self.build_graph(payload)?.find_cycle())
    }

    /// Node ids ordered so that every edge points forward
    pub fn topological_order(&self, payload: &WorkflowPayload) -> DagcheckResult<Vec<String>> {
        self.build_graph(payload)?.topological_order()
    }
}

/// Everything the text report needs, computed from one adjacency build
#[derive(Debug)]
pub struct Inspection<'a> {
    pub result: AnalysisResult,
    pub cycle: Option<Vec<String>>,
    pub graph: AdjacencyMap<'a>,
}

impl AdjacencyMap<'_> {
    /// First cycle met in traversal order, as a closed id path
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        depth_first(self, |_| {}).map(|path| ids_of(self, &path))
    }

    /// Reverse DFS post-order, so the result only depends on input order
    pub fn topological_order(&self) -> DagcheckResult<Vec<String>> {
        let mut postorder = Vec::with_capacity(self.len());

        if let Some(path) = depth_first(self, |vertex| postorder.push(vertex)) {
            return Err(DagcheckError::CycleDetected {
                cycle: ids_of(self, &path),
            });
        }

        Ok(postorder
            .into_iter()
            .rev()
            .map(|vertex| self.id(vertex).to_string())
            .collect())
    }
}

fn ids_of(graph: &AdjacencyMap<'_>, path: &[usize]) -> Vec<String> {
    path.iter().map(|&vertex| graph.id(vertex).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EdgeEndpoint;
    use crate::graph::DuplicatePolicy;

    const NO_EDGES: [(&str, &str); 0] = [];

    fn analyze(nodes: &[&str], edges: &[(&str, &str)]) -> AnalysisResult {
        let payload = WorkflowPayload::from_ids(nodes.iter().copied(), edges.iter().copied());
        GraphAnalyzer::default().analyze(&payload).unwrap()
    }

    #[test]
    fn test_empty_graph() {
        let result = analyze(&[], &[]);
        assert_eq!(
            result,
            AnalysisResult {
                num_nodes: 0,
                num_edges: 0,
                is_dag: true
            }
        );
    }

    #[test]
    fn test_single_node() {
        let result = analyze(&["a"], &[]);
        assert_eq!(result.num_nodes, 1);
        assert_eq!(result.num_edges, 0);
        assert!(result.is_dag);
    }

    #[test]
    fn test_single_edge() {
        assert!(analyze(&["a", "b"], &[("a", "b")]).is_dag);
    }

    #[test]
    fn test_two_cycle() {
        let result = analyze(&["a", "b"], &[("a", "b"), ("b", "a")]);
        assert!(!result.is_dag);
        assert_eq!(result.num_edges, 2);
    }

    #[test]
    fn test_self_loop() {
        assert!(!analyze(&["a"], &[("a", "a")]).is_dag);
    }

    #[test]
    fn test_triangle() {
        assert!(!analyze(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]).is_dag);
        assert!(analyze(&["a", "b", "c"], &[("a", "b"), ("a", "c"), ("b", "c")]).is_dag);
    }

    #[test]
    fn test_diamond_is_dag() {
        // d is reached twice; the second visit sees it Done, not InProgress
        let result = analyze(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        assert!(result.is_dag);
    }

    #[test]
    fn test_cycle_in_second_component() {
        let result = analyze(
            &["a", "b", "x", "y", "z"],
            &[("a", "b"), ("x", "y"), ("y", "z"), ("z", "y")],
        );
        assert!(!result.is_dag);
    }

    #[test]
    fn test_parallel_edges_are_counted() {
        let result = analyze(&["a", "b"], &[("a", "b"), ("a", "b")]);
        assert_eq!(result.num_edges, 2);
        assert!(result.is_dag);
    }

    #[test]
    fn test_idempotent() {
        let payload = WorkflowPayload::from_ids(["a", "b", "c"], [("a", "b"), ("b", "c")]);
        let analyzer = GraphAnalyzer::default();

        let first = analyzer.analyze(&payload).unwrap();
        let second = analyzer.analyze(&payload).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_invariance() {
        let edges = [("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")];
        let forward = analyze(&["a", "b", "c", "d"], &edges);

        let mut reversed_edges = edges.to_vec();
        reversed_edges.reverse();
        let backward = analyze(&["d", "c", "b", "a"], &reversed_edges);

        assert_eq!(forward, backward);
        assert!(!forward.is_dag);
    }

    #[test]
    fn test_unknown_reference_is_error() {
        let payload = WorkflowPayload::from_ids(["a"], [("a", "b")]);
        let err = GraphAnalyzer::default().analyze(&payload).unwrap_err();

        assert!(matches!(
            err,
            DagcheckError::UnknownNodeReference {
                endpoint: EdgeEndpoint::Target,
                ..
            }
        ));
    }

    #[test]
    fn test_merged_duplicates_keep_supplied_count() {
        let analyzer = GraphAnalyzer::new(AnalyzerConfig {
            duplicate_policy: DuplicatePolicy::Merge,
            ..Default::default()
        });
        let payload = WorkflowPayload::from_ids(["a", "a", "b"], [("a", "b")]);

        let result = analyzer.analyze(&payload).unwrap();
        assert_eq!(result.num_nodes, 3);
        assert!(result.is_dag);
    }

    #[test]
    fn test_analyze_parts() {
        let nodes = vec![Node::new("a"), Node::new("b")];
        let edges = vec![Edge::new("b", "a")];

        let result = GraphAnalyzer::default()
            .analyze_parts(&nodes, &edges)
            .unwrap();
        assert!(result.is_dag);
    }

    #[test]
    fn test_long_chain_does_not_overflow_stack() {
        let ids: Vec<String> = (0..200_000).map(|i| format!("n{i}")).collect();
        let nodes: Vec<Node> = ids.iter().map(|id| Node::new(id.as_str())).collect();
        let mut edges: Vec<Edge> = ids
            .windows(2)
            .map(|pair| Edge::new(pair[0].as_str(), pair[1].as_str()))
            .collect();

        let analyzer = GraphAnalyzer::default();
        assert!(analyzer.analyze_parts(&nodes, &edges).unwrap().is_dag);

        edges.push(Edge::new("n199999", "n0"));
        assert!(!analyzer.analyze_parts(&nodes, &edges).unwrap().is_dag);
    }

    #[test]
    fn test_find_cycle_path() {
        let payload = WorkflowPayload::from_ids(
            ["start", "a", "b", "c"],
            [("start", "a"), ("a", "b"), ("b", "c"), ("c", "a")],
        );
        let cycle = GraphAnalyzer::default().find_cycle(&payload).unwrap();

        assert_eq!(
            cycle,
            Some(vec!["a".into(), "b".into(), "c".into(), "a".into()])
        );
    }

    #[test]
    fn test_find_cycle_self_loop() {
        let payload = WorkflowPayload::from_ids(["a", "b"], [("a", "b"), ("b", "b")]);
        let cycle = GraphAnalyzer::default().find_cycle(&payload).unwrap();
        assert_eq!(cycle, Some(vec!["b".into(), "b".into()]));
    }

    #[test]
    fn test_find_cycle_none_for_dag() {
        let payload = WorkflowPayload::from_ids(["a", "b"], [("a", "b")]);
        assert_eq!(GraphAnalyzer::default().find_cycle(&payload).unwrap(), None);
    }

    #[test]
    fn test_topological_order_linear() {
        let payload = WorkflowPayload::from_ids(["c", "b", "a"], [("a", "b"), ("b", "c")]);
        let order = GraphAnalyzer::default().topological_order(&payload).unwrap();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_topological_order_respects_every_edge() {
        let edges = [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("e", "a")];
        let payload = WorkflowPayload::from_ids(["a", "b", "c", "d", "e"], edges);
        let order = GraphAnalyzer::default().topological_order(&payload).unwrap();

        let position = |id: &str| order.iter().position(|o| o == id).unwrap();
        for (source, target) in edges {
            assert!(position(source) < position(target), "{source} -> {target}");
        }
        assert_eq!(order.len(), 5);
    }

    #[test]
    fn test_topological_order_isolated_nodes() {
        let payload = WorkflowPayload::from_ids(["a", "b"], NO_EDGES);
        let order = GraphAnalyzer::default().topological_order(&payload).unwrap();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_topological_order_cycle() {
        let payload = WorkflowPayload::from_ids(["a", "b"], [("a", "b"), ("b", "a")]);
        let err = GraphAnalyzer::default()
            .topological_order(&payload)
            .unwrap_err();

        match err {
            DagcheckError::CycleDetected { cycle } => assert_eq!(cycle, vec!["a", "b", "a"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_inspect_matches_analyze() {
        let payload = WorkflowPayload::from_ids(
            ["a", "b", "c"],
            [("a", "b"), ("b", "c"), ("c", "b")],
        );
        let analyzer = GraphAnalyzer::default();
        let inspection = analyzer.inspect(&payload).unwrap();

        assert_eq!(inspection.result, analyzer.analyze(&payload).unwrap());
        assert_eq!(inspection.cycle, Some(vec!["b".into(), "c".into(), "b".into()]));
        assert_eq!(inspection.graph.len(), 3);
        assert!(inspection.graph.topological_order().is_err());
    }

    #[test]
    fn test_inspect_dag_has_no_cycle() {
        let payload = WorkflowPayload::from_ids(["a", "b"], [("a", "b")]);
        let inspection = GraphAnalyzer::default().inspect(&payload).unwrap();

        assert!(inspection.result.is_dag);
        assert_eq!(inspection.cycle, None);
        assert_eq!(inspection.graph.topological_order().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphAnalyzer>();
    }
}
