// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Diagram and text renderers for validated graphs

use crate::graph::AdjacencyMap;

/// Generate Mermaid diagram of the graph
///
/// Vertices get synthetic `n<index>` names since editor ids are not valid
/// Mermaid identifiers in general; the id is kept as the label.
pub fn to_mermaid(graph: &AdjacencyMap<'_>) -> String {
    let mut out = String::from("graph TD\n");

    for vertex in graph.vertices() {
        out.push_str(&format!(
            "    n{}[\"{}\"]\n",
            vertex,
            escape_mermaid(graph.id(vertex))
        ));
    }

    for (from, to) in graph.edges() {
        out.push_str(&format!("    n{} --> n{}\n", from, to));
    }

    out
}

/// Generate DOT diagram of the graph
pub fn to_dot(graph: &AdjacencyMap<'_>) -> String {
    let mut out = String::from("digraph workflow {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    node [shape=box, style=rounded];\n\n");

    let mut connected = vec![false; graph.len()];

    for (from, to) in graph.edges() {
        connected[from] = true;
        connected[to] = true;
        out.push_str(&format!(
            "    \"{}\" -> \"{}\";\n",
            escape_dot(graph.id(from)),
            escape_dot(graph.id(to))
        ));
    }

    // Isolated nodes would otherwise not appear at all
    for vertex in graph.vertices().filter(|&v| !connected[v]) {
        out.push_str(&format!("    \"{}\";\n", escape_dot(graph.id(vertex))));
    }

    out.push_str("}\n");
    out
}

/// Numbered listing of `order` with each node's direct predecessors
pub fn to_text(graph: &AdjacencyMap<'_>, order: &[String]) -> String {
    let mut predecessors: Vec<Vec<&str>> = vec![Vec::new(); graph.len()];
    for (from, to) in graph.edges() {
        predecessors[to].push(graph.id(from));
    }

    let mut out = String::new();

    for (i, id) in order.iter().enumerate() {
        out.push_str(&format!("{}. {}", i + 1, id));

        if let Some(deps) = graph.index_of(id).map(|v| &predecessors[v]) {
            if !deps.is_empty() {
                out.push_str(&format!(" [after: {}]", deps.join(", ")));
            }
        }

        out.push('\n');
    }

    out
}

/// Quotes and line breaks would end the label early
fn escape_mermaid(id: &str) -> String {
    id.replace('"', "#quot;")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

fn escape_dot(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}
