// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Graph command - visualize a workflow payload as a graph

use miette::Result;
use std::path::PathBuf;

use super::GraphFormat;
use crate::graph::{render, GraphAnalyzer};

/// Run the graph command
pub async fn run(
    payload_path: Option<PathBuf>,
    format: GraphFormat,
    analyzer: GraphAnalyzer,
) -> Result<()> {
    let payload = super::load_payload(payload_path.as_deref()).await?;

    // Validates references before anything is rendered
    let graph = analyzer.build_graph(&payload)?;

    let output = match format {
        GraphFormat::Text => render::to_text(&graph, &graph.topological_order()?),
        GraphFormat::Dot => render::to_dot(&graph),
        GraphFormat::Mermaid => render::to_mermaid(&graph),
    };

    print!("{}", output);

    Ok(())
}
