// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Parse command - count nodes and edges and check for cycles

use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use super::OutputFormat;
use crate::errors::DagcheckError;
use crate::graph::{GraphAnalyzer, Inspection};
use crate::utils::{
    print_error, print_field, print_header, print_info, print_success, print_warning,
};

/// Run the parse command
pub async fn run(
    payload_path: Option<PathBuf>,
    format: OutputFormat,
    analyzer: GraphAnalyzer,
    verbose: bool,
) -> Result<()> {
    let payload = super::load_payload(payload_path.as_deref())
        .await
        .map_err(|e| report(e, format))?;

    let inspection = analyzer.inspect(&payload).map_err(|e| report(e, format))?;
    let result = inspection.result;

    tracing::info!(
        num_nodes = result.num_nodes,
        num_edges = result.num_edges,
        is_dag = result.is_dag,
        "Pipeline parsed"
    );

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&result).into_diagnostic()?);
        }
        OutputFormat::Text => print_text(&analyzer, &inspection, verbose),
    }

    Ok(())
}

/// JSON callers get an error body on stdout as well as the diagnostic
fn report(err: DagcheckError, format: OutputFormat) -> miette::Report {
    tracing::debug!(
        kind = err.kind(),
        malformed = err.is_malformed_payload(),
        "Payload rejected"
    );
    if format == OutputFormat::Json {
        println!("{}", err.to_json());
    }
    err.into()
}

fn print_text(analyzer: &GraphAnalyzer, inspection: &Inspection<'_>, verbose: bool) {
    let result = &inspection.result;

    println!();
    print_header("Pipeline analysis");
    print_field("Nodes", result.num_nodes);
    print_field("Edges", result.num_edges);
    println!();

    if result.is_dag {
        print_success("Graph is a DAG");
    } else {
        print_error("Graph contains a cycle");
        if let Some(cycle) = &inspection.cycle {
            print_info(&format!("Cycle: {}", cycle.join(" → ").bold()));
        }
    }

    if verbose {
        let graph = &inspection.graph;
        if graph.merged_duplicates() > 0 {
            print_warning(&format!(
                "{} duplicate node id(s) merged",
                graph.merged_duplicates()
            ));
        }
        print_info(&format!("Distinct nodes: {}", graph.len()));
        print_info(&format!(
            "Duplicate policy: {:?}",
            analyzer.config().duplicate_policy
        ));
    }

    println!();
}
