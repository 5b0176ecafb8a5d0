// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Workflow graph analysis
//!
//! Payload types, the validated adjacency structure, the cycle-detecting
//! analyzer and diagram renderers.

mod adjacency;
mod analyzer;
mod config;
mod definition;
pub mod render;

pub use adjacency::AdjacencyMap;
pub use analyzer::{GraphAnalyzer, Inspection};
pub use config::{AnalyzerConfig, DuplicatePolicy, CONFIG_FILE};
pub use definition::*;
