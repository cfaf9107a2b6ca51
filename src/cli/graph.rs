// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Graph command - visualize the editor graph

use miette::Result;

use super::{read_graph, report, GraphFormat};
use crate::graph::GraphView;

/// Run the graph command
pub async fn run(input: String, format: GraphFormat, _verbose: bool) -> Result<()> {
    let graph = read_graph(&input).map_err(report)?;
    let view = GraphView::build(&graph).map_err(report)?;

    let output = match format {
        GraphFormat::Text => view.to_text(),
        GraphFormat::Dot => view.to_dot(),
        GraphFormat::Mermaid => view.to_mermaid(),
    };

    print!("{}", output);

    Ok(())
}
