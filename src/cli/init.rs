// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Init command - write a config file and a sample graph

use colored::Colorize;
use miette::Result;
use std::path::Path;

use crate::config::Config;
use crate::graph::{Block, Edge, PipelineGraph};

/// Config file written by `init`
pub const CONFIG_FILE: &str = ".blockflow.yaml";

/// Sample graph written by `init`
pub const SAMPLE_GRAPH: &str = "pipeline.graph.json";

/// Run the init command
pub async fn run(force: bool, verbose: bool) -> Result<()> {
    eprintln!("{}", "Initializing blockflow project...".bold());
    eprintln!();

    for file in [CONFIG_FILE, SAMPLE_GRAPH] {
        if Path::new(file).exists() && !force {
            return Err(miette::miette!(
                "{} already exists. Use --force to overwrite.",
                file
            ));
        }
    }

    let config = Config::default().to_yaml()?;
    std::fs::write(CONFIG_FILE, &config)
        .map_err(|e| miette::miette!("Failed to write {}: {}", CONFIG_FILE, e))?;
    eprintln!("  {} Created {}", "✓".green(), CONFIG_FILE);

    let graph = sample_graph().to_json()?;
    std::fs::write(SAMPLE_GRAPH, format!("{}\n", graph))
        .map_err(|e| miette::miette!("Failed to write {}: {}", SAMPLE_GRAPH, e))?;
    eprintln!("  {} Created {}", "✓".green(), SAMPLE_GRAPH);

    eprintln!();
    eprintln!("{}", "Project initialized!".green().bold());
    eprintln!();
    eprintln!("Next steps:");
    eprintln!("  1. Edit {} or draw a graph in the editor", SAMPLE_GRAPH.cyan());
    eprintln!(
        "  2. Run {} to print the pipeline",
        format!("blockflow generate {}", SAMPLE_GRAPH).cyan()
    );
    eprintln!("  3. Run {} to start the HTTP service", "blockflow serve".cyan());
    eprintln!();

    if verbose {
        eprintln!("{}:", "Config".bold());
        eprint!("{}", config.dimmed());
    }

    Ok(())
}

/// A build → test → deploy graph with a parallel lint job
pub fn sample_graph() -> PipelineGraph {
    let block = |id: &str, ty: &str, label: &str, y: i64| {
        let mut b = Block::new(id, ty);
        b.data.insert("label".into(), label.into());
        b.position.insert("x".into(), 40.into());
        b.position.insert("y".into(), y.into());
        b
    };

    PipelineGraph::new(
        vec![
            block("compile", "build", "Compile", 40),
            block("lint", "test", "Lint", 140),
            block("unit", "test", "Unit tests", 240),
            block("ship", "deploy", "Deploy", 340),
        ],
        vec![
            Edge::new("compile", "unit"),
            Edge::new("lint", "ship"),
            Edge::new("unit", "ship"),
        ],
    )
}
