// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Validate command - check a graph before generating from it

use colored::Colorize;
use miette::Result;

use super::{read_graph, report};
use crate::config::Config;
use crate::graph::GraphValidator;
use crate::pipeline::{ConvertOptions, DuplicateIdPolicy};
use crate::utils::{print_error, print_info, print_section, print_success, print_warning};

/// Run the validate command
pub async fn run(
    input: String,
    reject_duplicates: bool,
    config: &Config,
    verbose: bool,
) -> Result<()> {
    let mut options = ConvertOptions::from(config.convert);
    if reject_duplicates {
        options.duplicate_ids = DuplicateIdPolicy::Reject;
    }

    eprintln!("{}", "Validating graph...".bold());
    eprintln!();

    let graph = match read_graph(&input) {
        Ok(g) => g,
        Err(e) => {
            print_error("Failed to parse graph");
            eprintln!();
            return Err(report(e));
        }
    };

    print_success("Graph file is valid JSON");

    let validation = GraphValidator::validate(&graph, &options);

    if !validation.errors.is_empty() {
        print_section(&"Errors".red().to_string());
        for error in &validation.errors {
            print_error(error);
        }
    }

    if !validation.warnings.is_empty() {
        print_section(&"Warnings".yellow().to_string());
        for warning in &validation.warnings {
            print_warning(warning);
        }
    }

    if verbose {
        print_section("Graph summary");
        eprintln!("  Duplicate ids: {}", options.duplicate_ids);
        eprintln!("  Blocks: {}", graph.blocks.len());
        eprintln!("  Edges: {}", graph.edges.len());
        for block in &graph.blocks {
            print_info(&format!("{} ({})", block.id, block.block_type));
        }
    }

    eprintln!();

    if !validation.is_valid() {
        return Err(miette::miette!(
            "Graph validation failed with {} error(s)",
            validation.errors.len()
        ));
    }

    if validation.has_warnings() {
        eprintln!("{}", "Graph is valid but has warnings.".yellow().bold());
    } else {
        eprintln!("{}", "Graph is valid!".green().bold());
    }

    Ok(())
}
