// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Watch command - regenerate the document on graph changes

use colored::Colorize;
use miette::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use super::generate::format_document;
use super::DocumentFormat;
use crate::config::Config;
use crate::graph::PipelineGraph;
use crate::pipeline::GraphConverter;
use crate::utils::fingerprint;

/// Run the watch command
pub async fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    debounce_ms: u64,
    config: &Config,
    verbose: bool,
) -> Result<()> {
    if !input.is_file() {
        return Err(miette::miette!(
            "Graph file not found: {}\n\n\
             Run 'blockflow init' to create a sample graph.",
            input.display()
        ));
    }

    let converter = GraphConverter::new(config.convert.into());

    eprintln!("{}", "Starting watch mode...".bold());
    eprintln!(
        "Watching {} for changes (debounce: {}ms)",
        input.display(),
        debounce_ms
    );
    eprintln!("Press {} to exit.", "Ctrl+C".cyan());
    eprintln!();

    let (tx, rx) = channel();

    let mut debouncer = new_debouncer(Duration::from_millis(debounce_ms), tx)
        .map_err(|e| miette::miette!("Failed to create file watcher: {}", e))?;

    // Editors often replace the file on save, so watch its directory
    let watch_dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| miette::miette!("Failed to start watching: {}", e))?;

    let mut last = regenerate(&converter, &input, output.as_deref(), None);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let touched = events
                    .iter()
                    .filter(|e| matches!(e.kind, DebouncedEventKind::Any))
                    .any(|e| same_file(&e.path, &input));

                if touched {
                    if verbose {
                        eprintln!("{}: {}", "Change detected".yellow(), input.display());
                    }
                    last = regenerate(&converter, &input, output.as_deref(), last);
                }
            }
            Ok(Err(e)) => {
                eprintln!("{}: {:?}", "Watch error".red(), e);
            }
            Err(e) => {
                // Channel closed
                eprintln!("{}: {}", "Channel error".red(), e);
                break;
            }
        }
    }

    Ok(())
}

fn same_file(event_path: &Path, input: &Path) -> bool {
    match (event_path.canonicalize(), input.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => event_path.file_name() == input.file_name(),
    }
}

/// Regenerate if the graph's fingerprint changed; returns the fingerprint
/// of the last successfully handled content
fn regenerate(
    converter: &GraphConverter,
    input: &Path,
    output: Option<&Path>,
    previous: Option<String>,
) -> Option<String> {
    let content = match std::fs::read(input) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "Failed to read graph".red(), e);
            return previous;
        }
    };

    let digest = fingerprint(&content);
    if previous.as_deref() == Some(digest.as_str()) {
        tracing::debug!("{} unchanged, skipping", input.display());
        return previous;
    }

    let rendered = std::str::from_utf8(&content)
        .map_err(|e| e.to_string())
        .and_then(|text| PipelineGraph::from_json(text).map_err(|e| e.to_string()))
        .and_then(|graph| converter.convert_graph(&graph).map_err(|e| e.to_string()))
        .and_then(|doc| format_document(&doc, DocumentFormat::Yaml).map_err(|e| e.to_string()));

    match rendered {
        Ok(yaml) => {
            match output {
                Some(path) => match std::fs::write(path, &yaml) {
                    Ok(()) => eprintln!("{} {}", "✓".green(), path.display()),
                    Err(e) => {
                        eprintln!("{}: {}", "Failed to write output".red(), e);
                        return previous;
                    }
                },
                None => {
                    println!("{}", "---".dimmed());
                    print!("{}", yaml);
                }
            }
            Some(digest)
        }
        Err(e) => {
            eprintln!("{}: {}", "Generation failed".red(), e);
            // Remember the broken content so identical saves stay quiet
            Some(digest)
        }
    }
}
