// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Generate command - convert graphs into pipeline documents

use miette::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{read_graph, report, DocumentFormat};
use crate::config::Config;
use crate::errors::BlockflowError;
use crate::pipeline::{ConvertOptions, DuplicateIdPolicy, GraphConverter, PipelineDocument};
use crate::utils::{print_success, print_warning};

/// Run the generate command
pub async fn run(
    inputs: Vec<String>,
    output: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    format: DocumentFormat,
    reject_duplicates: bool,
    config: &Config,
    verbose: bool,
) -> Result<()> {
    let mut options = ConvertOptions::from(config.convert);
    if reject_duplicates {
        options.duplicate_ids = DuplicateIdPolicy::Reject;
    }
    let converter = GraphConverter::new(options);

    let sources = resolve_inputs(&inputs).map_err(report)?;

    if sources.len() > 1 && out_dir.is_none() {
        return Err(miette::miette!(
            "{} graphs matched; pass --out-dir to write one document per graph",
            sources.len()
        ));
    }

    if let Some(dir) = out_dir {
        let targets = plan_outputs(&sources, &dir, format).map_err(report)?;

        std::fs::create_dir_all(&dir).map_err(|e| BlockflowError::FileWriteError {
            path: dir.clone(),
            error: e.to_string(),
        })?;

        for (source, target) in sources.iter().zip(&targets) {
            let rendered = render(&converter, source, format).map_err(report)?;
            write_output(target, &rendered)?;
            if verbose {
                print_success(&format!("{} → {}", source, target.display()));
            }
        }
        return Ok(());
    }

    // Exactly one source remains here
    let source = &sources[0];
    let rendered = render(&converter, source, format).map_err(report)?;

    match output {
        Some(path) => {
            write_output(&path, &rendered)?;
            if verbose {
                print_success(&format!("Wrote {}", path.display()));
            }
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Expand glob patterns, keeping plain paths and `-` as given
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<String>, BlockflowError> {
    let mut resolved = Vec::new();

    for input in inputs {
        if input == "-" || !is_glob(input) {
            resolved.push(input.clone());
            continue;
        }

        let mut matched: Vec<PathBuf> = glob::glob(input)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    print_warning(&format!("Skipping unreadable path: {}", e));
                    None
                }
            })
            .filter(|p| p.is_file())
            .collect();

        if matched.is_empty() {
            return Err(BlockflowError::NoInputFiles {
                pattern: input.clone(),
            });
        }

        matched.sort();
        resolved.extend(matched.into_iter().map(|p| p.to_string_lossy().to_string()));
    }

    Ok(resolved)
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn render(
    converter: &GraphConverter,
    source: &str,
    format: DocumentFormat,
) -> Result<String, BlockflowError> {
    let graph = read_graph(source)?;
    let doc = converter.convert_graph(&graph)?;
    tracing::debug!("{}: {} stages, {} jobs", source, doc.stages.len(), doc.jobs.len());
    format_document(&doc, format)
}

/// Serialize a document in the requested format
pub fn format_document(doc: &PipelineDocument, format: DocumentFormat) -> Result<String, BlockflowError> {
    match format {
        DocumentFormat::Yaml => doc.to_yaml(),
        DocumentFormat::Json => doc.to_json().map(|mut json| {
            json.push('\n');
            json
        }),
    }
}

/// Output path for each input in batch mode
///
/// Fails before anything is written when two inputs map to the same file.
fn plan_outputs(
    sources: &[String],
    dir: &Path,
    format: DocumentFormat,
) -> Result<Vec<PathBuf>, BlockflowError> {
    let mut claimed: HashMap<PathBuf, &str> = HashMap::new();
    let mut targets = Vec::with_capacity(sources.len());

    for source in sources {
        let target = dir.join(format!("{}.{}", output_stem(source), format.extension()));
        if let Some(first) = claimed.insert(target.clone(), source) {
            return Err(BlockflowError::OutputCollision {
                target,
                first: first.to_string(),
                second: source.clone(),
            });
        }
        targets.push(target);
    }

    Ok(targets)
}

/// Output file name for a graph file: `ci.graph.json` becomes `ci`
fn output_stem(source: &str) -> String {
    if source == "-" {
        return "stdin".to_string();
    }

    let name = Path::new(source)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "pipeline".to_string());

    let trimmed = name
        .strip_suffix(".json")
        .map(|s| s.strip_suffix(".graph").unwrap_or(s))
        .unwrap_or(&name);

    trimmed.to_string()
}

fn write_output(path: &Path, content: &str) -> Result<(), BlockflowError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| BlockflowError::FileWriteError {
            path: parent.to_path_buf(),
            error: e.to_string(),
        })?;
    }

    std::fs::write(path, content).map_err(|e| BlockflowError::FileWriteError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}
