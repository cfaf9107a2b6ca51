// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for blockflow.

pub mod generate;
pub mod graph;
pub mod init;
pub mod serve;
pub mod validate;
pub mod watch;

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use crate::errors::BlockflowError;
use crate::graph::PipelineGraph;

/// Visual pipeline to CI YAML generator
///
/// Convert block/edge graphs from the pipeline editor into staged CI jobs.
#[derive(Parser, Debug)]
#[clap(
    name = "blockflow",
    version,
    about = "Turn visual pipeline graphs into staged CI pipeline YAML",
    long_about = None,
    after_help = "Examples:\n\
        blockflow init                           Write a config and a sample graph\n\
        blockflow generate pipeline.graph.json   Print the generated YAML\n\
        blockflow validate pipeline.graph.json   Check a graph for problems\n\
        blockflow serve --port 8000              Run the HTTP service\n\n\
        See 'blockflow <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Config file (default: .blockflow.yaml, then the user config directory)
    #[clap(long, global = true, env = "BLOCKFLOW_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a pipeline document from one or more graphs
    Generate {
        /// Graph files or glob patterns ('-' reads stdin)
        #[clap(required = true)]
        inputs: Vec<String>,

        /// Output file for a single graph (default: stdout)
        #[clap(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Output directory, one document per graph
        #[clap(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Output format
        #[clap(short, long, default_value = "yaml")]
        format: DocumentFormat,

        /// Fail when two blocks share an id
        #[clap(long)]
        reject_duplicates: bool,
    },

    /// Check a graph for dangling edges, duplicate ids and other problems
    Validate {
        /// Graph file ('-' reads stdin)
        input: String,

        /// Treat blocks that share an id as errors
        #[clap(long)]
        reject_duplicates: bool,
    },

    /// Show a graph's blocks and dependencies
    Graph {
        /// Graph file ('-' reads stdin)
        input: String,

        /// Output format (text, dot, mermaid)
        #[clap(short, long, default_value = "text")]
        format: GraphFormat,
    },

    /// Run the HTTP service
    Serve {
        /// Interface to bind
        #[clap(long, env = "BLOCKFLOW_HOST")]
        host: Option<String>,

        /// Port to bind
        #[clap(short, long, env = "BLOCKFLOW_PORT")]
        port: Option<u16>,

        /// Serve the editor frontend from this directory
        #[clap(long, env = "BLOCKFLOW_STATIC_DIR", value_name = "DIR")]
        static_dir: Option<PathBuf>,
    },

    /// Regenerate whenever the graph file changes
    Watch {
        /// Graph file to watch
        input: PathBuf,

        /// Output file (default: stdout)
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Debounce delay in milliseconds
        #[clap(long, default_value = "300")]
        debounce: u64,
    },

    /// Write a config file and a sample graph
    Init {
        /// Overwrite existing files
        #[clap(long)]
        force: bool,
    },
}

/// Output format for generated documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// File extension for written documents
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yml",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
}

impl std::str::FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "dot" => Ok(Self::Dot),
            "mermaid" => Ok(Self::Mermaid),
            _ => Err(format!("Unknown graph format: {}", s)),
        }
    }
}

/// Read a graph from a path, or stdin for `-`
pub fn read_graph(input: &str) -> Result<PipelineGraph, BlockflowError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| BlockflowError::FileReadError {
                path: PathBuf::from("<stdin>"),
                error: e.to_string(),
            })?;
        return PipelineGraph::from_json(&content);
    }

    PipelineGraph::from_file(std::path::Path::new(input))
}

/// Print any recovery hint for an error, then hand it to miette
pub fn report(e: BlockflowError) -> miette::Report {
    if let Some(suggestion) = e.suggestion() {
        eprintln!("{}", suggestion);
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from([
            "blockflow",
            "generate",
            "a.json",
            "graphs/*.json",
            "--out-dir",
            "ci",
            "--format",
            "json",
            "--reject-duplicates",
        ]);

        match cli.command {
            Commands::Generate {
                inputs,
                output,
                out_dir,
                format,
                reject_duplicates,
            } => {
                assert_eq!(inputs, vec!["a.json", "graphs/*.json"]);
                assert!(output.is_none());
                assert_eq!(out_dir, Some(PathBuf::from("ci")));
                assert_eq!(format, DocumentFormat::Json);
                assert!(reject_duplicates);
            }
            other => panic!("Expected Generate, got {:?}", other),
        }
    }

    #[test]
    fn test_output_conflicts_with_out_dir() {
        let result = Cli::try_parse_from([
            "blockflow", "generate", "a.json", "-o", "x.yml", "--out-dir", "ci",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("YML".parse::<DocumentFormat>().unwrap(), DocumentFormat::Yaml);
        assert!("xml".parse::<DocumentFormat>().is_err());
        assert_eq!("mermaid".parse::<GraphFormat>().unwrap(), GraphFormat::Mermaid);
        assert!("svg".parse::<GraphFormat>().is_err());
    }
}
