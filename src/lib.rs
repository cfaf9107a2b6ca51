// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! # blockflow - Visual Pipeline to CI YAML
//!
//! `blockflow` turns the block/edge graphs drawn in a visual pipeline editor
//! into staged CI pipeline documents.
//!
//! ## Features
//!
//! - **Stages from block types** - in first-seen order
//! - **One job per block** - keyed by block id, with `needs` from edges
//! - **Strict endpoints** - edges to unknown blocks reject the whole graph
//! - **HTTP service** - `POST /generate-yaml`, optionally serving the editor
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a config and a sample graph
//! blockflow init
//!
//! # Print the generated pipeline
//! blockflow generate pipeline.graph.json
//!
//! # Run the HTTP service
//! blockflow serve --static-dir frontend
//! ```
//!
//! ## Library use
//!
//! ```
//! use blockflow::{convert, Block, Edge, PipelineGraph};
//!
//! let graph = PipelineGraph::new(
//!     vec![Block::new("a", "build"), Block::new("b", "test")],
//!     vec![Edge::new("a", "b")],
//! );
//! let doc = convert(&graph).unwrap();
//! assert_eq!(doc.stages, vec!["build", "test"]);
//! assert_eq!(doc.jobs["b"].needs(), ["a"]);
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod pipeline;
pub mod server;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{BlockflowError, BlockflowResult};
pub use graph::{Block, Edge, PipelineGraph};
pub use pipeline::{convert, ConvertOptions, DuplicateIdPolicy, GraphConverter, Job, PipelineDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
