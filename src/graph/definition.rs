// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Graph definition structures
//!
//! The shape the visual editor submits: blocks plus directed edges.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::errors::BlockflowError;

/// A graph drawn in the pipeline editor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineGraph {
    /// Blocks in the order the editor lists them
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Directed dependencies between blocks
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl PipelineGraph {
    /// Create a graph from blocks and edges
    pub fn new(blocks: Vec<Block>, edges: Vec<Edge>) -> Self {
        Self { blocks, edges }
    }

    /// Load a graph from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, BlockflowError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| BlockflowError::FileReadError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        Self::from_json(&content)
    }

    /// Parse a graph from a JSON string
    pub fn from_json(json: &str) -> Result<Self, BlockflowError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Serialize the graph back to pretty JSON
    pub fn to_json(&self) -> Result<String, BlockflowError> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Get the first block with the given id
    pub fn get_block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Get all block ids, in input order (repeats included)
    pub fn block_ids(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.id.as_str()).collect()
    }
}

/// A single step in the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Identifier, becomes the job key
    pub id: String,

    /// Block type, becomes the stage name and the script argument
    #[serde(rename = "type")]
    pub block_type: String,

    /// Per-block parameters (carried, not interpreted)
    #[serde(default)]
    pub data: Map<String, Value>,

    /// Editor layout coordinates (carried, not interpreted)
    #[serde(default)]
    pub position: Map<String, Value>,
}

impl Block {
    /// Create a block with empty data and position
    pub fn new(id: impl Into<String>, block_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            data: Map::new(),
            position: Map::new(),
        }
    }
}

/// `source` must finish before `target` starts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
