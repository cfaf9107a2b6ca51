// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Graph validation
//!
//! Structural checks run before conversion. Cycles are deliberately not
//! looked for: the generated pipeline hands ordering to the CI system.

use std::collections::HashSet;

use crate::errors::BlockflowError;
use crate::graph::{Block, Edge, PipelineGraph};
use crate::pipeline::{ConvertOptions, DuplicateIdPolicy};

/// Characters that change meaning in a YAML plain scalar or a shell word
const SPECIAL_TYPE_CHARS: &[char] = &[
    ':', '#', '\'', '"', '`', '$', ';', '&', '|', '<', '>', '\n', '{', '}', '[', ']',
];

/// Graph validator
pub struct GraphValidator;

impl GraphValidator {
    /// Collect every structural problem in a graph
    ///
    /// Repeated block ids are errors only when the options reject them;
    /// under last-write-wins they convert fine and are reported as warnings.
    pub fn validate(graph: &PipelineGraph, options: &ConvertOptions) -> ValidationResult {
        let mut result = ValidationResult::new();

        let ids: HashSet<&str> = graph.blocks.iter().map(|b| b.id.as_str()).collect();

        // Check for duplicate ids
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for block in &graph.blocks {
            if !seen.insert(block.id.as_str()) && reported.insert(block.id.as_str()) {
                match options.duplicate_ids {
                    DuplicateIdPolicy::Reject => {
                        result.add_error(&format!("Duplicate block id: '{}'", block.id))
                    }
                    DuplicateIdPolicy::LastWriteWins => result.add_warning(&format!(
                        "Duplicate block id: '{}' (the last block with this id wins)",
                        block.id
                    )),
                }
            }
        }

        for block in &graph.blocks {
            Self::validate_block(block, &mut result);
        }

        // Validate edge endpoints
        for (index, edge) in graph.edges.iter().enumerate() {
            if !ids.contains(edge.source.as_str()) {
                result.add_error(&format!(
                    "Edge #{}: source '{}' does not match any block",
                    index, edge.source
                ));
            }
            if !ids.contains(edge.target.as_str()) {
                result.add_error(&format!(
                    "Edge #{}: target '{}' does not match any block",
                    index, edge.target
                ));
            }
            if edge.is_self_loop() {
                result.add_warning(&format!(
                    "Edge #{}: block '{}' depends on itself",
                    index, edge.source
                ));
            }
        }

        // Warn about blocks left out of an otherwise connected graph
        if !graph.edges.is_empty() {
            let connected: HashSet<&str> = graph
                .edges
                .iter()
                .flat_map(|e| [e.source.as_str(), e.target.as_str()])
                .collect();
            for block in &graph.blocks {
                if !connected.contains(block.id.as_str()) {
                    result.add_warning(&format!(
                        "Block '{}' has no edges and will run without dependencies",
                        block.id
                    ));
                }
            }
        }

        result
    }

    fn validate_block(block: &Block, result: &mut ValidationResult) {
        if block.id.is_empty() {
            result.add_warning(&format!(
                "Block of type '{}' has an empty id",
                block.block_type
            ));
        }

        if block.block_type.is_empty() {
            result.add_warning(&format!("Block '{}' has an empty type", block.id));
        } else if block.block_type.contains(SPECIAL_TYPE_CHARS) {
            result.add_warning(&format!(
                "Block '{}': type '{}' contains special characters and is used verbatim in the script",
                block.id, block.block_type
            ));
        }
    }

    /// Fail on the first edge whose endpoint names no block
    ///
    /// Edges are checked in input order; for each edge the target is
    /// checked before the source.
    pub fn check_edges(blocks: &[Block], edges: &[Edge]) -> Result<(), BlockflowError> {
        let ids: HashSet<&str> = blocks.iter().map(|b| b.id.as_str()).collect();

        for (index, edge) in edges.iter().enumerate() {
            for endpoint in [&edge.target, &edge.source] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(BlockflowError::dangling_edge(
                        index,
                        &edge.source,
                        &edge.target,
                        endpoint,
                    ));
                }
            }
        }

        Ok(())
    }

    /// Fail on the first block id that appears twice
    pub fn check_unique_ids(blocks: &[Block]) -> Result<(), BlockflowError> {
        let mut seen = HashSet::new();
        for block in blocks {
            if !seen.insert(block.id.as_str()) {
                return Err(BlockflowError::DuplicateBlockId {
                    id: block.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Result of graph validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    pub fn add_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
