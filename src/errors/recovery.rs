// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Error recovery suggestions
//!
//! Provides actionable suggestions for recovering from errors.

/// A recovery suggestion with concrete steps
#[derive(Debug, Clone)]
pub struct RecoverySuggestion {
    /// Brief description of what to do
    pub action: String,
    /// Detailed steps
    pub steps: Vec<String>,
    /// Commands to run
    pub commands: Vec<String>,
}

impl RecoverySuggestion {
    /// Suggest fixing an edge that points at a block that doesn't exist
    pub fn fix_dangling_edge(source: &str, target: &str, missing: &str) -> Self {
        Self {
            action: format!("Reconnect or remove the edge {} -> {}", source, target),
            steps: vec![
                format!("No block has the id '{}'", missing),
                "The block may have been deleted after the edge was drawn".into(),
                "Remove the edge or add a block with that id".into(),
            ],
            commands: vec![
                "# List every problem in the graph:".into(),
                "blockflow validate <graph.json>".into(),
            ],
        }
    }

    /// Suggest fixing a repeated block id
    pub fn fix_duplicate_id(id: &str) -> Self {
        Self {
            action: format!("Rename one of the blocks with id '{}'", id),
            steps: vec![
                "Each block becomes one job keyed by its id".into(),
                "Repeated ids make later blocks replace earlier jobs".into(),
            ],
            commands: vec![
                "# Or accept last-write-wins behaviour:".into(),
                "blockflow generate <graph.json>".into(),
            ],
        }
    }

    /// Suggest fixing malformed graph JSON
    pub fn fix_json_syntax(message: &str) -> Self {
        Self {
            action: "Fix the graph JSON".into(),
            steps: vec![
                message.to_string(),
                "A graph is an object with 'blocks' and 'edges' arrays".into(),
                "Blocks need string 'id' and 'type' fields".into(),
                "Edges need string 'source' and 'target' fields".into(),
            ],
            commands: vec![
                "# Write a sample graph to start from:".into(),
                "blockflow init".into(),
            ],
        }
    }
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "→ {}", self.action)?;

        for step in &self.steps {
            writeln!(f, "  {}", step)?;
        }

        if !self.commands.is_empty() {
            writeln!(f)?;
            for cmd in &self.commands {
                writeln!(f, "  {}", cmd)?;
            }
        }

        Ok(())
    }
}
