// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Graph view for inspecting block dependencies
//!
//! Wraps the editor graph in a petgraph `DiGraph` so it can be queried and
//! rendered as text, DOT or Mermaid.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use crate::errors::BlockflowError;
use crate::graph::{GraphValidator, PipelineGraph};

/// Dependency graph keyed by block id
pub struct GraphView {
    /// Node weight is the block type of the last block with that id
    graph: DiGraph<String, ()>,
    id_to_index: HashMap<String, NodeIndex>,
    index_to_id: HashMap<NodeIndex, String>,
}

impl GraphView {
    /// Build a view from a graph
    ///
    /// Nodes follow first appearance of each block id; edges keep input order.
    pub fn build(pipeline: &PipelineGraph) -> Result<Self, BlockflowError> {
        GraphValidator::check_edges(&pipeline.blocks, &pipeline.edges)?;

        let mut graph = DiGraph::new();
        let mut id_to_index = HashMap::new();
        let mut index_to_id = HashMap::new();

        for block in &pipeline.blocks {
            let existing = id_to_index.get(&block.id).copied();
            match existing {
                Some(node) => graph[node] = block.block_type.clone(),
                None => {
                    let node = graph.add_node(block.block_type.clone());
                    id_to_index.insert(block.id.clone(), node);
                    index_to_id.insert(node, block.id.clone());
                }
            }
        }

        for edge in &pipeline.edges {
            let from = id_to_index[&edge.source];
            let to = id_to_index[&edge.target];
            graph.add_edge(from, to, ());
        }

        Ok(Self {
            graph,
            id_to_index,
            index_to_id,
        })
    }

    /// Number of distinct block ids
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Block ids that must run before `id`, in edge order
    pub fn dependencies(&self, id: &str) -> Option<Vec<String>> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Block ids that wait on `id`, in edge order
    pub fn dependents(&self, id: &str) -> Option<Vec<String>> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Option<Vec<String>> {
        let node = self.id_to_index.get(id)?;
        let mut edges: Vec<_> = self.graph.edges_directed(*node, direction).collect();
        // petgraph walks adjacency lists newest-first
        edges.sort_by_key(|e| e.id());
        Some(
            edges
                .into_iter()
                .map(|e| {
                    let other = match direction {
                        Direction::Incoming => e.source(),
                        Direction::Outgoing => e.target(),
                    };
                    self.index_to_id[&other].clone()
                })
                .collect(),
        )
    }

    /// Generate Mermaid diagram of the graph
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");

        for node in self.graph.node_indices() {
            out.push_str(&format!(
                "    n{}[\"{}: {}\"]\n",
                node.index(),
                escape_label(&self.index_to_id[&node]),
                escape_label(&self.graph[node])
            ));
        }

        for edge in self.graph.edge_references() {
            out.push_str(&format!(
                "    n{} --> n{}\n",
                edge.source().index(),
                edge.target().index()
            ));
        }

        out
    }

    /// Generate DOT diagram of the graph
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for node in self.graph.node_indices() {
            out.push_str(&format!(
                "    \"{}\" [label=\"{}\\n({})\"];\n",
                escape_label(&self.index_to_id[&node]),
                escape_label(&self.index_to_id[&node]),
                escape_label(&self.graph[node])
            ));
        }

        if self.graph.edge_count() > 0 {
            out.push('\n');
        }

        for edge in self.graph.edge_references() {
            out.push_str(&format!(
                "    \"{}\" -> \"{}\";\n",
                escape_label(&self.index_to_id[&edge.source()]),
                escape_label(&self.index_to_id[&edge.target()])
            ));
        }

        out.push_str("}\n");
        out
    }

    /// Generate a plain listing of blocks and what they wait on
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for (i, node) in self.graph.node_indices().enumerate() {
            let id = &self.index_to_id[&node];
            let deps = self.dependencies(id).unwrap_or_default();

            out.push_str(&format!("{}. {} ({})", i + 1, id, self.graph[node]));

            if !deps.is_empty() {
                out.push_str(&format!(" [needs: {}]", deps.join(", ")));
            }

            out.push('\n');
        }

        out
    }
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
