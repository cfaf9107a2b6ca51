// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Graph to pipeline conversion
//!
//! One pass over blocks builds stages and jobs, one pass over edges fills in
//! `needs`. Output order is a pure function of input order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::BlockflowError;
use crate::graph::{Block, Edge, GraphValidator, PipelineGraph};
use crate::pipeline::{Job, PipelineDocument};

/// How to treat blocks that share an id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateIdPolicy {
    /// Later blocks replace the job body; `needs` still accumulate on the key
    #[default]
    LastWriteWins,
    /// Fail the conversion with `DuplicateBlockId`
    Reject,
}

impl std::fmt::Display for DuplicateIdPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastWriteWins => write!(f, "last-write-wins"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for DuplicateIdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last-write-wins" => Ok(Self::LastWriteWins),
            "reject" => Ok(Self::Reject),
            _ => Err(format!("Unknown duplicate id policy: {}", s)),
        }
    }
}

/// Conversion options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub duplicate_ids: DuplicateIdPolicy,
}

/// Converts editor graphs into pipeline documents
#[derive(Debug, Clone, Default)]
pub struct GraphConverter {
    options: ConvertOptions,
}

impl GraphConverter {
    /// Create a converter with the given options
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert blocks and edges into a pipeline document
    ///
    /// Every edge endpoint is checked before any job is built, so a dangling
    /// edge rejects the whole graph.
    pub fn convert(
        &self,
        blocks: &[Block],
        edges: &[Edge],
    ) -> Result<PipelineDocument, BlockflowError> {
        if self.options.duplicate_ids == DuplicateIdPolicy::Reject {
            GraphValidator::check_unique_ids(blocks)?;
        }
        GraphValidator::check_edges(blocks, edges)?;

        let mut doc = PipelineDocument::default();

        for block in blocks {
            if !doc.stages.contains(&block.block_type) {
                doc.stages.push(block.block_type.clone());
            }
            // Replacing an id keeps its original position in the map
            doc.jobs
                .insert(block.id.clone(), Job::for_type(&block.block_type));
        }

        for edge in edges {
            if let Some(job) = doc.jobs.get_mut(&edge.target) {
                job.push_need(&edge.source);
            }
        }

        debug!(
            blocks = blocks.len(),
            edges = edges.len(),
            stages = doc.stages.len(),
            jobs = doc.jobs.len(),
            "converted graph"
        );

        Ok(doc)
    }

    /// Convert a whole graph
    pub fn convert_graph(&self, graph: &PipelineGraph) -> Result<PipelineDocument, BlockflowError> {
        self.convert(&graph.blocks, &graph.edges)
    }

    /// Convert a graph and render it as YAML
    pub fn render_yaml(&self, graph: &PipelineGraph) -> Result<String, BlockflowError> {
        self.convert_graph(graph)?.to_yaml()
    }
}

/// Convert a graph with default options
pub fn convert(graph: &PipelineGraph) -> Result<PipelineDocument, BlockflowError> {
    GraphConverter::default().convert_graph(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(items: &[(&str, &str)]) -> Vec<Block> {
        items.iter().map(|(id, ty)| Block::new(*id, *ty)).collect()
    }

    fn edges(items: &[(&str, &str)]) -> Vec<Edge> {
        items.iter().map(|(s, t)| Edge::new(*s, *t)).collect()
    }

    #[test]
    fn test_empty_graph() {
        let doc = GraphConverter::default().convert(&[], &[]).unwrap();
        assert!(doc.stages.is_empty());
        assert!(doc.jobs.is_empty());
    }

    #[test]
    fn test_build_then_test() {
        let doc = GraphConverter::default()
            .convert(&blocks(&[("a", "build"), ("b", "test")]), &edges(&[("a", "b")]))
            .unwrap();

        assert_eq!(doc.stages, vec!["build", "test"]);
        assert_eq!(doc.jobs["a"], Job::for_type("build"));
        assert_eq!(
            doc.jobs["b"],
            Job {
                stage: "test".into(),
                script: "echo test".into(),
                needs: Some(vec!["a".into()]),
            }
        );
    }

    #[test]
    fn test_build_then_test_yaml() {
        let graph = PipelineGraph::new(
            blocks(&[("a", "build"), ("b", "test")]),
            edges(&[("a", "b")]),
        );
        let yaml = GraphConverter::default().render_yaml(&graph).unwrap();

        insta::assert_snapshot!(yaml, @r"
        stages:
        - build
        - test
        jobs:
          a:
            stage: build
            script: echo build
          b:
            stage: test
            script: echo test
            needs:
            - a
        ");
    }

    #[test]
    fn test_shared_type_single_stage() {
        let doc = GraphConverter::default()
            .convert(&blocks(&[("a", "lint"), ("b", "lint")]), &[])
            .unwrap();

        assert_eq!(doc.stages, vec!["lint"]);
        assert_eq!(doc.jobs.len(), 2);
        assert!(doc.jobs.values().all(|j| j.stage == "lint"));
    }

    #[test]
    fn test_stages_in_first_seen_order() {
        let doc = GraphConverter::default()
            .convert(
                &blocks(&[("1", "test"), ("2", "build"), ("3", "test"), ("4", "deploy"), ("5", "build")]),
                &[],
            )
            .unwrap();

        assert_eq!(doc.stages, vec!["test", "build", "deploy"]);
    }

    #[test]
    fn test_needs_follow_edge_order() {
        let doc = GraphConverter::default()
            .convert(
                &blocks(&[("a", "build"), ("b", "build"), ("c", "test"), ("d", "deploy")]),
                &edges(&[("b", "d"), ("a", "c"), ("c", "d"), ("a", "d")]),
            )
            .unwrap();

        assert_eq!(doc.jobs["c"].needs(), ["a"]);
        assert_eq!(doc.jobs["d"].needs(), ["b", "c", "a"]);
        assert!(doc.jobs["a"].needs.is_none());
    }

    #[test]
    fn test_repeated_edges_are_not_deduplicated() {
        let doc = GraphConverter::default()
            .convert(&blocks(&[("a", "build"), ("b", "test")]), &edges(&[("a", "b"), ("a", "b")]))
            .unwrap();

        assert_eq!(doc.jobs["b"].needs(), ["a", "a"]);
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let doc = GraphConverter::default()
            .convert(
                &blocks(&[("x", "build"), ("y", "test"), ("x", "deploy")]),
                &edges(&[("y", "x")]),
            )
            .unwrap();

        assert_eq!(doc.stages, vec!["build", "test", "deploy"]);
        assert_eq!(doc.jobs.len(), 2);
        assert_eq!(doc.jobs.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(doc.jobs["x"].stage, "deploy");
        assert_eq!(doc.jobs["x"].script, "echo deploy");
        assert_eq!(doc.jobs["x"].needs(), ["y"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let converter = GraphConverter::new(ConvertOptions {
            duplicate_ids: DuplicateIdPolicy::Reject,
        });
        let result = converter.convert(&blocks(&[("x", "build"), ("x", "deploy")]), &[]);

        assert!(matches!(result, Err(BlockflowError::DuplicateBlockId { id }) if id == "x"));
    }

    #[test]
    fn test_dangling_target_rejected() {
        let result = GraphConverter::default()
            .convert(&blocks(&[("a", "build")]), &edges(&[("a", "ghost")]));

        match result {
            Err(BlockflowError::DanglingEdge {
                index,
                source_id,
                target,
                missing,
            }) => {
                assert_eq!(index, 0);
                assert_eq!(source_id, "a");
                assert_eq!(target, "ghost");
                assert_eq!(missing, "ghost");
            }
            other => panic!("Expected DanglingEdge, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_source_rejected() {
        let result = GraphConverter::default()
            .convert(&blocks(&[("a", "build")]), &edges(&[("ghost", "a")]));

        assert!(matches!(result, Err(BlockflowError::DanglingEdge { missing, .. }) if missing == "ghost"));
    }

    #[test]
    fn test_data_and_position_are_ignored() {
        let json = r#"{
            "blocks": [
                {"id": "a", "type": "build", "data": {"script": "make"}, "position": {"x": 1}},
                {"id": "b", "type": "build", "data": {}, "position": {"x": 999, "y": -4}}
            ],
            "edges": []
        }"#;
        let graph = PipelineGraph::from_json(json).unwrap();
        let doc = convert(&graph).unwrap();

        assert_eq!(doc.jobs["a"], doc.jobs["b"]);
        assert_eq!(doc.jobs["a"].script, "echo build");
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let graph = PipelineGraph::new(
            blocks(&[("q", "test"), ("p", "build"), ("r", "deploy")]),
            edges(&[("p", "q"), ("q", "r"), ("p", "r")]),
        );
        let converter = GraphConverter::default();

        let first = converter.render_yaml(&graph).unwrap();
        let second = converter.render_yaml(&graph).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("reject".parse::<DuplicateIdPolicy>().unwrap(), DuplicateIdPolicy::Reject);
        assert_eq!(
            "Last-Write-Wins".parse::<DuplicateIdPolicy>().unwrap(),
            DuplicateIdPolicy::LastWriteWins
        );
        assert!("first".parse::<DuplicateIdPolicy>().is_err());
        assert_eq!(DuplicateIdPolicy::Reject.to_string(), "reject");
    }
}
