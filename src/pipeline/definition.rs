// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Pipeline document structures
//!
//! The staged CI document produced from an editor graph. Key order is
//! significant: `stages` before `jobs`, jobs in insertion order, and each
//! job as `stage`, `script`, `needs`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::BlockflowError;

/// Generated CI pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDocument {
    /// Stage names in execution order
    pub stages: Vec<String>,

    /// Job definitions keyed by block id
    pub jobs: IndexMap<String, Job>,
}

impl PipelineDocument {
    /// Render the document as YAML
    pub fn to_yaml(&self) -> Result<String, BlockflowError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Render the document as pretty JSON
    pub fn to_json(&self) -> Result<String, BlockflowError> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

/// A single CI job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Stage the job belongs to
    pub stage: String,

    /// Shell command the job runs
    pub script: String,

    /// Jobs that must finish first; omitted when nothing points here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs: Option<Vec<String>>,
}

impl Job {
    /// Job for a block of the given type
    pub fn for_type(block_type: &str) -> Self {
        Self {
            stage: block_type.to_string(),
            script: format!("echo {}", block_type),
            needs: None,
        }
    }

    /// Append a dependency, creating the list on first use
    pub fn push_need(&mut self, job: &str) {
        self.needs.get_or_insert_with(Vec::new).push(job.to_string());
    }

    /// Dependencies as a slice (empty when none)
    pub fn needs(&self) -> &[String] {
        self.needs.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_for_type() {
        let job = Job::for_type("build");
        assert_eq!(job.stage, "build");
        assert_eq!(job.script, "echo build");
        assert!(job.needs.is_none());
        assert!(job.needs().is_empty());
    }

    #[test]
    fn test_script_is_not_escaped() {
        let job = Job::for_type("a b; rm -rf");
        assert_eq!(job.script, "echo a b; rm -rf");
    }

    #[test]
    fn test_push_need_preserves_order() {
        let mut job = Job::for_type("test");
        job.push_need("b");
        job.push_need("a");
        job.push_need("b");
        assert_eq!(job.needs(), ["b", "a", "b"]);
    }

    #[test]
    fn test_empty_document_yaml() {
        let yaml = PipelineDocument::default().to_yaml().unwrap();
        assert_eq!(yaml, "stages: []\njobs: {}\n");
    }

    #[test]
    fn test_needs_omitted_when_absent() {
        let mut doc = PipelineDocument::default();
        doc.stages.push("lint".into());
        doc.jobs.insert("a".into(), Job::for_type("lint"));

        let yaml = doc.to_yaml().unwrap();
        assert!(!yaml.contains("needs"));

        let json = doc.to_json().unwrap();
        assert!(!json.contains("needs"));
    }

    #[test]
    fn test_jobs_keep_insertion_order() {
        let mut doc = PipelineDocument::default();
        for id in ["zeta", "alpha", "mid"] {
            doc.jobs.insert(id.into(), Job::for_type("build"));
        }

        let yaml = doc.to_yaml().unwrap();
        let zeta = yaml.find("zeta:").unwrap();
        let alpha = yaml.find("alpha:").unwrap();
        let mid = yaml.find("mid:").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }
}
