// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Error types with actionable messages
//!
//! Every failure the converter can produce has its own variant, so callers
//! (the CLI and the HTTP layer) can report it without string matching.

mod recovery;

pub use recovery::RecoverySuggestion;

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for blockflow operations
pub type BlockflowResult<T> = Result<T, BlockflowError>;

/// Main error type for blockflow
#[derive(Error, Debug, Diagnostic)]
pub enum BlockflowError {
    // ─────────────────────────────────────────────────────────────────────────
    // Graph Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Edge #{index} ({source_id} -> {target}) references unknown block '{missing}'")]
    #[diagnostic(
        code(blockflow::dangling_edge),
        help("Every edge endpoint must match the id of a block in the same graph")
    )]
    DanglingEdge {
        index: usize,
        source_id: String,
        target: String,
        missing: String,
    },

    #[error("Block id '{id}' is used more than once")]
    #[diagnostic(
        code(blockflow::duplicate_block_id),
        help("Give each block a unique id, or allow duplicates with the last-write-wins policy")
    )]
    DuplicateBlockId { id: String },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(blockflow::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(blockflow::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    #[error("Inputs '{first}' and '{second}' would both write '{target}'")]
    #[diagnostic(
        code(blockflow::output_collision),
        help("Rename one of the graph files or generate them into separate directories")
    )]
    OutputCollision {
        target: PathBuf,
        first: String,
        second: String,
    },

    #[error("No input files matched pattern: {pattern}")]
    #[diagnostic(
        code(blockflow::no_input_files),
        help("Check that files matching '{pattern}' exist")
    )]
    NoInputFiles { pattern: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Invalid configuration in '{path}': {reason}")]
    #[diagnostic(code(blockflow::invalid_config))]
    InvalidConfig { path: PathBuf, reason: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Server Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to bind {address}: {error}")]
    #[diagnostic(
        code(blockflow::bind_failed),
        help("Pick another port with --port or BLOCKFLOW_PORT")
    )]
    BindFailed { address: String, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(blockflow::io_error))]
    Io { message: String },

    #[error("YAML error: {message}")]
    #[diagnostic(code(blockflow::yaml_error))]
    Yaml { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(blockflow::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(blockflow::toml_error))]
    Toml { message: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(blockflow::glob_error))]
    GlobPattern { message: String },
}

impl From<std::io::Error> for BlockflowError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for BlockflowError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for BlockflowError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for BlockflowError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl From<glob::PatternError> for BlockflowError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl BlockflowError {
    /// Create a dangling edge error, naming whichever endpoint is missing
    pub fn dangling_edge(index: usize, source: &str, target: &str, missing: &str) -> Self {
        Self::DanglingEdge {
            index,
            source_id: source.to_string(),
            target: target.to_string(),
            missing: missing.to_string(),
        }
    }

    /// Stable machine-readable code, used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::DanglingEdge { .. } => "dangling_edge",
            Self::DuplicateBlockId { .. } => "duplicate_block_id",
            Self::FileReadError { .. } => "file_read_error",
            Self::FileWriteError { .. } => "file_write_error",
            Self::OutputCollision { .. } => "output_collision",
            Self::NoInputFiles { .. } => "no_input_files",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::BindFailed { .. } => "bind_failed",
            Self::Io { .. } => "io_error",
            Self::Yaml { .. } => "yaml_error",
            Self::Json { .. } => "json_error",
            Self::Toml { .. } => "toml_error",
            Self::GlobPattern { .. } => "glob_error",
        }
    }

    /// Whether the error was caused by the submitted graph rather than the host
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::DanglingEdge { .. } | Self::DuplicateBlockId { .. } | Self::Json { .. }
        )
    }

    /// Recovery hint for errors the user can fix in their graph
    pub fn suggestion(&self) -> Option<RecoverySuggestion> {
        match self {
            Self::DanglingEdge {
                source_id, target, missing, ..
            } => Some(RecoverySuggestion::fix_dangling_edge(source_id, target, missing)),
            Self::DuplicateBlockId { id } => Some(RecoverySuggestion::fix_duplicate_id(id)),
            Self::Json { message } => Some(RecoverySuggestion::fix_json_syntax(message)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_edge_message() {
        let err = BlockflowError::dangling_edge(2, "a", "ghost", "ghost");
        assert_eq!(
            err.to_string(),
            "Edge #2 (a -> ghost) references unknown block 'ghost'"
        );
        assert_eq!(err.code(), "dangling_edge");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_io_errors_are_not_client_errors() {
        let err: BlockflowError = std::io::Error::other("disk on fire").into();
        assert!(!err.is_client_error());
        assert!(err.suggestion().is_none());
    }
}
