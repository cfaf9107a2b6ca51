// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Configuration loading
//!
//! Settings come from `.blockflow.yaml` / `.blockflow.toml` in the working
//! directory, falling back to the user config directory, then defaults.
//! Command-line flags and `BLOCKFLOW_*` variables are applied on top by the CLI.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::BlockflowError;
use crate::pipeline::{ConvertOptions, DuplicateIdPolicy};

/// Project-local config file names, in lookup order
pub const CONFIG_FILES: &[&str] = &[".blockflow.yaml", ".blockflow.yml", ".blockflow.toml"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversion settings
    #[serde(default)]
    pub convert: ConvertConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind (0 picks a free port)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with the editor frontend, served at `/`
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Address string for binding
    pub fn address(&self) -> String {
        match self.host.parse::<std::net::IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Conversion settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// What to do when two blocks share an id
    #[serde(default)]
    pub duplicate_ids: DuplicateIdPolicy,
}

impl From<ConvertConfig> for ConvertOptions {
    fn from(config: ConvertConfig) -> Self {
        Self {
            duplicate_ids: config.duplicate_ids,
        }
    }
}

impl Config {
    /// Load from a specific file, choosing the parser by extension
    pub fn from_file(path: &Path) -> Result<Self, BlockflowError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| BlockflowError::FileReadError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        let parsed = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            _ => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|reason| BlockflowError::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Find the config file that applies to `dir`, if any
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .chain(user_config_files())
            .find(|p| p.is_file())
    }

    /// Load configuration for `dir`
    ///
    /// An explicit path must exist; otherwise discovery falls back to defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, BlockflowError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::discover(dir) {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, BlockflowError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}

fn user_config_files() -> Vec<PathBuf> {
    ProjectDirs::from("", "", "blockflow")
        .map(|dirs| {
            let base = dirs.config_dir();
            vec![base.join("config.yaml"), base.join("config.toml")]
        })
        .unwrap_or_default()
}
