// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Serve command - run the HTTP service

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::config::{Config, ServerConfig};
use crate::pipeline::ConvertOptions;
use crate::server::Server;

/// Run the serve command
pub async fn run(
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    config: &Config,
    verbose: bool,
) -> Result<()> {
    let server_config = apply_overrides(&config.server, host, port, static_dir);
    let options = ConvertOptions::from(config.convert);

    let server = Server::bind(&server_config, options).await?;
    let addr = server.local_addr()?;

    eprintln!(
        "{} http://{}/generate-yaml",
        "Listening on".green().bold(),
        addr
    );
    if let Some(dir) = &server_config.static_dir {
        eprintln!("Serving frontend from {}", dir.display().to_string().cyan());
    }
    if verbose {
        eprintln!("Duplicate block ids: {}", options.duplicate_ids);
    }
    eprintln!("Press {} to stop.", "Ctrl+C".cyan());

    server.run().await?;
    Ok(())
}

/// Command-line values win over the config file
fn apply_overrides(
    base: &ServerConfig,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> ServerConfig {
    ServerConfig {
        host: host.unwrap_or_else(|| base.host.clone()),
        port: port.unwrap_or(base.port),
        static_dir: static_dir.or_else(|| base.static_dir.clone()),
    }
}
