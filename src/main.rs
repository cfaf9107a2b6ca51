// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! blockflow - Visual Pipeline to CI YAML
//!
//! Convert pipeline editor graphs into staged CI configuration.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blockflow::cli::{Cli, Commands};
use blockflow::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blockflow=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    blockflow::utils::configure_colors();

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    let cwd = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;

    // Dispatch to command handlers
    match cli.command {
        Commands::Generate {
            inputs,
            output,
            out_dir,
            format,
            reject_duplicates,
        } => {
            blockflow::cli::generate::run(
                inputs,
                output,
                out_dir,
                format,
                reject_duplicates,
                &config,
                cli.verbose,
            )
            .await
        }
        Commands::Validate {
            input,
            reject_duplicates,
        } => blockflow::cli::validate::run(input, reject_duplicates, &config, cli.verbose).await,
        Commands::Graph { input, format } => {
            blockflow::cli::graph::run(input, format, cli.verbose).await
        }
        Commands::Serve {
            host,
            port,
            static_dir,
        } => blockflow::cli::serve::run(host, port, static_dir, &config, cli.verbose).await,
        Commands::Watch {
            input,
            output,
            debounce,
        } => blockflow::cli::watch::run(input, output, debounce, &config, cli.verbose).await,
        Commands::Init { force } => blockflow::cli::init::run(force, cli.verbose).await,
    }
}
