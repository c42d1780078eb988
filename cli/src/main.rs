// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0

//! # Sortie CLI
//!
//! The `sortie` binary runs declarative mission manifests: YAML trees of
//! serial and parallel sub-missions wrapped by lifecycle hooks.
//!
//! ## Commands
//!
//! - `sortie run <file>` - Execute a mission manifest and print the
//!   aggregated report
//! - `sortie validate <file>` - Parse a manifest and check run-time
//!   invariants without executing anything
//! - `sortie render <file>` - Parse a manifest and re-serialize it
//!   (round-trip surface; `-o yaml|json`)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Sortie - hierarchical mission orchestrator
#[derive(Parser)]
#[command(name = "sortie")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SORTIE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a mission manifest
    Run {
        /// Path to mission manifest YAML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Per-command timeout in seconds
        #[arg(long, short = 't', value_name = "SECS", default_value = "300")]
        timeout: u64,
    },

    /// Validate a mission manifest without executing it
    Validate {
        /// Path to mission manifest YAML file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a manifest and print its canonical rendering
    Render {
        /// Path to mission manifest YAML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (yaml, json)
        #[arg(long, short = 'o', default_value = "yaml")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Run { file, timeout } => commands::run_mission(file, timeout).await,
        Commands::Validate { file } => commands::validate_mission(file),
        Commands::Render { file, output } => commands::render_mission(file, &output),
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
