// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Mission command implementations
//!
//! Thin handlers over `sortie-core`: parse a manifest, hand the tree to
//! the orchestrator, and present the aggregated report.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use sortie_core::application::MissionOrchestrator;
use sortie_core::infrastructure::{MissionParser, ShellExecutor};
use sortie_core::{Mission, ReportStatus};

/// Execute a mission manifest and print the aggregated report.
pub async fn run_mission(file: PathBuf, timeout: u64) -> Result<()> {
    let mission = parse(&file)?;
    info!(mission = %mission.name, timeout, "mission manifest loaded");

    println!("{}", format!("▶ Running mission '{}'", mission.name).cyan());

    let executor = Arc::new(ShellExecutor::new(Duration::from_secs(timeout)));
    let orchestrator = Arc::new(MissionOrchestrator::new(executor));

    let report = orchestrator
        .run(&mission)
        .await
        .context("Mission run failed")?;

    println!();
    for line in report.message.lines() {
        println!("  {line}");
    }
    println!();

    match report.status {
        ReportStatus::Success => {
            println!("{}", format!("✓ Mission '{}' succeeded", report.subject).green().bold());
            Ok(())
        }
        ReportStatus::Failure => {
            eprintln!("{}", format!("✗ Mission '{}' had failures", report.subject).red().bold());
            std::process::exit(1);
        }
    }
}

/// Validate a mission manifest without executing it.
pub fn validate_mission(file: PathBuf) -> Result<()> {
    let mission = parse(&file)?;

    mission
        .validate()
        .context("Mission validation failed")?;

    println!("{}", "✓ Mission is valid!".green().bold());
    println!();
    println!("Mission Details:");
    println!("  Name:         {}", mission.name);
    println!("  Sub-missions: {}", mission.sub_missions.len());
    let hooks = mission.before_all.len()
        + mission.before_each.len()
        + mission.after_all.len()
        + mission.after_each.len();
    println!("  Hook entries: {hooks}");

    Ok(())
}

/// Parse a manifest and print its canonical rendering.
pub fn render_mission(file: PathBuf, output: &str) -> Result<()> {
    let mission = parse(&file)?;

    let rendered = match output {
        "yaml" => MissionParser::to_yaml(&mission).context("Failed to render mission as YAML")?,
        "json" => MissionParser::to_json(&mission).context("Failed to render mission as JSON")?,
        other => bail!("Unsupported output format '{other}' (expected yaml or json)"),
    };

    println!("{rendered}");
    Ok(())
}

fn parse(file: &PathBuf) -> Result<Mission> {
    MissionParser::parse_file(file)
        .with_context(|| format!("Failed to parse mission manifest {}", file.display()))
}
