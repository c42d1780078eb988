// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Leaf Command Executor
//!
//! The orchestrator treats leaf execution as a pluggable capability:
//! `execute(command) -> MissionReport`. The contract is total — an
//! executor never errors and never panics; any execution failure is
//! represented as failure report content, so a bad leaf can be folded
//! into its parent's aggregate without cancelling siblings.

use crate::domain::MissionReport;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Capability consumed by the orchestrator for leaf sub-missions.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute one opaque command string and report its outcome.
    async fn execute(&self, command: &str) -> MissionReport;
}

/// Production executor: runs commands through `sh -c`.
pub struct ShellExecutor {
    timeout: Duration,
}

impl ShellExecutor {
    /// Default per-command timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS))
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, command: &str) -> MissionReport {
        debug!(%command, "executing leaf command");

        let mut cmd = tokio::process::Command::new("sh");
        cmd.arg("-c").arg(command);

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => {
                if output.status.success() {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    MissionReport::success(command, stdout.trim())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    MissionReport::failure(
                        command,
                        format!(
                            "exit code {}: {}",
                            output.status.code().unwrap_or(-1),
                            stderr.trim()
                        ),
                    )
                }
            }
            Ok(Err(e)) => MissionReport::failure(command, format!("failed to spawn: {e}")),
            Err(_) => MissionReport::failure(
                command,
                format!("timed out after {}s", self.timeout.as_secs()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReportStatus;

    #[tokio::test]
    async fn test_successful_command_reports_stdout() {
        let executor = ShellExecutor::default();
        let report = executor.execute("echo hello").await;

        assert_eq!(report.status, ReportStatus::Success);
        assert_eq!(report.subject, "echo hello");
        assert_eq!(report.message, "hello");
    }

    #[tokio::test]
    async fn test_failing_command_becomes_failure_report() {
        let executor = ShellExecutor::default();
        let report = executor.execute("echo oops >&2; exit 3").await;

        assert_eq!(report.status, ReportStatus::Failure);
        assert!(report.message.contains("exit code 3"));
        assert!(report.message.contains("oops"));
    }

    #[tokio::test]
    async fn test_timeout_becomes_failure_report() {
        let executor = ShellExecutor::new(Duration::from_millis(50));
        let report = executor.execute("sleep 5").await;

        assert_eq!(report.status, ReportStatus::Failure);
        assert!(report.message.contains("timed out"));
    }
}
