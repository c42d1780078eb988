// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Mission Report Value Object
//!
//! A `MissionReport` describes the outcome of exactly one mission or
//! sub-mission execution. Reports are pure values: freely copyable,
//! never mutated after creation, and carried bottom-up through the tree
//! over report conduits.

use serde::{Deserialize, Serialize};

/// Outcome classification for a report.
///
/// Leaf execution failures are represented here rather than as errors;
/// only configuration problems abort a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
    Failure,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Success => write!(f, "success"),
            ReportStatus::Failure => write!(f, "failure"),
        }
    }
}

/// Immutable outcome record of one mission or sub-mission execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionReport {
    /// What produced this report: a mission name or a leaf command.
    pub subject: String,

    /// Outcome classification.
    pub status: ReportStatus,

    /// Human-readable outcome summary.
    pub message: String,
}

impl MissionReport {
    /// Create a success report.
    pub fn success(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            status: ReportStatus::Success,
            message: message.into(),
        }
    }

    /// Create a failure report.
    pub fn failure(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            status: ReportStatus::Failure,
            message: message.into(),
        }
    }

    /// Whether this report describes a failed execution.
    pub fn is_failure(&self) -> bool {
        self.status == ReportStatus::Failure
    }

    /// Roll a set of child reports into one consolidated report.
    ///
    /// The consolidated status is `Failure` if any child failed; the
    /// message lists every child outcome in collection order, exactly
    /// one line per report (nested aggregates are collapsed onto their
    /// line).
    pub fn aggregate(subject: impl Into<String>, reports: &[Self]) -> Self {
        let status = if reports.iter().any(Self::is_failure) {
            ReportStatus::Failure
        } else {
            ReportStatus::Success
        };

        let message = reports
            .iter()
            .map(|r| {
                format!(
                    "[{}] {}: {}",
                    r.status,
                    r.subject,
                    r.message.replace('\n', "; ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            subject: subject.into(),
            status,
            message,
        }
    }
}

impl std::fmt::Display for MissionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.subject, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let ok = MissionReport::success("lint", "clean");
        assert_eq!(ok.status, ReportStatus::Success);
        assert!(!ok.is_failure());

        let bad = MissionReport::failure("compile", "exit code 1");
        assert!(bad.is_failure());
    }

    #[test]
    fn test_aggregate_success() {
        let reports = vec![
            MissionReport::success("a", "done"),
            MissionReport::success("b", "done"),
        ];

        let rolled = MissionReport::aggregate("build", &reports);
        assert_eq!(rolled.status, ReportStatus::Success);
        assert_eq!(rolled.subject, "build");
        assert_eq!(rolled.message.lines().count(), 2);
    }

    #[test]
    fn test_aggregate_folds_failure() {
        let reports = vec![
            MissionReport::success("a", "done"),
            MissionReport::failure("b", "exit code 2"),
            MissionReport::success("c", "done"),
        ];

        let rolled = MissionReport::aggregate("build", &reports);
        assert_eq!(rolled.status, ReportStatus::Failure);
        // Every child outcome survives in the rolled-up message.
        assert!(rolled.message.contains("a: done"));
        assert!(rolled.message.contains("b: exit code 2"));
        assert!(rolled.message.contains("c: done"));
    }

    #[test]
    fn test_aggregate_collapses_nested_messages() {
        let unit = MissionReport::aggregate(
            "build/serial",
            &[
                MissionReport::success("compile", "done"),
                MissionReport::success("test", "done"),
            ],
        );

        let rolled = MissionReport::aggregate("build", &[unit]);
        // One line per collected report, no matter how deep the child is.
        assert_eq!(rolled.message.lines().count(), 1);
        assert!(rolled.message.contains("compile: done"));
        assert!(rolled.message.contains("test: done"));
    }

    #[test]
    fn test_aggregate_preserves_collection_order() {
        let reports = vec![
            MissionReport::success("first", "1"),
            MissionReport::success("second", "2"),
        ];

        let rolled = MissionReport::aggregate("ordered", &reports);
        let lines: Vec<&str> = rolled.message.lines().collect();
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
    }
}
