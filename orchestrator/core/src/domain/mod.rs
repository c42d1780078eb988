// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Domain layer: mission tree and report value objects.

pub mod mission;
pub mod report;

pub use mission::{Mission, MissionError, RunType, SubMission, Target};
pub use report::{MissionReport, ReportStatus};
