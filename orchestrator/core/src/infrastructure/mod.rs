// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure layer: report conduits, the leaf command executor,
//! and the mission manifest parser.

pub mod conduit;
pub mod executor;
pub mod parser;

pub use conduit::{conduit, ConduitError, ReportReceiver, ReportSender};
pub use executor::{CommandExecutor, ShellExecutor};
pub use parser::{MissionParseError, MissionParser};
