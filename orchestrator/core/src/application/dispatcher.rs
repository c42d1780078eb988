// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Sub-Mission Dispatcher
//!
//! Routes one sub-mission to its execution path: leaves go to the
//! external executor capability, composites recurse into the
//! orchestrator. Either path ends by sending exactly one report on the
//! supplied conduit — that uniformity is what lets a parent treat its
//! children polymorphically regardless of depth.

use crate::application::orchestrator::{MissionOrchestrator, OrchestrationError};
use crate::domain::{MissionReport, SubMission, Target};
use crate::infrastructure::conduit::ReportSender;

use std::sync::Arc;
use tracing::debug;

pub(crate) async fn dispatch(
    orchestrator: Arc<MissionOrchestrator>,
    sub: SubMission,
    outbound: ReportSender,
) -> Result<(), OrchestrationError> {
    match sub.into_target() {
        Some(Target::Composite(mission)) => {
            debug!(mission = %mission.name, "dispatching composite sub-mission");
            orchestrator.run_mission(*mission, outbound).await
        }
        Some(Target::Leaf(command)) => {
            debug!(%command, "dispatching leaf sub-mission");
            let report = orchestrator.executor.execute(&command).await;
            outbound.send(report).await?;
            Ok(())
        }
        None => {
            // Tree validation rejects targetless entries before anything
            // is dispatched; honor the one-report contract regardless so
            // a parent's join can never hang on this path.
            let report = MissionReport::failure("sub-mission", "no runnable target");
            outbound.send(report).await?;
            Ok(())
        }
    }
}
