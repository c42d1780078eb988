// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Mission Executor (Orchestrator)
//!
//! The recursive engine that runs one mission node: it validates the
//! node, partitions its children by run mode, runs the lifecycle hook
//! phases at the right points, dispatches children concurrently or
//! sequentially, joins on every dispatched unit's report, and emits one
//! rolled-up report to its own parent.
//!
//! # Execution Protocol
//!
//! ```text
//! run_mission(mission, outbound)
//!   ├ validate: sub_missions must be non-empty (fatal otherwise)
//!   ├ partition: children → parallel group | serial group (order kept)
//!   ├ beforeAll hooks (serial, blocking)
//!   ├ dispatch:
//!   │   ├ every parallel child  → own task + private conduit pair
//!   │   └ serial group as one unit → one task that, per item, runs
//!   │     beforeEach → item (recursively dispatched) → afterEach
//!   ├ join: receive exactly one report per dispatched unit
//!   ├ afterAll hooks (only after the full join)
//!   └ aggregate all reports → one report on `outbound`
//! ```
//!
//! Control flows top-down (dispatch); data flows bottom-up (reports).
//! The expected report count is fixed at partition time, so aggregation
//! never stops early and never races on the first report.

use crate::application::dispatcher::dispatch;
use crate::application::lifecycle::{run_hook_group, HookPhase};
use crate::domain::{Mission, MissionError, MissionReport, RunType, SubMission};
use crate::infrastructure::conduit::{conduit, ConduitError, ReportSender};
use crate::infrastructure::executor::CommandExecutor;

use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Mission Executor (Application Service)
///
/// Holds the leaf execution capability; all per-run state lives on the
/// stack of the invocation and in the conduits it owns.
pub struct MissionOrchestrator {
    pub(crate) executor: Arc<dyn CommandExecutor>,
}

impl MissionOrchestrator {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Run a root mission to completion and return its rolled-up report.
    ///
    /// Synchronous from the caller's point of view: every task spawned
    /// underneath has been joined by the time this returns. The whole
    /// tree is validated before any work is dispatched, so configuration
    /// errors abort the run instead of surfacing mid-flight.
    pub async fn run(self: Arc<Self>, mission: &Mission) -> Result<MissionReport, OrchestrationError> {
        mission.validate()?;

        info!(mission = %mission.name, "starting mission run");

        let (tx, mut rx) = conduit();
        Arc::clone(&self).run_mission(mission.clone(), tx).await?;
        let report = rx.recv().await?;

        info!(mission = %mission.name, status = %report.status, "mission run complete");
        Ok(report)
    }

    /// Run one mission node, sending exactly one report on `outbound`.
    ///
    /// Boxed because the future recurses through composite sub-missions.
    pub(crate) fn run_mission(
        self: Arc<Self>,
        mission: Mission,
        outbound: ReportSender,
    ) -> BoxFuture<'static, Result<(), OrchestrationError>> {
        async move {
            if mission.sub_missions.is_empty() {
                return Err(MissionError::NoSubMissions { name: mission.name }.into());
            }

            let Mission {
                name,
                sub_missions,
                before_all,
                before_each,
                after_all,
                after_each,
            } = mission;

            // Relative order within each group survives the partition.
            let (parallel, serial): (Vec<SubMission>, Vec<SubMission>) = sub_missions
                .into_iter()
                .partition(|sub| sub.run_type == RunType::Parallel);

            debug!(
                mission = %name,
                parallel = parallel.len(),
                serial = serial.len(),
                "partitioned sub-missions"
            );

            run_hook_group(&self, &name, HookPhase::BeforeAll, &before_all).await?;

            // One private conduit pair per dispatched unit. The expected
            // report count is fixed here, before anything runs.
            let mut inbound = Vec::with_capacity(parallel.len() + 1);

            for sub in parallel {
                let (tx, rx) = conduit();
                inbound.push(rx);

                let orchestrator = Arc::clone(&self);
                tokio::spawn(async move {
                    if let Err(error) = dispatch(orchestrator, sub, tx).await {
                        error!(%error, "parallel sub-mission dispatch failed");
                    }
                });
            }

            if !serial.is_empty() {
                let (tx, rx) = conduit();
                inbound.push(rx);

                let orchestrator = Arc::clone(&self);
                let unit = SerialUnit {
                    mission: name.clone(),
                    items: serial,
                    before_each,
                    after_each,
                };
                tokio::spawn(async move {
                    if let Err(error) = run_serial_unit(orchestrator, unit, tx).await {
                        error!(%error, "serial unit failed");
                    }
                });
            }

            // Full join: one report per dispatched unit, never fewer. A
            // child that died without reporting closes its conduit and
            // fails the run here.
            let mut reports = Vec::with_capacity(inbound.len());
            for mut rx in inbound {
                reports.push(rx.recv().await?);
            }

            run_hook_group(&self, &name, HookPhase::AfterAll, &after_all).await?;

            let report = MissionReport::aggregate(name.as_str(), &reports);
            outbound.send(report).await?;
            Ok(())
        }
        .boxed()
    }
}

/// The serial group of one mission, dispatched as a single unit.
struct SerialUnit {
    mission: String,
    items: Vec<SubMission>,
    before_each: Vec<SubMission>,
    after_each: Vec<SubMission>,
}

/// Run the serial group: items strictly in declared order, with
/// `beforeEach`/`afterEach` interleaved per item, rolled into one
/// serial-unit report on `outbound`.
async fn run_serial_unit(
    orchestrator: Arc<MissionOrchestrator>,
    unit: SerialUnit,
    outbound: ReportSender,
) -> Result<(), OrchestrationError> {
    let mut reports = Vec::with_capacity(unit.items.len());

    for sub in unit.items {
        run_hook_group(&orchestrator, &unit.mission, HookPhase::BeforeEach, &unit.before_each)
            .await?;

        let (tx, mut rx) = conduit();
        dispatch(Arc::clone(&orchestrator), sub, tx).await?;
        reports.push(rx.recv().await?);

        run_hook_group(&orchestrator, &unit.mission, HookPhase::AfterEach, &unit.after_each)
            .await?;
    }

    let report = MissionReport::aggregate(format!("{}/serial", unit.mission), &reports);
    outbound.send(report).await?;
    Ok(())
}

/// Fatal errors of a mission run.
///
/// Leaf execution failures are not errors; they arrive as failure
/// reports inside the aggregate.
#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    /// Invalid mission tree; aborts the whole run.
    #[error(transparent)]
    Configuration(#[from] MissionError),

    /// A dispatched child dropped its conduit without reporting.
    #[error(transparent)]
    Conduit(#[from] ConduitError),
}
