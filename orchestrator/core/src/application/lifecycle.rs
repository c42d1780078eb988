// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Lifecycle Hook Runner
//!
//! Runs one hook group (`beforeAll`, `beforeEach`, `afterEach`,
//! `afterAll`) as a serial, blocking batch. Hook entries are ordinary
//! sub-missions dispatched through the regular dispatcher with their own
//! conduits; their reports are logged but stay out of the parent's
//! aggregate, whose expected count is fixed by the partition of the main
//! sub-mission list alone.

use crate::application::dispatcher::dispatch;
use crate::application::orchestrator::{MissionOrchestrator, OrchestrationError};
use crate::domain::SubMission;
use crate::infrastructure::conduit::conduit;

use std::sync::Arc;
use tracing::{debug, warn};

/// The four points a hook group can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookPhase {
    BeforeAll,
    BeforeEach,
    AfterEach,
    AfterAll,
}

impl HookPhase {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            HookPhase::BeforeAll => "beforeAll",
            HookPhase::BeforeEach => "beforeEach",
            HookPhase::AfterEach => "afterEach",
            HookPhase::AfterAll => "afterAll",
        }
    }
}

impl std::fmt::Display for HookPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run every entry of one hook group in declared order, each awaited to
/// completion before the next starts.
pub(crate) async fn run_hook_group(
    orchestrator: &Arc<MissionOrchestrator>,
    mission: &str,
    phase: HookPhase,
    hooks: &[SubMission],
) -> Result<(), OrchestrationError> {
    for hook in hooks {
        let (tx, mut rx) = conduit();
        dispatch(Arc::clone(orchestrator), hook.clone(), tx).await?;
        let report = rx.recv().await?;

        if report.is_failure() {
            warn!(mission, phase = %phase, subject = %report.subject, "hook reported failure");
        } else {
            debug!(mission, phase = %phase, subject = %report.subject, "hook completed");
        }
    }
    Ok(())
}
