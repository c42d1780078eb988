// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Application layer: the recursive mission executor and its dispatch
//! and lifecycle-hook helpers.

pub mod orchestrator;

pub(crate) mod dispatcher;
pub(crate) mod lifecycle;

pub use orchestrator::{MissionOrchestrator, OrchestrationError};
