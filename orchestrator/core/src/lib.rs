// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Sortie Core
//!
//! Domain model and execution engine for hierarchical mission trees.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Mission tree model, report conduits, and the recursive
//!   orchestration engine

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
