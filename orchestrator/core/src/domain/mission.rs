// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Mission Domain Model
//!
//! This module defines the mission tree: named nodes that decompose into
//! sub-missions, each running serially or in parallel, wrapped by the
//! four lifecycle hook groups.
//!
//! # Architectural Context
//!
//! - **Aggregate Root:** Mission
//! - **Invariants:** a mission handed to the orchestrator has at least
//!   one sub-mission; every sub-mission has a runnable target
//!
//! # Design Principles
//!
//! 1. **Immutability:** a tree is constructed once (usually from a YAML
//!    manifest) and never mutated during its own execution
//! 2. **Self-Validating:** `Mission::validate` checks the whole tree
//!    before any work is dispatched, so configuration errors are always
//!    fatal-and-early
//! 3. **Owned recursion:** `SubMission` owns its nested `Mission`, so no
//!    cycles can exist by construction

use serde::{Deserialize, Serialize};

/// How a sub-mission runs relative to its siblings.
///
/// Serial items execute strictly in declared order as one sequential
/// unit; parallel items are dispatched as independent tasks with no
/// ordering guarantee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunType {
    Parallel,
    #[default]
    Serial,
}

impl RunType {
    /// Resolve a manifest tag. Absent or unrecognized tags mean serial.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("parallel") => RunType::Parallel,
            _ => RunType::Serial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunType::Parallel => "parallel",
            RunType::Serial => "serial",
        }
    }
}

/// A named node in the execution tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Mission name (non-empty).
    pub name: String,

    /// Ordered children executed by the orchestrator.
    pub sub_missions: Vec<SubMission>,

    /// Hook group run once before any child is dispatched.
    pub before_all: Vec<SubMission>,

    /// Hook group run immediately before each serial item.
    pub before_each: Vec<SubMission>,

    /// Hook group run once after every dispatched unit has completed.
    pub after_all: Vec<SubMission>,

    /// Hook group run immediately after each serial item.
    pub after_each: Vec<SubMission>,
}

impl Mission {
    /// Create a mission with the given name and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validate the whole tree.
    ///
    /// Checks, recursively through every nested mission reachable as a
    /// composite target:
    /// - the mission name is non-empty
    /// - `sub_missions` is non-empty (a composite with nothing to run is
    ///   a configuration error, not an empty success)
    /// - every entry of every group resolves to a runnable target
    pub fn validate(&self) -> Result<(), MissionError> {
        if self.name.is_empty() {
            return Err(MissionError::EmptyName);
        }
        if self.sub_missions.is_empty() {
            return Err(MissionError::NoSubMissions {
                name: self.name.clone(),
            });
        }

        self.validate_group("subMissions", &self.sub_missions)?;
        self.validate_group("beforeAll", &self.before_all)?;
        self.validate_group("beforeEach", &self.before_each)?;
        self.validate_group("afterAll", &self.after_all)?;
        self.validate_group("afterEach", &self.after_each)?;

        Ok(())
    }

    fn validate_group(&self, group: &str, entries: &[SubMission]) -> Result<(), MissionError> {
        for (index, sub) in entries.iter().enumerate() {
            match sub.mission.as_deref() {
                Some(nested) if !nested.sub_missions.is_empty() => nested.validate()?,
                _ if !sub.command.is_empty() => {}
                _ => {
                    return Err(MissionError::NoTarget {
                        mission: self.name.clone(),
                        group: group.to_string(),
                        index,
                    });
                }
            }
        }
        Ok(())
    }
}

/// An edge wrapper: how a parent mission invokes one child.
///
/// A sub-mission either decomposes into a nested mission or is a leaf
/// command handed to the external executor capability. When both are
/// present, a non-empty nested mission takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubMission {
    /// Run mode relative to siblings.
    pub run_type: RunType,

    /// Opaque command string for leaf execution.
    pub command: String,

    /// Nested mission when this sub-mission decomposes further.
    pub mission: Option<Box<Mission>>,
}

impl SubMission {
    /// Create a leaf sub-mission around a command.
    pub fn leaf(run_type: RunType, command: impl Into<String>) -> Self {
        Self {
            run_type,
            command: command.into(),
            mission: None,
        }
    }

    /// Create a composite sub-mission around a nested mission.
    pub fn composite(run_type: RunType, mission: Mission) -> Self {
        Self {
            run_type,
            command: String::new(),
            mission: Some(Box::new(mission)),
        }
    }

    /// Whether this sub-mission resolves to a nested mission.
    pub fn is_composite(&self) -> bool {
        self.mission
            .as_ref()
            .is_some_and(|m| !m.sub_missions.is_empty())
    }

    /// Resolve the execution target, consuming the sub-mission.
    ///
    /// Precedence: a nested mission with at least one sub-mission wins
    /// over the command; an empty nested mission falls back to the
    /// command; neither yields `None` (rejected by validation).
    pub fn into_target(self) -> Option<Target> {
        match self.mission {
            Some(mission) if !mission.sub_missions.is_empty() => Some(Target::Composite(mission)),
            _ if !self.command.is_empty() => Some(Target::Leaf(self.command)),
            _ => None,
        }
    }
}

/// Resolved execution target of a sub-mission.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Recurse into the orchestrator.
    Composite(Box<Mission>),
    /// Hand the command to the executor capability.
    Leaf(String),
}

/// Configuration errors in a mission tree. All fatal.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("mission name cannot be empty")]
    EmptyName,

    #[error("mission '{name}' has no sub-missions to run")]
    NoSubMissions { name: String },

    #[error("{group} entry {index} of mission '{mission}' has neither a command nor a runnable nested mission")]
    NoTarget {
        mission: String,
        group: String,
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_mission(name: &str) -> Mission {
        Mission {
            name: name.to_string(),
            sub_missions: vec![SubMission::leaf(RunType::Serial, "echo hi")],
            ..Mission::default()
        }
    }

    #[test]
    fn test_run_type_from_tag() {
        assert_eq!(RunType::from_tag(Some("parallel")), RunType::Parallel);
        assert_eq!(RunType::from_tag(Some("serial")), RunType::Serial);
        assert_eq!(RunType::from_tag(Some("concurrent")), RunType::Serial);
        assert_eq!(RunType::from_tag(None), RunType::Serial);
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut mission = leaf_mission("ok");
        mission.name.clear();
        assert!(matches!(mission.validate(), Err(MissionError::EmptyName)));
    }

    #[test]
    fn test_validate_rejects_no_sub_missions() {
        let mission = Mission::new("hollow");
        assert!(matches!(
            mission.validate(),
            Err(MissionError::NoSubMissions { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_targetless_entry() {
        let mut mission = leaf_mission("build");
        mission.sub_missions.push(SubMission::default());

        match mission.validate() {
            Err(MissionError::NoTarget { group, index, .. }) => {
                assert_eq!(group, "subMissions");
                assert_eq!(index, 1);
            }
            other => panic!("expected NoTarget, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_checks_hook_groups() {
        let mut mission = leaf_mission("build");
        mission.after_all.push(SubMission::default());
        assert!(matches!(
            mission.validate(),
            Err(MissionError::NoTarget { ref group, .. }) if group.as_str() == "afterAll"
        ));
    }

    #[test]
    fn test_validate_recurses_into_composites() {
        let mut nested = leaf_mission("inner");
        nested.sub_missions.push(SubMission::default());

        let mission = Mission {
            name: "outer".to_string(),
            sub_missions: vec![SubMission::composite(RunType::Serial, nested)],
            ..Mission::default()
        };

        assert!(matches!(
            mission.validate(),
            Err(MissionError::NoTarget { ref mission, .. }) if mission.as_str() == "inner"
        ));
    }

    #[test]
    fn test_target_prefers_nonempty_nested_mission() {
        let mut sub = SubMission::composite(RunType::Serial, leaf_mission("inner"));
        sub.command = "echo fallback".to_string();

        assert!(sub.is_composite());
        match sub.into_target() {
            Some(Target::Composite(mission)) => assert_eq!(mission.name, "inner"),
            other => panic!("expected composite target, got {other:?}"),
        }
    }

    #[test]
    fn test_target_falls_back_to_command_for_empty_mission() {
        let sub = SubMission {
            run_type: RunType::Serial,
            command: "echo fallback".to_string(),
            mission: Some(Box::new(Mission::new("empty"))),
        };

        assert!(!sub.is_composite());
        assert_eq!(
            sub.into_target(),
            Some(Target::Leaf("echo fallback".to_string()))
        );
    }

    #[test]
    fn test_target_none_when_nothing_runnable() {
        assert_eq!(SubMission::default().into_target(), None);
    }
}
