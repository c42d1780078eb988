// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Mission Manifest Parser
//!
//! This module parses declarative mission manifests (YAML) into the
//! domain tree and renders a tree back to YAML.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Parse external YAML → Domain objects
//! - **Anti-Corruption:** Translates the manifest schema to the domain
//!   model; the engine never sees document syntax
//!
//! # Manifest Format
//!
//! ```yaml
//! name: build
//! beforeAll:
//!   - command: git fetch
//! subMissions:
//!   - runType: parallel
//!     command: cargo clippy
//!   - runType: serial
//!     command: cargo build
//!   - runType: serial
//!     mission:
//!       name: verify
//!       subMissions:
//!         - command: cargo test
//! afterAll:
//!   - command: notify-send done
//! ```
//!
//! `runType` defaults to `serial` when absent or unrecognized. Structure
//! survives a deserialize → reserialize round trip, including hook-list
//! ordering.

use crate::domain::{Mission, RunType, SubMission};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// YAML Schema (External Representation)
// ============================================================================

/// External YAML representation of a mission.
///
/// Matches the document schema exactly; converted to the domain
/// `Mission` afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionManifest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_missions: Vec<SubMissionManifest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before_all: Vec<SubMissionManifest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before_each: Vec<SubMissionManifest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after_all: Vec<SubMissionManifest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after_each: Vec<SubMissionManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMissionManifest {
    /// Free-form run mode tag; anything other than "parallel" is serial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_type: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<Box<MissionManifest>>,
}

// ============================================================================
// Parser
// ============================================================================

/// Mission manifest parser (Infrastructure service).
pub struct MissionParser;

impl MissionParser {
    /// Parse a mission manifest from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Mission, MissionParseError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| MissionParseError::IoError {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

        Self::parse_yaml(&content)
    }

    /// Parse a mission manifest from a YAML string.
    ///
    /// Parsing is structural only; run-time invariants (non-empty
    /// sub-mission list, runnable targets) are checked by
    /// `Mission::validate` when the tree is actually run.
    pub fn parse_yaml(yaml: &str) -> Result<Mission, MissionParseError> {
        let manifest: MissionManifest =
            serde_yaml::from_str(yaml).map_err(|e| MissionParseError::YamlError(e.to_string()))?;

        Ok(Self::manifest_to_mission(manifest))
    }

    /// Render a mission tree back to YAML.
    pub fn to_yaml(mission: &Mission) -> Result<String, MissionParseError> {
        let manifest = Self::mission_to_manifest(mission);
        serde_yaml::to_string(&manifest).map_err(|e| MissionParseError::YamlError(e.to_string()))
    }

    /// Render a mission tree as pretty-printed JSON.
    pub fn to_json(mission: &Mission) -> Result<String, MissionParseError> {
        let manifest = Self::mission_to_manifest(mission);
        serde_json::to_string_pretty(&manifest)
            .map_err(|e| MissionParseError::JsonError(e.to_string()))
    }

    fn manifest_to_mission(manifest: MissionManifest) -> Mission {
        Mission {
            name: manifest.name,
            sub_missions: Self::convert_group(manifest.sub_missions),
            before_all: Self::convert_group(manifest.before_all),
            before_each: Self::convert_group(manifest.before_each),
            after_all: Self::convert_group(manifest.after_all),
            after_each: Self::convert_group(manifest.after_each),
        }
    }

    fn convert_group(entries: Vec<SubMissionManifest>) -> Vec<SubMission> {
        entries
            .into_iter()
            .map(|entry| SubMission {
                run_type: RunType::from_tag(entry.run_type.as_deref()),
                command: entry.command,
                mission: entry
                    .mission
                    .map(|m| Box::new(Self::manifest_to_mission(*m))),
            })
            .collect()
    }

    fn mission_to_manifest(mission: &Mission) -> MissionManifest {
        MissionManifest {
            name: mission.name.clone(),
            sub_missions: Self::render_group(&mission.sub_missions),
            before_all: Self::render_group(&mission.before_all),
            before_each: Self::render_group(&mission.before_each),
            after_all: Self::render_group(&mission.after_all),
            after_each: Self::render_group(&mission.after_each),
        }
    }

    fn render_group(entries: &[SubMission]) -> Vec<SubMissionManifest> {
        entries
            .iter()
            .map(|sub| SubMissionManifest {
                run_type: Some(sub.run_type.as_str().to_string()),
                command: sub.command.clone(),
                mission: sub
                    .mission
                    .as_deref()
                    .map(|m| Box::new(Self::mission_to_manifest(m))),
            })
            .collect()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MissionParseError {
    #[error("IO error reading {path}: {error}")]
    IoError { path: String, error: String },

    #[error("YAML parse error: {0}")]
    YamlError(String),

    #[error("JSON render error: {0}")]
    JsonError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BUILD_MANIFEST: &str = r#"
name: build
beforeAll:
  - command: git fetch
beforeEach:
  - command: date
subMissions:
  - runType: parallel
    command: lint
  - runType: serial
    command: compile
  - runType: serial
    command: test
afterEach:
  - command: sync
afterAll:
  - command: notify
"#;

    #[test]
    fn test_parse_build_manifest() {
        let mission = MissionParser::parse_yaml(BUILD_MANIFEST).unwrap();

        assert_eq!(mission.name, "build");
        assert_eq!(mission.sub_missions.len(), 3);
        assert_eq!(mission.sub_missions[0].run_type, RunType::Parallel);
        assert_eq!(mission.sub_missions[1].run_type, RunType::Serial);
        assert_eq!(mission.sub_missions[1].command, "compile");
        assert_eq!(mission.before_all.len(), 1);
        assert_eq!(mission.after_all[0].command, "notify");
        assert!(mission.validate().is_ok());
    }

    #[test]
    fn test_run_type_defaults_to_serial() {
        let yaml = r#"
name: quiet
subMissions:
  - command: echo one
  - runType: bogus
    command: echo two
"#;
        let mission = MissionParser::parse_yaml(yaml).unwrap();
        assert_eq!(mission.sub_missions[0].run_type, RunType::Serial);
        assert_eq!(mission.sub_missions[1].run_type, RunType::Serial);
    }

    #[test]
    fn test_parse_nested_mission() {
        let yaml = r#"
name: release
subMissions:
  - runType: serial
    mission:
      name: verify
      subMissions:
        - command: cargo test
"#;
        let mission = MissionParser::parse_yaml(yaml).unwrap();
        let nested = mission.sub_missions[0].mission.as_deref().unwrap();
        assert_eq!(nested.name, "verify");
        assert_eq!(nested.sub_missions[0].command, "cargo test");
    }

    #[test]
    fn test_name_only_document_parses() {
        // The smallest well-formed document; invalid to run, but parsing
        // and validation are separate concerns.
        let mission = MissionParser::parse_yaml("name: test\n").unwrap();
        assert_eq!(mission.name, "test");
        assert!(mission.sub_missions.is_empty());
        assert!(mission.validate().is_err());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let result = MissionParser::parse_yaml("name: [unclosed");
        assert!(matches!(result, Err(MissionParseError::YamlError(_))));
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let mission = MissionParser::parse_yaml(BUILD_MANIFEST).unwrap();
        let yaml = MissionParser::to_yaml(&mission).unwrap();
        let reparsed = MissionParser::parse_yaml(&yaml).unwrap();

        assert_eq!(mission, reparsed);
    }

    #[test]
    fn test_round_trip_preserves_nested_structure() {
        let yaml = r#"
name: release
subMissions:
  - runType: parallel
    command: lint
  - runType: serial
    command: package
    mission:
      name: verify
      beforeEach:
        - command: date
      subMissions:
        - runType: serial
          command: cargo test
"#;
        let mission = MissionParser::parse_yaml(yaml).unwrap();
        let reparsed = MissionParser::parse_yaml(&MissionParser::to_yaml(&mission).unwrap()).unwrap();
        assert_eq!(mission, reparsed);
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUILD_MANIFEST.as_bytes()).unwrap();

        let mission = MissionParser::parse_file(file.path()).unwrap();
        assert_eq!(mission.name, "build");
    }

    #[test]
    fn test_parse_file_missing_path() {
        let result = MissionParser::parse_file("/nonexistent/mission.yaml");
        assert!(matches!(result, Err(MissionParseError::IoError { .. })));
    }

    #[test]
    fn test_to_json_renders_manifest_shape() {
        let mission = MissionParser::parse_yaml(BUILD_MANIFEST).unwrap();
        let json = MissionParser::to_json(&mission).unwrap();
        assert!(json.contains("\"subMissions\""));
        assert!(json.contains("\"runType\": \"parallel\""));
    }
}
