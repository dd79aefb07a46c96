//! Inbound mission events
//!
//! Typed payloads published on the event bus by the mission and
//! neighborhood models. The engine reacts to these; it never emits them.

use serde::{Deserialize, Serialize};

use crate::{Mission, Region};

/// The current mission recorded new progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdated {
    pub mission: Mission,
    pub region: Region,
}

/// Every street in the region has been audited.
///
/// Carries only the region; listeners resolve the active mission themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCompleted {
    pub region: Region,
}

/// Discriminant used for logging and handler bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionEventKind {
    ProgressUpdated,
    RegionCompleted,
}

impl std::fmt::Display for MissionEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionEventKind::ProgressUpdated => write!(f, "MissionProgress:update"),
            MissionEventKind::RegionCompleted => write!(f, "Neighborhood:completed"),
        }
    }
}
