use serde::{Deserialize, Serialize};

use crate::{Mission, MissionId, Region, RegionId};

/// Analytics event name for a completed mission.
pub const MISSION_COMPLETE_EVENT: &str = "MissionComplete";

/// Immutable analytics snapshot taken when a mission completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionCompleteRecord {
    mission_id: MissionId,
    mission_type: String,
    distance_meters: u64,
    region_id: RegionId,
}

impl MissionCompleteRecord {
    /// Snapshot the mission and region. Distance is rounded to whole meters.
    pub fn capture(mission: &Mission, region: &Region) -> Self {
        Self {
            mission_id: mission.id.clone(),
            mission_type: mission.mission_type.clone(),
            distance_meters: mission.distance_meters().max(0.0).round() as u64,
            region_id: region.id.clone(),
        }
    }

    pub fn mission_id(&self) -> &MissionId {
        &self.mission_id
    }

    pub fn mission_type(&self) -> &str {
        &self.mission_type
    }

    pub fn distance_meters(&self) -> u64 {
        self.distance_meters
    }

    pub fn region_id(&self) -> &RegionId {
        &self.region_id
    }
}
