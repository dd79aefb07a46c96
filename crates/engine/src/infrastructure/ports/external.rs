//! Remote service port traits (survey eligibility, mission persistence).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sidewalk_domain::{Mission, MissionId, Region, RegionId};

use super::error::RemoteError;

// =============================================================================
// Survey
// =============================================================================

/// Answer of the survey eligibility endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyEligibility {
    pub display_modal: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SurveyPort: Send + Sync {
    /// Ask whether the user should see the follow-up survey now.
    async fn check_eligibility(&self) -> Result<SurveyEligibility, RemoteError>;
}

// =============================================================================
// Mission Persistence
// =============================================================================

/// Payload sent to the server when a mission completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionCompletion {
    pub mission_id: MissionId,
    pub mission_type: String,
    pub region_id: RegionId,
    pub distance_meters: f64,
    pub completed_at: DateTime<Utc>,
}

impl MissionCompletion {
    pub fn new(mission: &Mission, region: &Region, completed_at: DateTime<Utc>) -> Self {
        Self {
            mission_id: mission.id.clone(),
            mission_type: mission.mission_type.clone(),
            region_id: region.id.clone(),
            distance_meters: mission.distance_meters(),
            completed_at,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MissionPersistencePort: Send + Sync {
    async fn complete_mission(&self, completion: &MissionCompletion) -> Result<(), RemoteError>;
}
