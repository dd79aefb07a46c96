//! Mission use cases.

mod complete_mission;
mod track_progress;

#[cfg(test)]
mod test_support;

pub use complete_mission::{CompleteMission, CompletionReport, CompletionTrigger};
pub use track_progress::{CompletionState, CoordinatorConfig, ProgressOutcome, TrackMissionProgress};

use std::sync::Arc;

/// Container for mission use cases.
pub struct MissionUseCases {
    pub track_progress: Arc<TrackMissionProgress>,
}

impl MissionUseCases {
    pub fn new(track_progress: Arc<TrackMissionProgress>) -> Self {
        Self { track_progress }
    }
}
