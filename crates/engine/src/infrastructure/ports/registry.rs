//! Mission registry port.
//!
//! The registry owns mission state. The coordinator reads the current
//! mission and region through it and reports completion back so the rest of
//! the client sees the mission as done.

use sidewalk_domain::{Mission, MissionId, Region};

#[cfg_attr(test, mockall::automock)]
pub trait MissionRegistryPort: Send + Sync {
    fn current_mission(&self) -> Option<Mission>;
    fn current_region(&self) -> Option<Region>;
    fn mark_complete(&self, mission_id: &MissionId);
}
