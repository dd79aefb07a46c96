//! In-memory mission registry.
//!
//! Holds the single mission/region pair the client is currently auditing.
//! The event feed replaces it on every progress update; the completion
//! sequence flips its completed flag.

use std::sync::{PoisonError, RwLock};

use sidewalk_domain::{Mission, MissionId, Region};

use crate::infrastructure::ports::MissionRegistryPort;

#[derive(Debug, Default)]
struct Current {
    mission: Option<Mission>,
    region: Option<Region>,
}

#[derive(Debug, Default)]
pub struct InMemoryMissionRegistry {
    current: RwLock<Current>,
}

impl InMemoryMissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current mission and region.
    ///
    /// A later snapshot of the same mission only moves its distance forward:
    /// a smaller distance is logged and the stored one kept. A mission already
    /// marked complete stays complete.
    pub fn set_current(&self, mission: Mission, region: Region) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let same_mission = current
            .mission
            .as_ref()
            .is_some_and(|stored| stored.id == mission.id);
        if !same_mission {
            current.mission = Some(mission);
        } else if let Some(stored) = current.mission.as_mut() {
            if let Err(e) = stored.advance_to(mission.distance_meters()) {
                tracing::warn!(
                    mission_id = %mission.id,
                    error = %e,
                    "Ignoring mission progress snapshot"
                );
            }
            if mission.is_completed() {
                stored.complete();
            }
        }
        current.region = Some(region);
    }

    /// Replace only the region, e.g. when its coverage flag changes.
    pub fn set_region(&self, region: Region) {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .region = Some(region);
    }
}

impl MissionRegistryPort for InMemoryMissionRegistry {
    fn current_mission(&self) -> Option<Mission> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .mission
            .clone()
    }

    fn current_region(&self) -> Option<Region> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .region
            .clone()
    }

    fn mark_complete(&self, mission_id: &MissionId) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        match current.mission.as_mut() {
            Some(mission) if &mission.id == mission_id => {
                mission.complete();
            }
            _ => {
                tracing::debug!(
                    mission_id = %mission_id,
                    "Completed mission is no longer current, nothing to mark"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidewalk_domain::RegionId;

    fn mission(id: &str, distance: f64) -> Mission {
        Mission::new(MissionId::new(id).unwrap(), "distance", 100.0)
            .unwrap()
            .with_progress(distance)
            .unwrap()
    }

    fn region(id: &str) -> Region {
        Region::new(RegionId::new(id).unwrap())
    }

    #[test]
    fn empty_registry_has_no_current_mission() {
        let registry = InMemoryMissionRegistry::new();
        assert!(registry.current_mission().is_none());
        assert!(registry.current_region().is_none());
    }

    #[test]
    fn mark_complete_only_touches_matching_mission() {
        let registry = InMemoryMissionRegistry::new();
        registry.set_current(mission("m1", 10.0), region("r1"));

        registry.mark_complete(&MissionId::new("other").unwrap());
        assert!(!registry.current_mission().unwrap().is_completed());

        registry.mark_complete(&MissionId::new("m1").unwrap());
        assert!(registry.current_mission().unwrap().is_completed());
    }

    #[test]
    fn completion_survives_later_snapshots_of_same_mission() {
        let registry = InMemoryMissionRegistry::new();
        registry.set_current(mission("m1", 100.0), region("r1"));
        registry.mark_complete(&MissionId::new("m1").unwrap());

        registry.set_current(mission("m1", 100.0), region("r1"));
        assert!(registry.current_mission().unwrap().is_completed());

        registry.set_current(mission("m2", 0.0), region("r1"));
        assert!(!registry.current_mission().unwrap().is_completed());
    }

    #[test]
    fn progress_of_same_mission_never_goes_backwards() {
        let registry = InMemoryMissionRegistry::new();
        registry.set_current(mission("m1", 80.0), region("r1"));
        registry.set_current(mission("m1", 20.0), region("r1"));
        assert_eq!(registry.current_mission().unwrap().distance_meters(), 80.0);

        registry.set_current(mission("m1", 90.0), region("r1"));
        assert_eq!(registry.current_mission().unwrap().distance_meters(), 90.0);

        // A different mission starts from its own snapshot.
        registry.set_current(mission("m2", 5.0), region("r1"));
        assert_eq!(registry.current_mission().unwrap().distance_meters(), 5.0);
    }

    #[test]
    fn set_region_keeps_mission() {
        let registry = InMemoryMissionRegistry::new();
        registry.set_current(mission("m1", 10.0), region("r1"));
        registry.set_region(region("r1").as_fully_covered());

        assert!(registry.current_region().unwrap().fully_covered);
        assert_eq!(registry.current_mission().unwrap().id.as_str(), "m1");
    }
}
