//! Mission entity - a unit of audit work measured in distance walked
//!
//! Missions are owned by the mission registry. The engine receives snapshots
//! of the current mission with every progress event and never caches the
//! derived completion rate.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::MissionId;

/// A mission tracked by distance audited towards a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: MissionId,
    /// Type tag, e.g. "distance" or "auditOnboarding"
    pub mission_type: String,
    distance_meters: f64,
    distance_goal_meters: f64,
    #[serde(default)]
    completed: bool,
}

impl Mission {
    /// Create a mission with no progress yet.
    ///
    /// The goal must be a finite, positive distance.
    pub fn new(
        id: MissionId,
        mission_type: impl Into<String>,
        distance_goal_meters: f64,
    ) -> Result<Self, DomainError> {
        if !distance_goal_meters.is_finite() || distance_goal_meters <= 0.0 {
            return Err(DomainError::validation(format!(
                "Mission goal must be a positive distance, got {distance_goal_meters}"
            )));
        }
        Ok(Self {
            id,
            mission_type: mission_type.into(),
            distance_meters: 0.0,
            distance_goal_meters,
            completed: false,
        })
    }

    /// Builder form of [`Mission::advance_to`] for constructing snapshots.
    pub fn with_progress(mut self, distance_meters: f64) -> Result<Self, DomainError> {
        self.advance_to(distance_meters)?;
        Ok(self)
    }

    /// Record progress. Distance never decreases.
    pub fn advance_to(&mut self, distance_meters: f64) -> Result<(), DomainError> {
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(DomainError::validation(format!(
                "Mission distance must be a non-negative number, got {distance_meters}"
            )));
        }
        if distance_meters < self.distance_meters {
            return Err(DomainError::ProgressRegression {
                mission_id: self.id.to_string(),
                current: self.distance_meters,
                requested: distance_meters,
            });
        }
        self.distance_meters = distance_meters;
        Ok(())
    }

    /// Re-check the constructor invariants on a deserialized snapshot.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.distance_goal_meters.is_finite() || self.distance_goal_meters <= 0.0 {
            return Err(DomainError::validation(format!(
                "Mission {} goal must be a positive distance, got {}",
                self.id, self.distance_goal_meters
            )));
        }
        if !self.distance_meters.is_finite() || self.distance_meters < 0.0 {
            return Err(DomainError::validation(format!(
                "Mission {} distance must be a non-negative number, got {}",
                self.id, self.distance_meters
            )));
        }
        Ok(())
    }

    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    pub fn distance_goal_meters(&self) -> f64 {
        self.distance_goal_meters
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flag the mission as complete. Returns false if it already was.
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }
}
