//! Completion evaluator.
//!
//! Pure functions over a mission snapshot. The threshold sits just below 1.0
//! so that GPS and measurement slack at the end of a route still completes
//! the mission.

use crate::{CompletionRate, Mission};

/// Rate strictly above which a mission counts as complete.
pub const COMPLETION_THRESHOLD: f64 = 0.999;

/// Result of evaluating a mission snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub rate: CompletionRate,
    pub is_complete: bool,
}

/// Completion rate of the mission, computed fresh from its recorded distance.
pub fn completion_rate(mission: &Mission) -> CompletionRate {
    let distance = mission.distance_meters();
    debug_assert!(
        distance.is_finite() && distance >= 0.0,
        "mission {} has invalid distance {distance}",
        mission.id
    );
    CompletionRate::new(distance / mission.distance_goal_meters())
}

pub fn is_complete(rate: CompletionRate) -> bool {
    rate.value() > COMPLETION_THRESHOLD
}

pub fn evaluate(mission: &Mission) -> Evaluation {
    let rate = completion_rate(mission);
    Evaluation {
        rate,
        is_complete: is_complete(rate),
    }
}
