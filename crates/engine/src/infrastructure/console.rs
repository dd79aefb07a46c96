//! Headless UI adapters.
//!
//! The engine binary has no screen or speakers. These adapters stand in for
//! the dialog, audio, status bar and analytics queue by emitting structured
//! tracing events, and keep just enough state (dialog open, last rates) to
//! behave like the real widgets.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use sidewalk_domain::{CompletionRate, Mission, MissionCompleteRecord, Region, RegionId};

use crate::infrastructure::ports::{
    AnalyticsPort, AudioCue, AudioPort, PresenterPort, StatusPort, SurveyModalOptions,
};

// =============================================================================
// Analytics
// =============================================================================

/// Writes analytics records to the log as JSON.
#[derive(Debug, Default)]
pub struct TracingAnalytics;

impl AnalyticsPort for TracingAnalytics {
    fn push(&self, event_name: &str, record: &MissionCompleteRecord) {
        match serde_json::to_value(record) {
            Ok(mut payload) => {
                if let Some(obj) = payload.as_object_mut() {
                    obj.insert("eventName".into(), event_name.into());
                }
                tracing::info!(target: "sidewalk_engine::analytics", %payload, "Analytics event");
            }
            Err(e) => {
                tracing::warn!(event_name, error = %e, "Failed to serialize analytics record");
            }
        }
    }
}

// =============================================================================
// Audio
// =============================================================================

#[derive(Debug, Default)]
pub struct ConsoleAudio;

impl AudioPort for ConsoleAudio {
    fn play(&self, cue: AudioCue) {
        tracing::debug!(cue = cue.as_str(), "Playing audio cue");
    }
}

// =============================================================================
// Presenter
// =============================================================================

/// Mission complete dialog and survey prompt.
///
/// The dialog stays "open" until [`ConsolePresenter::dismiss`] is called.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    open: AtomicBool,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the mission complete dialog.
    pub fn dismiss(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            tracing::debug!("Mission complete dialog dismissed");
        }
    }
}

impl PresenterPort for ConsolePresenter {
    fn update_mission_complete(&self, mission: &Mission, region: &Region) {
        tracing::debug!(
            mission_id = %mission.id,
            mission_type = %mission.mission_type,
            region_id = %region.id,
            region_name = region.name.as_deref().unwrap_or(""),
            distance_meters = mission.distance_meters(),
            "Mission complete dialog updated"
        );
    }

    fn show_mission_complete(&self) {
        self.open.store(true, Ordering::SeqCst);
        tracing::info!("Mission complete dialog shown");
    }

    fn is_mission_complete_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn show_survey_prompt(&self, options: SurveyModalOptions) {
        tracing::info!(
            backdrop = ?options.backdrop,
            keyboard = options.keyboard,
            "Survey prompt shown"
        );
    }
}

// =============================================================================
// Status Display
// =============================================================================

/// Status panel that remembers what it last displayed.
#[derive(Debug, Default)]
pub struct ConsoleStatus {
    state: Mutex<StatusSnapshot>,
}

/// What the status panel currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot {
    pub completion_rate: Option<CompletionRate>,
    pub progress_bar: Option<CompletionRate>,
    pub label_counts: HashMap<RegionId, u32>,
}

impl ConsoleStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StatusPort for ConsoleStatus {
    fn set_mission_completion_rate(&self, rate: CompletionRate) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .completion_rate = Some(rate);
        tracing::trace!(percent = rate.percent(), "Mission completion rate updated");
    }

    fn set_progress_bar(&self, rate: CompletionRate) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .progress_bar = Some(rate);
    }

    fn set_region_label_count(&self, region_id: &RegionId, count: u32) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .label_counts
            .insert(region_id.clone(), count);
        tracing::debug!(region_id = %region_id, count, "Region label count updated");
    }
}
