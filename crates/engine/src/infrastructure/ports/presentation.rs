//! UI-side collaborator ports: completion dialog, audio, status display,
//! analytics and label counts.
//!
//! All of these are fire-and-forget from the coordinator's point of view and
//! therefore synchronous and infallible.

use serde::{Deserialize, Serialize};
use sidewalk_domain::{CompletionRate, Mission, MissionCompleteRecord, Region, RegionId};

// =============================================================================
// Presenter
// =============================================================================

/// How a modal may be dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Backdrop {
    /// Clicking the backdrop closes the modal
    Dismissable,
    /// Clicking the backdrop does nothing
    Static,
}

/// Display options for the survey prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyModalOptions {
    pub backdrop: Backdrop,
    /// Whether Escape closes the modal
    pub keyboard: bool,
}

impl SurveyModalOptions {
    /// Blocks background interaction; only the modal's own controls close it.
    pub fn blocking() -> Self {
        Self {
            backdrop: Backdrop::Static,
            keyboard: false,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PresenterPort: Send + Sync {
    /// Pre-populate the mission complete dialog.
    fn update_mission_complete(&self, mission: &Mission, region: &Region);
    fn show_mission_complete(&self);
    fn is_mission_complete_open(&self) -> bool;
    fn show_survey_prompt(&self, options: SurveyModalOptions);
}

// =============================================================================
// Audio
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioCue {
    Yay,
    Applause,
}

impl AudioCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Yay => "yay",
            AudioCue::Applause => "applause",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait AudioPort: Send + Sync {
    fn play(&self, cue: AudioCue);
}

// =============================================================================
// Status Display
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait StatusPort: Send + Sync {
    fn set_mission_completion_rate(&self, rate: CompletionRate);
    fn set_progress_bar(&self, rate: CompletionRate);
    fn set_region_label_count(&self, region_id: &RegionId, count: u32);
}

// =============================================================================
// Analytics
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsPort: Send + Sync {
    fn push(&self, event_name: &str, record: &MissionCompleteRecord);
}

// =============================================================================
// Label Counts
// =============================================================================

/// Optional aggregator of labels placed in a region.
#[cfg_attr(test, mockall::automock)]
pub trait LabelCountPort: Send + Sync {
    fn count_labels(&self, region_id: &RegionId) -> u32;
}
