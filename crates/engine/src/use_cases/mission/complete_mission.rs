//! Complete mission use case.
//!
//! Runs the side effects of a mission completion: analytics, local state,
//! survey prompt, audio, label count, remote persistence and the completion
//! dialog. Only `TrackMissionProgress` invokes this, after its idempotence
//! guard has admitted the mission.

use std::sync::Arc;

use sidewalk_domain::{Mission, MissionCompleteRecord, Region, MISSION_COMPLETE_EVENT};
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;

use crate::infrastructure::ports::{
    AnalyticsPort, AudioCue, AudioPort, ClockPort, LabelCountPort, MissionCompletion,
    MissionPersistencePort, MissionRegistryPort, PresenterPort, StatusPort, SurveyModalOptions,
    SurveyPort,
};

/// Which event admitted the mission into completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTrigger {
    /// A progress update crossed the completion threshold
    ProgressThreshold,
    /// The active mission's region was fully covered
    RegionCovered,
}

impl std::fmt::Display for CompletionTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionTrigger::ProgressThreshold => write!(f, "progress_threshold"),
            CompletionTrigger::RegionCovered => write!(f, "region_covered"),
        }
    }
}

/// What the synchronous part of the sequence did.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub record: MissionCompleteRecord,
    /// False when another completion dialog was already on screen
    pub modal_shown: bool,
}

/// Complete mission use case.
///
/// Orchestrates: analytics, registry update, survey check, audio cues,
/// label count refresh, persistence, completion dialog.
pub struct CompleteMission {
    analytics: Arc<dyn AnalyticsPort>,
    registry: Arc<dyn MissionRegistryPort>,
    survey: Arc<dyn SurveyPort>,
    audio: Arc<dyn AudioPort>,
    labels: Option<Arc<dyn LabelCountPort>>,
    status: Arc<dyn StatusPort>,
    persistence: Arc<dyn MissionPersistencePort>,
    presenter: Arc<dyn PresenterPort>,
    clock: Arc<dyn ClockPort>,
    tasks: TaskTracker,
}

impl CompleteMission {
    pub fn new(
        analytics: Arc<dyn AnalyticsPort>,
        registry: Arc<dyn MissionRegistryPort>,
        survey: Arc<dyn SurveyPort>,
        audio: Arc<dyn AudioPort>,
        labels: Option<Arc<dyn LabelCountPort>>,
        status: Arc<dyn StatusPort>,
        persistence: Arc<dyn MissionPersistencePort>,
        presenter: Arc<dyn PresenterPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            analytics,
            registry,
            survey,
            audio,
            labels,
            status,
            persistence,
            presenter,
            clock,
            tasks: TaskTracker::new(),
        }
    }

    /// Tracker for the survey and persistence calls still in flight.
    pub fn tasks(&self) -> &TaskTracker {
        &self.tasks
    }

    /// Execute the completion sequence.
    ///
    /// Never fails and never waits on the network: the survey check and the
    /// persistence call are spawned and only log or touch the presenter when
    /// they finish. Called outside a tokio runtime, those two calls are
    /// skipped with a warning and the local steps still run.
    pub fn execute(
        &self,
        mut mission: Mission,
        region: &Region,
        trigger: CompletionTrigger,
    ) -> CompletionReport {
        // 1. Analytics
        let record = MissionCompleteRecord::capture(&mission, region);
        self.analytics.push(MISSION_COMPLETE_EVENT, &record);

        // 2. Local completion state
        mission.complete();
        self.registry.mark_complete(&mission.id);

        // 3. Survey prompt
        self.spawn_survey_check(&mission);

        // 4. Audio
        self.audio.play(AudioCue::Yay);
        self.audio.play(AudioCue::Applause);

        // 5. Region label count (only when an aggregator is available)
        if let Some(labels) = &self.labels {
            let count = labels.count_labels(&region.id);
            self.status.set_region_label_count(&region.id, count);
        }

        // 6. Remote persistence
        self.spawn_persistence(&mission, region);

        // 7. Completion dialog, unless one is already on screen
        let modal_shown = if self.presenter.is_mission_complete_open() {
            tracing::debug!(
                mission_id = %mission.id,
                region_id = %region.id,
                "Mission complete dialog already open, not re-showing"
            );
            false
        } else {
            self.presenter.update_mission_complete(&mission, region);
            self.presenter.show_mission_complete();
            true
        };

        tracing::info!(
            mission_id = %record.mission_id(),
            mission_type = %record.mission_type(),
            region_id = %record.region_id(),
            distance_meters = record.distance_meters(),
            trigger = %trigger,
            modal_shown,
            "Mission completed"
        );

        CompletionReport {
            record,
            modal_shown,
        }
    }

    fn runtime(&self, mission: &Mission, call: &str) -> Option<Handle> {
        let handle = Handle::try_current().ok();
        if handle.is_none() {
            tracing::warn!(
                mission_id = %mission.id,
                call,
                "No tokio runtime, skipping remote call"
            );
        }
        handle
    }

    fn spawn_survey_check(&self, mission: &Mission) {
        let Some(handle) = self.runtime(mission, "survey_eligibility") else {
            return;
        };
        let survey = Arc::clone(&self.survey);
        let presenter = Arc::clone(&self.presenter);
        let mission_id = mission.id.clone();

        self.tasks.spawn_on(
            async move {
                match survey.check_eligibility().await {
                    Ok(eligibility) if eligibility.display_modal => {
                        tracing::info!(mission_id = %mission_id, "Showing follow-up survey");
                        presenter.show_survey_prompt(SurveyModalOptions::blocking());
                    }
                    Ok(_) => {
                        tracing::debug!(mission_id = %mission_id, "Survey not due");
                    }
                    Err(e) => {
                        tracing::warn!(
                            mission_id = %mission_id,
                            error = %e,
                            "Survey eligibility check failed"
                        );
                    }
                }
            },
            &handle,
        );
    }

    fn spawn_persistence(&self, mission: &Mission, region: &Region) {
        let Some(handle) = self.runtime(mission, "mission_complete") else {
            return;
        };
        let persistence = Arc::clone(&self.persistence);
        let completion = MissionCompletion::new(mission, region, self.clock.now());

        self.tasks.spawn_on(
            async move {
                if let Err(e) = persistence.complete_mission(&completion).await {
                    tracing::warn!(
                        mission_id = %completion.mission_id,
                        region_id = %completion.region_id,
                        error = %e,
                        "Failed to persist mission completion"
                    );
                }
            },
            &handle,
        );
    }
}
