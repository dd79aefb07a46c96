//! Mock wiring shared by the mission use case tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sidewalk_domain::{Mission, MissionId, Region, RegionId};

use super::{CompleteMission, CoordinatorConfig, TrackMissionProgress};
use crate::infrastructure::ports::{
    LabelCountPort, MockAnalyticsPort, MockAudioPort, MockClockPort, MockLabelCountPort,
    MockMissionPersistencePort, MockMissionRegistryPort, MockPresenterPort, MockStatusPort,
    MockSurveyPort, SurveyEligibility,
};

pub fn mission(id: &str, goal: f64, distance: f64) -> Mission {
    Mission::new(MissionId::new(id).unwrap(), "distance", goal)
        .unwrap()
        .with_progress(distance)
        .unwrap()
}

pub fn region(id: &str) -> Region {
    Region::new(RegionId::new(id).unwrap())
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Every collaborator as a mock. Tests add expectations, then build.
pub struct MockPorts {
    pub analytics: MockAnalyticsPort,
    pub registry: MockMissionRegistryPort,
    pub survey: MockSurveyPort,
    pub audio: MockAudioPort,
    pub labels: Option<MockLabelCountPort>,
    pub status: MockStatusPort,
    pub persistence: MockMissionPersistencePort,
    pub presenter: MockPresenterPort,
    pub clock: MockClockPort,
}

impl MockPorts {
    pub fn new() -> Self {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_time);

        Self {
            analytics: MockAnalyticsPort::new(),
            registry: MockMissionRegistryPort::new(),
            survey: MockSurveyPort::new(),
            audio: MockAudioPort::new(),
            labels: None,
            status: MockStatusPort::new(),
            persistence: MockMissionPersistencePort::new(),
            presenter: MockPresenterPort::new(),
            clock,
        }
    }

    /// Status readouts are refreshed on every evaluated progress update.
    pub fn allow_status_updates(&mut self) -> &mut Self {
        self.status
            .expect_set_mission_completion_rate()
            .return_const(());
        self.status.expect_set_progress_bar().return_const(());
        self
    }

    /// Expect `times` full completion sequences with the dialog closed and
    /// the survey not due.
    pub fn expect_completions(&mut self, times: usize) -> &mut Self {
        self.expect_analytics(times)
            .expect_local_completion(times)
            .expect_survey(times, false)
            .expect_audio(times)
            .expect_persistence(times)
            .expect_dialog(times)
    }

    pub fn expect_analytics(&mut self, times: usize) -> &mut Self {
        self.analytics.expect_push().times(times).return_const(());
        self
    }

    pub fn expect_local_completion(&mut self, times: usize) -> &mut Self {
        self.registry
            .expect_mark_complete()
            .times(times)
            .return_const(());
        self
    }

    pub fn expect_survey(&mut self, times: usize, display_modal: bool) -> &mut Self {
        self.survey
            .expect_check_eligibility()
            .times(times)
            .returning(move || Ok(SurveyEligibility { display_modal }));
        self
    }

    pub fn expect_audio(&mut self, times: usize) -> &mut Self {
        self.audio.expect_play().times(times * 2).return_const(());
        self
    }

    pub fn expect_persistence(&mut self, times: usize) -> &mut Self {
        self.persistence
            .expect_complete_mission()
            .times(times)
            .returning(|_| Ok(()));
        self
    }

    /// Dialog closed, so it gets populated and shown.
    pub fn expect_dialog(&mut self, times: usize) -> &mut Self {
        self.presenter
            .expect_is_mission_complete_open()
            .times(times)
            .return_const(false);
        self.presenter
            .expect_update_mission_complete()
            .times(times)
            .return_const(());
        self.presenter
            .expect_show_mission_complete()
            .times(times)
            .return_const(());
        self
    }

    pub fn into_complete_mission(
        self,
    ) -> (CompleteMission, Arc<MockMissionRegistryPort>, Arc<MockStatusPort>) {
        let registry = Arc::new(self.registry);
        let status = Arc::new(self.status);
        let complete = CompleteMission::new(
            Arc::new(self.analytics),
            registry.clone(),
            Arc::new(self.survey),
            Arc::new(self.audio),
            self.labels.map(|labels| Arc::new(labels) as Arc<dyn LabelCountPort>),
            status.clone(),
            Arc::new(self.persistence),
            Arc::new(self.presenter),
            Arc::new(self.clock),
        );
        (complete, registry, status)
    }

    pub fn into_coordinator(self, config: CoordinatorConfig) -> Arc<TrackMissionProgress> {
        let (complete, registry, status) = self.into_complete_mission();
        TrackMissionProgress::new(complete, registry, status, config)
    }
}
