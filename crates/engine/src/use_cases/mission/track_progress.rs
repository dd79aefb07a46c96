//! Track mission progress use case.
//!
//! Listens to progress and region-completion events, evaluates the current
//! mission and admits each mission into the completion sequence at most once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use sidewalk_domain::{
    completion, CompletionRate, Mission, MissionId, ProgressUpdated, Region, RegionCompleted,
};
use tokio_util::task::TaskTracker;

use super::complete_mission::{CompleteMission, CompletionTrigger};
use crate::infrastructure::ports::{EventBusPort, MissionRegistryPort, StatusPort};

/// Per-mission completion state. Missions never seen are `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    Active,
    /// The synchronous completion sequence is running
    Completing,
    Completed,
}

/// Result of handling one inbound event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressOutcome {
    /// Onboarding mode is active; nothing was evaluated
    Suspended,
    /// Below the completion threshold
    InProgress(CompletionRate),
    /// This event ran the completion sequence
    Completed { modal_shown: bool },
    /// Completion had already been initiated for this mission
    AlreadyCompleted,
    /// Event did not concern the active mission
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct CoordinatorConfig {
    /// Start suspended, e.g. while the tutorial runs
    pub onboarding: bool,
}

/// Mission progress coordinator.
///
/// The completion guard is owned here and only mutated by this type.
/// Remote calls of the completion sequence are spawned on the current tokio
/// runtime; without one they are skipped and the local steps still run.
pub struct TrackMissionProgress {
    complete_mission: CompleteMission,
    registry: Arc<dyn MissionRegistryPort>,
    status: Arc<dyn StatusPort>,
    onboarding: AtomicBool,
    // One entry per mission that began completing. Never pruned: removing
    // an entry would re-admit that mission.
    states: Mutex<HashMap<MissionId, CompletionState>>,
}

impl TrackMissionProgress {
    pub fn new(
        complete_mission: CompleteMission,
        registry: Arc<dyn MissionRegistryPort>,
        status: Arc<dyn StatusPort>,
        config: CoordinatorConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            complete_mission,
            registry,
            status,
            onboarding: AtomicBool::new(config.onboarding),
            states: Mutex::new(HashMap::new()),
        })
    }

    /// Register both event handlers on the bus.
    ///
    /// Handlers hold a weak reference and become no-ops once the coordinator
    /// is dropped.
    pub fn subscribe(self: &Arc<Self>, bus: &dyn EventBusPort) {
        let weak: Weak<Self> = Arc::downgrade(self);
        bus.on_progress_updated(Arc::new(move |event| {
            if let Some(coordinator) = weak.upgrade() {
                coordinator.on_progress_updated(event);
            }
        }));

        let weak: Weak<Self> = Arc::downgrade(self);
        bus.on_region_completed(Arc::new(move |event| {
            if let Some(coordinator) = weak.upgrade() {
                coordinator.on_region_completed(event);
            }
        }));
    }

    pub fn set_onboarding(&self, active: bool) {
        let was = self.onboarding.swap(active, Ordering::SeqCst);
        if was != active {
            tracing::info!(onboarding = active, "Onboarding mode changed");
        }
    }

    pub fn is_onboarding(&self) -> bool {
        self.onboarding.load(Ordering::SeqCst)
    }

    pub fn state_of(&self, mission_id: &MissionId) -> CompletionState {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(mission_id)
            .copied()
            .unwrap_or(CompletionState::Active)
    }

    /// Survey and persistence calls still in flight.
    pub fn background_tasks(&self) -> &TaskTracker {
        self.complete_mission.tasks()
    }

    /// Handle a progress update for the current mission.
    pub fn on_progress_updated(&self, event: &ProgressUpdated) -> ProgressOutcome {
        if self.is_onboarding() {
            tracing::trace!(mission_id = %event.mission.id, "Onboarding, progress ignored");
            return ProgressOutcome::Suspended;
        }

        let evaluation = completion::evaluate(&event.mission);
        self.status.set_mission_completion_rate(evaluation.rate);
        self.status.set_progress_bar(evaluation.rate);

        if !evaluation.is_complete {
            return ProgressOutcome::InProgress(evaluation.rate);
        }

        self.begin_completion(
            event.mission.clone(),
            &event.region,
            CompletionTrigger::ProgressThreshold,
        )
    }

    /// Handle a fully covered region.
    ///
    /// The mission and region are resolved from the registry, not the event.
    pub fn on_region_completed(&self, event: &RegionCompleted) -> ProgressOutcome {
        if self.is_onboarding() {
            tracing::trace!(region_id = %event.region.id, "Onboarding, region completion ignored");
            return ProgressOutcome::Suspended;
        }

        let (Some(mission), Some(region)) =
            (self.registry.current_mission(), self.registry.current_region())
        else {
            tracing::warn!(
                region_id = %event.region.id,
                "Region completed with no current mission or region"
            );
            return ProgressOutcome::Ignored;
        };

        if region.id != event.region.id {
            tracing::debug!(
                region_id = %event.region.id,
                current_region_id = %region.id,
                "Completed region is not the current region"
            );
            return ProgressOutcome::Ignored;
        }

        self.begin_completion(mission, &region, CompletionTrigger::RegionCovered)
    }

    fn begin_completion(
        &self,
        mission: Mission,
        region: &Region,
        trigger: CompletionTrigger,
    ) -> ProgressOutcome {
        let mission_id = mission.id.clone();

        {
            let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(state) = states.get(&mission_id) {
                tracing::debug!(
                    mission_id = %mission_id,
                    state = ?state,
                    trigger = %trigger,
                    "Completion already initiated"
                );
                return ProgressOutcome::AlreadyCompleted;
            }
            if mission.is_completed() {
                states.insert(mission_id, CompletionState::Completed);
                return ProgressOutcome::AlreadyCompleted;
            }
            states.insert(mission_id.clone(), CompletionState::Completing);
        }

        // Lock released: collaborators may publish further events re-entrantly.
        let report = self.complete_mission.execute(mission, region, trigger);

        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(mission_id, CompletionState::Completed);

        ProgressOutcome::Completed {
            modal_shown: report.modal_shown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::event_bus::InProcessEventBus;
    use crate::infrastructure::ports::{MockLabelCountPort, SurveyModalOptions};
    use crate::use_cases::mission::test_support::{mission, region, MockPorts};
    use sidewalk_domain::MissionCompleteRecord;

    fn progress(mission: Mission, region: Region) -> ProgressUpdated {
        ProgressUpdated { mission, region }
    }

    async fn drain(coordinator: &TrackMissionProgress) {
        coordinator.background_tasks().close();
        coordinator.background_tasks().wait().await;
    }

    #[tokio::test]
    async fn below_threshold_updates_status_only() {
        let mut ports = MockPorts::new();
        ports
            .status
            .expect_set_mission_completion_rate()
            .withf(|rate| rate.value() == 0.5)
            .times(1)
            .return_const(());
        ports
            .status
            .expect_set_progress_bar()
            .times(1)
            .return_const(());
        ports.expect_completions(0);
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let outcome = coordinator.on_progress_updated(&progress(mission("m1", 1000.0, 500.0), region("r1")));

        assert_eq!(outcome, ProgressOutcome::InProgress(CompletionRate::new(0.5)));
        assert_eq!(coordinator.state_of(&MissionId::new("m1").unwrap()), CompletionState::Active);
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn exactly_on_threshold_does_not_complete() {
        let mut ports = MockPorts::new();
        ports.allow_status_updates().expect_completions(0);
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let outcome = coordinator.on_progress_updated(&progress(mission("m1", 1000.0, 999.0), region("r1")));

        assert!(matches!(outcome, ProgressOutcome::InProgress(_)));
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn crossing_threshold_emits_record_once() {
        let mut ports = MockPorts::new();
        ports
            .allow_status_updates()
            .expect_local_completion(1)
            .expect_survey(1, false)
            .expect_audio(1)
            .expect_persistence(1)
            .expect_dialog(1);
        ports
            .analytics
            .expect_push()
            .withf(|name, record| {
                name == "MissionComplete"
                    && record.mission_id().as_str() == "m1"
                    && record.mission_type() == "distance"
                    && record.distance_meters() == 1532
                    && record.region_id().as_str() == "r7"
            })
            .times(1)
            .return_const(());
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let event = progress(mission("m1", 1532.4, 1532.4), region("r7"));
        let first = coordinator.on_progress_updated(&event);
        let second = coordinator.on_progress_updated(&event);

        assert_eq!(first, ProgressOutcome::Completed { modal_shown: true });
        assert_eq!(second, ProgressOutcome::AlreadyCompleted);
        assert_eq!(coordinator.state_of(&event.mission.id), CompletionState::Completed);
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn both_triggers_run_the_sequence_once() {
        let mut ports = MockPorts::new();
        ports.allow_status_updates().expect_completions(1);
        ports
            .registry
            .expect_current_mission()
            .returning(|| Some(mission("m1", 1000.0, 1000.0)));
        ports
            .registry
            .expect_current_region()
            .returning(|| Some(region("r7")));
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let event = progress(mission("m1", 1000.0, 1000.0), region("r7"));
        coordinator.on_progress_updated(&event);
        let covered = RegionCompleted { region: region("r7") };
        for _ in 0..3 {
            assert_eq!(coordinator.on_region_completed(&covered), ProgressOutcome::AlreadyCompleted);
            assert_eq!(coordinator.on_progress_updated(&event), ProgressOutcome::AlreadyCompleted);
        }
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn region_covered_before_threshold_completes_current_mission() {
        let mut ports = MockPorts::new();
        ports
            .allow_status_updates()
            .expect_local_completion(1)
            .expect_survey(1, false)
            .expect_audio(1)
            .expect_persistence(1);
        ports
            .registry
            .expect_current_mission()
            .returning(|| Some(mission("m2", 2000.0, 1200.0)));
        ports
            .registry
            .expect_current_region()
            .returning(|| Some(region("r3")));
        ports
            .analytics
            .expect_push()
            .withf(|_, record| record.mission_id().as_str() == "m2" && record.distance_meters() == 1200)
            .times(1)
            .return_const(());
        ports
            .presenter
            .expect_is_mission_complete_open()
            .return_const(false);
        ports
            .presenter
            .expect_update_mission_complete()
            .withf(|mission, region| {
                mission.id.as_str() == "m2" && mission.is_completed() && region.id.as_str() == "r3"
            })
            .times(1)
            .return_const(());
        ports
            .presenter
            .expect_show_mission_complete()
            .times(1)
            .return_const(());
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let outcome = coordinator.on_region_completed(&RegionCompleted { region: region("r3") });
        assert_eq!(outcome, ProgressOutcome::Completed { modal_shown: true });

        // A later progress update past the goal is a no-op.
        let late = coordinator.on_progress_updated(&progress(mission("m2", 2000.0, 2000.0), region("r3")));
        assert_eq!(late, ProgressOutcome::AlreadyCompleted);
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn region_completed_for_other_region_is_ignored() {
        let mut ports = MockPorts::new();
        ports.expect_completions(0);
        ports
            .registry
            .expect_current_mission()
            .returning(|| Some(mission("m1", 1000.0, 10.0)));
        ports
            .registry
            .expect_current_region()
            .returning(|| Some(region("r1")));
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let outcome = coordinator.on_region_completed(&RegionCompleted { region: region("r9") });

        assert_eq!(outcome, ProgressOutcome::Ignored);
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn region_completed_without_current_mission_is_ignored() {
        let mut ports = MockPorts::new();
        ports.expect_completions(0);
        ports.registry.expect_current_mission().returning(|| None);
        ports
            .registry
            .expect_current_region()
            .returning(|| Some(region("r1")));
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let outcome = coordinator.on_region_completed(&RegionCompleted { region: region("r1") });

        assert_eq!(outcome, ProgressOutcome::Ignored);
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn onboarding_suspends_everything() {
        let mut ports = MockPorts::new();
        // No status, registry or completion calls at all.
        ports.expect_completions(0);
        let coordinator = ports.into_coordinator(CoordinatorConfig { onboarding: true });

        let event = progress(mission("m1", 1000.0, 1000.0), region("r1"));
        for _ in 0..5 {
            assert_eq!(coordinator.on_progress_updated(&event), ProgressOutcome::Suspended);
        }
        assert_eq!(
            coordinator.on_region_completed(&RegionCompleted { region: region("r1") }),
            ProgressOutcome::Suspended
        );
        assert_eq!(coordinator.state_of(&event.mission.id), CompletionState::Active);
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn leaving_onboarding_resumes_evaluation() {
        let mut ports = MockPorts::new();
        ports.allow_status_updates().expect_completions(1);
        let coordinator = ports.into_coordinator(CoordinatorConfig { onboarding: true });

        let event = progress(mission("m1", 1000.0, 1000.0), region("r1"));
        assert_eq!(coordinator.on_progress_updated(&event), ProgressOutcome::Suspended);

        coordinator.set_onboarding(false);
        assert!(!coordinator.is_onboarding());
        assert_eq!(
            coordinator.on_progress_updated(&event),
            ProgressOutcome::Completed { modal_shown: true }
        );
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn survey_not_due_still_runs_other_steps() {
        let mut ports = MockPorts::new();
        // expect_completions answers display_modal: false and registers no
        // survey prompt expectation, so showing it would fail the test.
        ports.allow_status_updates().expect_completions(1);
        ports.presenter.expect_show_survey_prompt().never();
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let outcome = coordinator.on_progress_updated(&progress(mission("m1", 100.0, 100.0), region("r1")));

        assert_eq!(outcome, ProgressOutcome::Completed { modal_shown: true });
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn survey_due_shows_blocking_prompt() {
        let mut ports = MockPorts::new();
        ports
            .allow_status_updates()
            .expect_analytics(1)
            .expect_local_completion(1)
            .expect_survey(1, true)
            .expect_audio(1)
            .expect_persistence(1)
            .expect_dialog(1);
        ports
            .presenter
            .expect_show_survey_prompt()
            .withf(|options| *options == SurveyModalOptions::blocking())
            .times(1)
            .return_const(());
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        coordinator.on_progress_updated(&progress(mission("m1", 100.0, 100.0), region("r1")));
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn open_dialog_skips_only_the_show_step() {
        let mut ports = MockPorts::new();
        ports
            .expect_analytics(1)
            .expect_local_completion(1)
            .expect_survey(1, false)
            .expect_audio(1)
            .expect_persistence(1);
        ports
            .registry
            .expect_current_mission()
            .returning(|| Some(mission("mB", 1000.0, 640.0)));
        ports
            .registry
            .expect_current_region()
            .returning(|| Some(region("rB")));
        ports
            .presenter
            .expect_is_mission_complete_open()
            .times(1)
            .return_const(true);
        ports.presenter.expect_update_mission_complete().never();
        ports.presenter.expect_show_mission_complete().never();
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let outcome = coordinator.on_region_completed(&RegionCompleted { region: region("rB") });

        assert_eq!(outcome, ProgressOutcome::Completed { modal_shown: false });
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn label_count_forwarded_when_aggregator_present() {
        let mut ports = MockPorts::new();
        ports.allow_status_updates().expect_completions(1);
        let mut labels = MockLabelCountPort::new();
        labels
            .expect_count_labels()
            .withf(|region_id| region_id.as_str() == "r7")
            .times(1)
            .return_const(42u32);
        ports.labels = Some(labels);
        ports
            .status
            .expect_set_region_label_count()
            .withf(|region_id, count| region_id.as_str() == "r7" && *count == 42)
            .times(1)
            .return_const(());
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        coordinator.on_progress_updated(&progress(mission("m1", 10.0, 10.0), region("r7")));
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn snapshot_already_flagged_complete_is_not_replayed() {
        let mut ports = MockPorts::new();
        ports.allow_status_updates().expect_completions(0);
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        let mut done = mission("m1", 10.0, 10.0);
        done.complete();
        let outcome = coordinator.on_progress_updated(&progress(done.clone(), region("r1")));

        assert_eq!(outcome, ProgressOutcome::AlreadyCompleted);
        assert_eq!(coordinator.state_of(&done.id), CompletionState::Completed);
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn distinct_missions_each_complete_once() {
        let mut ports = MockPorts::new();
        ports.allow_status_updates().expect_completions(2);
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());

        for id in ["m1", "m2", "m1", "m2"] {
            coordinator.on_progress_updated(&progress(mission(id, 10.0, 10.0), region("r1")));
        }
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn subscribed_coordinator_reacts_to_bus_events() {
        let mut ports = MockPorts::new();
        ports.allow_status_updates().expect_completions(1);
        ports
            .registry
            .expect_current_mission()
            .returning(|| Some(mission("m1", 10.0, 10.0)));
        ports
            .registry
            .expect_current_region()
            .returning(|| Some(region("r1")));
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());
        let bus = InProcessEventBus::new();
        coordinator.subscribe(&bus);

        bus.publish_progress_updated(&progress(mission("m1", 10.0, 10.0), region("r1")));
        bus.publish_region_completed(&RegionCompleted { region: region("r1") });

        assert_eq!(coordinator.state_of(&MissionId::new("m1").unwrap()), CompletionState::Completed);
        drain(&coordinator).await;
    }

    #[tokio::test]
    async fn dropped_coordinator_handlers_are_no_ops() {
        let mut ports = MockPorts::new();
        ports.expect_completions(0);
        let coordinator = ports.into_coordinator(CoordinatorConfig::default());
        let bus = InProcessEventBus::new();
        coordinator.subscribe(&bus);
        drop(coordinator);

        bus.publish_progress_updated(&progress(mission("m1", 10.0, 10.0), region("r1")));
    }

    #[test]
    fn record_matches_scenario_values() {
        let record = MissionCompleteRecord::capture(&mission("m1", 1532.4, 1532.4), &region("r7"));
        assert_eq!(record.distance_meters(), 1532);
    }
}
