//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    console::{ConsoleAudio, ConsolePresenter, ConsoleStatus, TracingAnalytics},
    event_bus::InProcessEventBus,
    ports::{MissionPersistencePort, SurveyPort},
    registry::InMemoryMissionRegistry,
    resilient_persistence::ResilientMissionPersistence,
    settings::Settings,
    sidewalk_api::SidewalkApiClient,
};
use crate::use_cases::mission::{
    CompleteMission, CoordinatorConfig, MissionUseCases, TrackMissionProgress,
};

/// Main application state.
///
/// Owns the event bus, the adapters the feed talks to directly and the
/// mission use cases. The coordinator is subscribed to the bus on
/// construction.
pub struct App {
    pub bus: InProcessEventBus,
    pub registry: Arc<InMemoryMissionRegistry>,
    pub presenter: Arc<ConsolePresenter>,
    pub status: Arc<ConsoleStatus>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub mission: MissionUseCases,
}

impl App {
    /// Wire the production adapters: HTTP client for both remote calls, with
    /// retry around persistence.
    pub fn new(settings: &Settings) -> Self {
        let client = Arc::new(SidewalkApiClient::new(
            &settings.base_url,
            settings.http_timeout,
        ));
        let retry_config = settings.retry_config();
        tracing::info!(
            base_url = %client.base_url(),
            max_retries = retry_config.max_retries,
            base_delay_ms = retry_config.base_delay_ms,
            "Sidewalk API client configured"
        );
        let persistence = Arc::new(ResilientMissionPersistence::new(
            client.clone(),
            retry_config,
        ));

        Self::with_remote(settings, client, persistence)
    }

    /// Wire the app around the given remote ports.
    pub fn with_remote(
        settings: &Settings,
        survey: Arc<dyn SurveyPort>,
        persistence: Arc<dyn MissionPersistencePort>,
    ) -> Self {
        let bus = InProcessEventBus::new();
        let registry = Arc::new(InMemoryMissionRegistry::new());
        let presenter = Arc::new(ConsolePresenter::new());
        let status = Arc::new(ConsoleStatus::new());

        let complete_mission = CompleteMission::new(
            Arc::new(TracingAnalytics),
            registry.clone(),
            survey,
            Arc::new(ConsoleAudio),
            None,
            status.clone(),
            persistence,
            presenter.clone(),
            Arc::new(SystemClock::new()),
        );

        let track_progress = TrackMissionProgress::new(
            complete_mission,
            registry.clone(),
            status.clone(),
            CoordinatorConfig {
                onboarding: settings.onboarding,
            },
        );
        track_progress.subscribe(&bus);

        Self {
            bus,
            registry,
            presenter,
            status,
            use_cases: UseCases {
                mission: MissionUseCases::new(track_progress),
            },
        }
    }

    pub fn coordinator(&self) -> &Arc<TrackMissionProgress> {
        &self.use_cases.mission.track_progress
    }

    /// Stop accepting background work and wait for in-flight remote calls.
    pub async fn shutdown(&self) {
        let tasks = self.coordinator().background_tasks();
        tasks.close();
        if !tasks.is_empty() {
            tracing::info!(pending = tasks.len(), "Waiting for background calls");
        }
        tasks.wait().await;
    }
}
