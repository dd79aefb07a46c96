//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Remote calls (survey eligibility, mission persistence)
//! - UI collaborators (completion dialog, audio, status display, analytics)
//! - The mission registry and the event bus
//! - Clock (for testing)

mod error;
mod event_bus;
mod external;
mod presentation;
mod registry;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{MissionCompletion, MissionPersistencePort, SurveyEligibility, SurveyPort};

// =============================================================================
// UI Collaborator Ports
// =============================================================================
pub use presentation::{
    AnalyticsPort, AudioCue, AudioPort, Backdrop, LabelCountPort, PresenterPort, StatusPort,
    SurveyModalOptions,
};

// =============================================================================
// Registry and Event Bus
// =============================================================================
pub use event_bus::{EventBusPort, ProgressUpdatedHandler, RegionCompletedHandler};
pub use registry::MissionRegistryPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockMissionPersistencePort, MockSurveyPort};
#[cfg(test)]
pub use presentation::{
    MockAnalyticsPort, MockAudioPort, MockLabelCountPort, MockPresenterPort, MockStatusPort,
};
#[cfg(test)]
pub use registry::MockMissionRegistryPort;
#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RemoteError;
