//! In-process event bus.
//!
//! Dispatch is synchronous: `publish_*` runs every registered handler for
//! that event kind, in registration order, before returning. Events are
//! therefore processed one at a time in publish order.

use std::sync::{Arc, PoisonError, RwLock};

use sidewalk_domain::{MissionEventKind, ProgressUpdated, RegionCompleted};

use crate::infrastructure::ports::{
    EventBusPort, ProgressUpdatedHandler, RegionCompletedHandler,
};

#[derive(Default)]
struct Handlers {
    progress_updated: Vec<ProgressUpdatedHandler>,
    region_completed: Vec<RegionCompletedHandler>,
}

/// Typed publish/subscribe bus for mission events.
#[derive(Clone, Default)]
pub struct InProcessEventBus {
    handlers: Arc<RwLock<Handlers>>,
}

impl InProcessEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish_progress_updated(&self, event: &ProgressUpdated) {
        // Snapshot so handlers may subscribe or publish without deadlocking.
        let handlers = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .progress_updated
            .clone();
        tracing::trace!(
            kind = %MissionEventKind::ProgressUpdated,
            mission_id = %event.mission.id,
            handlers = handlers.len(),
            "Dispatching event"
        );
        for handler in handlers {
            handler(event);
        }
    }

    pub fn publish_region_completed(&self, event: &RegionCompleted) {
        let handlers = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .region_completed
            .clone();
        tracing::trace!(
            kind = %MissionEventKind::RegionCompleted,
            region_id = %event.region.id,
            handlers = handlers.len(),
            "Dispatching event"
        );
        for handler in handlers {
            handler(event);
        }
    }

    pub fn handler_count(&self, kind: MissionEventKind) -> usize {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        match kind {
            MissionEventKind::ProgressUpdated => handlers.progress_updated.len(),
            MissionEventKind::RegionCompleted => handlers.region_completed.len(),
        }
    }
}

// =============================================================================
// Port Implementation
// =============================================================================

impl EventBusPort for InProcessEventBus {
    fn on_progress_updated(&self, handler: ProgressUpdatedHandler) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .progress_updated
            .push(handler);
    }

    fn on_region_completed(&self, handler: RegionCompletedHandler) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .region_completed
            .push(handler);
    }
}
