//! Event bus port.
//!
//! Handlers are registered once and stay active for the lifetime of the bus.

use std::sync::Arc;

use sidewalk_domain::{ProgressUpdated, RegionCompleted};

pub type ProgressUpdatedHandler = Arc<dyn Fn(&ProgressUpdated) + Send + Sync>;
pub type RegionCompletedHandler = Arc<dyn Fn(&RegionCompleted) + Send + Sync>;

pub trait EventBusPort: Send + Sync {
    fn on_progress_updated(&self, handler: ProgressUpdatedHandler);
    fn on_region_completed(&self, handler: RegionCompletedHandler);
}
