//! Sidewalk domain: missions, regions, and the completion evaluator.

pub mod completion;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use completion::{evaluate, Evaluation, COMPLETION_THRESHOLD};
pub use entities::{Mission, Region};
pub use error::DomainError;
pub use events::{MissionEventKind, ProgressUpdated, RegionCompleted};
pub use ids::{MissionId, RegionId};
pub use value_objects::{CompletionRate, MissionCompleteRecord, MISSION_COMPLETE_EVENT};
