//! Value objects

mod completion_rate;
mod mission_complete_record;

pub use completion_rate::CompletionRate;
pub use mission_complete_record::{MissionCompleteRecord, MISSION_COMPLETE_EVENT};
