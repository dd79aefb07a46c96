//! Sidewalk Engine library.
//!
//! Mission progress tracking for the Sidewalk audit client: watches progress
//! events, decides when a mission is complete and runs the completion
//! sequence exactly once per mission.
//!
//! ## Structure
//!
//! - `use_cases/` - Mission progress coordinator and completion sequence
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - JSON-lines event feed
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
