//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod console;
pub mod event_bus;
pub mod ports;
pub mod registry;
pub mod resilient_persistence;
pub mod settings;
pub mod sidewalk_api;
