//! SOS Beacon - A state-managed HTTP server for emergency alert sequencing
//!
//! This library provides the emergency activation sequencer (arm, countdown,
//! cancel, fire) together with the HTTP surface and background tasks that
//! drive it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
