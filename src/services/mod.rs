//! External collaborator module
//!
//! This module contains the device action proxy the host can trigger
//! alongside the emergency sequencer.

pub mod device_actions;

// Re-export main functions
pub use device_actions::*;
