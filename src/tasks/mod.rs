//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;
pub mod location_confirm;
pub mod notifications;

// Re-export main functions
pub use countdown::countdown_task;
pub use location_confirm::location_confirm_task;
pub use notifications::notification_task;
