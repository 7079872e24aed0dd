//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::Phase;

/// API response structure for sequencer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub phase: Phase,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, phase: Phase) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            phase,
        }
    }

    /// Create a response for a call that took effect
    pub fn accepted(message: String, phase: Phase) -> Self {
        Self::new("accepted".to_string(), message, phase)
    }

    /// Create a response for an out-of-phase no-op call
    pub fn ignored(message: String, phase: Phase) -> Self {
        Self::new("ignored".to_string(), message, phase)
    }
}

/// Status response with countdown information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub phase: Phase,
    pub countdown_active: bool,
    pub countdown_remaining_seconds: Option<u32>,
    pub total_seconds: u32,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: "1.0.0".to_string(),
        }
    }
}
