//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    services::{dispatch_device_action, emergency_contacts, DeviceAction, EmergencyContact},
    state::{ActivationOutcome, AppState, CancelOutcome},
};

use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /activate - Arm the emergency countdown
pub async fn activate_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.activate() {
        Ok(ActivationOutcome::Armed { remaining_seconds }) => {
            info!("Activate endpoint called - countdown armed");
            Ok(Json(ApiResponse::accepted(
                format!("Emergency alert armed, firing in {}s unless cancelled", remaining_seconds),
                state.phase().map_err(|e| {
                    error!("Failed to read phase: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                })?,
            )))
        }
        Ok(ActivationOutcome::Ignored { phase }) => {
            info!("Activate endpoint called - press ignored in phase {:?}", phase);
            Ok(Json(ApiResponse::ignored(
                "Activation ignored, a countdown is already in flight or the alert fired".to_string(),
                phase,
            )))
        }
        Err(e) => {
            error!("Failed to activate emergency countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /cancel - Stop an in-flight countdown
pub async fn cancel_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.cancel() {
        Ok(CancelOutcome::Cancelled) => {
            info!("Cancel endpoint called - countdown stopped");
            Ok(Json(ApiResponse::accepted(
                "Emergency alert cancelled".to_string(),
                state.phase().map_err(|e| {
                    error!("Failed to read phase: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                })?,
            )))
        }
        Ok(CancelOutcome::Ignored { phase }) => {
            info!("Cancel endpoint called - nothing counting in phase {:?}", phase);
            Ok(Json(ApiResponse::ignored(
                "Cancellation ignored, no countdown is running".to_string(),
                phase,
            )))
        }
        Err(e) => {
            error!("Failed to cancel emergency countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /action/:action - Dispatch a fire-and-forget device action
pub async fn action_handler(
    State(state): State<Arc<AppState>>,
    Path(action_name): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(action) = DeviceAction::from_name(&action_name) else {
        info!("Unknown device action requested: {}", action_name);
        return Err(StatusCode::NOT_FOUND);
    };

    // Fire-and-forget: the sequencer never consumes the action result
    tokio::spawn(dispatch_device_action(action));

    let phase = state.phase().map_err(|e| {
        error!("Failed to read phase: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Dispatched {} action", action.label());
    Ok(Json(ApiResponse::accepted(
        format!("Dispatched {}", action.label()),
        phase,
    )))
}

/// Handle GET /status - Return current sequencer status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let phase = match state.phase() {
        Ok(phase) => phase,
        Err(e) => {
            error!("Failed to read phase: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let total_seconds = match state.total_seconds() {
        Ok(total) => total,
        Err(e) => {
            error!("Failed to read countdown length: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let countdown = state.countdown_state();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        phase,
        countdown_active: countdown.is_active(),
        countdown_remaining_seconds: countdown.remaining_seconds(),
        total_seconds,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /contacts - Return the emergency contact table
pub async fn contacts_handler() -> Json<Vec<EmergencyContact>> {
    Json(emergency_contacts())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
