//! Notification background task
//!
//! Subscribes to sequencer lifecycle events and renders each one as a log
//! line, standing in for the user-facing display the host would provide.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::state::{AppState, SequencerEvent};

/// Background task that relays sequencer events to the log
pub async fn notification_task(state: Arc<AppState>) {
    info!("Starting notification task");

    let mut events = state.subscribe_events();

    loop {
        match events.recv().await {
            Ok(SequencerEvent::Armed { remaining_seconds }) => {
                info!("Emergency alert armed, activating in {}s unless cancelled", remaining_seconds);
            }
            Ok(SequencerEvent::Tick { remaining_seconds }) => {
                info!("Activating emergency alert in {}s", remaining_seconds);
            }
            Ok(SequencerEvent::Fired) => {
                warn!("Emergency alert activated, location shared with authorities");
            }
            Ok(SequencerEvent::LocationConfirmed) => {
                info!("Location confirmed, responders have the precise position");
            }
            Ok(SequencerEvent::Cancelled) => {
                info!("Emergency alert has been cancelled");
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification stream lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Event channel closed, stopping notification task");
                break;
            }
        }
    }
}
