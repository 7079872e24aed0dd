//! Delayed location-confirmed follow-up after a fired alert

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::info;

use crate::state::{AppState, EventSink, SequencerEvent};

/// Emit the best-effort `LocationConfirmed` event a short while after the
/// alert fired. The spawning state owns this task's handle, so the follow-up
/// never outlives the sequencer instance.
pub async fn location_confirm_task(state: Arc<AppState>) {
    sleep(Duration::from_secs(state.confirm_delay_secs)).await;

    info!("Emergency responders confirmed receipt of the location");
    state.event_tx.notify(SequencerEvent::LocationConfirmed);
}
