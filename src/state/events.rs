//! Sequencer lifecycle events and the sink they are delivered to

use tokio::sync::broadcast;
use tracing::debug;

/// Lifecycle events emitted by the emergency sequencer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    /// A countdown was armed; fires in `remaining_seconds` unless cancelled
    Armed { remaining_seconds: u32 },
    /// One second elapsed; `remaining_seconds` is the new value
    Tick { remaining_seconds: u32 },
    /// The countdown reached zero and the alert went out
    Fired,
    /// Delayed follow-up confirming responders received the location
    LocationConfirmed,
    /// The countdown was cancelled before firing
    Cancelled,
}

/// Destination for sequencer lifecycle events.
///
/// The sequencer knows nothing about how events are displayed; hosts plug in
/// whatever sink suits them (a broadcast channel here, a plain vec in tests).
pub trait EventSink: Send + Sync {
    /// Deliver one event. Delivery is one-directional and unacknowledged.
    fn notify(&self, event: SequencerEvent);
}

impl EventSink for broadcast::Sender<SequencerEvent> {
    fn notify(&self, event: SequencerEvent) {
        // A send error only means nobody is subscribed right now
        if self.send(event).is_err() {
            debug!("No subscribers for sequencer event");
        }
    }
}
