//! State management module
//!
//! This module contains the emergency sequencer state machine and the
//! application state that wires it to timers and notification channels.

pub mod sequencer;
pub mod events;
pub mod app_state;
pub mod countdown_state;

// Re-export main types
pub use sequencer::{Phase, Sequencer};
pub use events::{EventSink, SequencerEvent};
pub use app_state::{ActivationOutcome, AppState, CancelOutcome};
pub use countdown_state::CountdownState;
