//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{info, warn};

use crate::tasks::{countdown_task, location_confirm_task};

use super::{CountdownState, Phase, Sequencer, SequencerEvent};

/// Outcome of an activation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The countdown was armed and will fire in `remaining_seconds`
    Armed { remaining_seconds: u32 },
    /// The press was a no-op in the current phase
    Ignored { phase: Phase },
}

/// Outcome of a cancellation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// An in-flight countdown was stopped
    Cancelled,
    /// Nothing was counting; the call was a no-op
    Ignored { phase: Phase },
}

/// Main application state that owns the sequencer, its timer handles and the
/// notification channels
#[derive(Debug)]
pub struct AppState {
    /// The emergency activation sequencer
    pub sequencer: Arc<Mutex<Sequencer>>,
    /// Delay before the location-confirmed follow-up after firing
    pub confirm_delay_secs: u64,
    /// Owned handle of the running countdown task, if any
    countdown_task: Mutex<Option<JoinHandle<()>>>,
    /// Owned handle of the pending location-confirm follow-up, if any
    confirm_task: Mutex<Option<JoinHandle<()>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for sequencer lifecycle events
    pub event_tx: broadcast::Sender<SequencerEvent>,
    /// Channel for countdown display updates
    pub countdown_tx: watch::Sender<CountdownState>,
    /// Keep the receiver alive to prevent channel closure
    _countdown_rx: watch::Receiver<CountdownState>,
}

impl AppState {
    /// Create a new AppState with an idle sequencer
    pub fn new(port: u16, host: String, countdown_seconds: u32, confirm_delay_secs: u64) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (countdown_tx, countdown_rx) = watch::channel(CountdownState::new());

        Self {
            sequencer: Arc::new(Mutex::new(Sequencer::new(countdown_seconds))),
            confirm_delay_secs,
            countdown_task: Mutex::new(None),
            confirm_task: Mutex::new(None),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            countdown_tx,
            _countdown_rx: countdown_rx,
        }
    }

    /// Arm the emergency countdown and spawn its tick driver.
    ///
    /// A press while counting or after firing is a defined no-op and reports
    /// `Ignored` without touching the in-flight schedule.
    pub fn activate(self: &Arc<Self>) -> Result<ActivationOutcome, String> {
        let mut sequencer = self.sequencer.lock()
            .map_err(|e| format!("Failed to lock sequencer: {}", e))?;

        if !sequencer.activate(&self.event_tx) {
            let phase = sequencer.phase();
            drop(sequencer);
            info!("Activation ignored in phase {:?}", phase);
            return Ok(ActivationOutcome::Ignored { phase });
        }

        let remaining_seconds = sequencer.remaining_seconds();
        drop(sequencer);

        self.record_action("activate");
        self.push_countdown(CountdownState::active(remaining_seconds));

        info!("Emergency countdown armed, firing in {}s unless cancelled", remaining_seconds);

        let handle = tokio::spawn(countdown_task(Arc::clone(self)));
        let mut slot = self.countdown_task.lock()
            .map_err(|e| format!("Failed to lock countdown handle: {}", e))?;
        if let Some(stale) = slot.replace(handle) {
            stale.abort();
        }

        Ok(ActivationOutcome::Armed { remaining_seconds })
    }

    /// Stop an in-flight countdown.
    ///
    /// The phase flips to `Cancelled` under the sequencer lock, so a tick
    /// already waiting on that lock finds nothing left to count; the task
    /// handle is then aborted so no further tick is scheduled. Both happen
    /// before this method returns.
    pub fn cancel(&self) -> Result<CancelOutcome, String> {
        let mut sequencer = self.sequencer.lock()
            .map_err(|e| format!("Failed to lock sequencer: {}", e))?;

        if !sequencer.cancel(&self.event_tx) {
            let phase = sequencer.phase();
            drop(sequencer);
            info!("Cancellation ignored in phase {:?}", phase);
            return Ok(CancelOutcome::Ignored { phase });
        }
        drop(sequencer);

        if let Ok(mut slot) = self.countdown_task.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }

        self.record_action("cancel");
        self.push_countdown(CountdownState::inactive());
        info!("Emergency countdown cancelled");

        Ok(CancelOutcome::Cancelled)
    }

    /// Schedule the delayed location-confirmed follow-up after a fire.
    ///
    /// The handle is owned by this state, so the follow-up dies with the
    /// sequencer instance instead of outliving it.
    pub(crate) fn schedule_location_confirm(self: &Arc<Self>) {
        let handle = tokio::spawn(location_confirm_task(Arc::clone(self)));
        match self.confirm_task.lock() {
            Ok(mut slot) => {
                if let Some(stale) = slot.replace(handle) {
                    stale.abort();
                }
            }
            Err(e) => {
                warn!("Failed to lock confirm handle: {}", e);
                handle.abort();
            }
        }
    }

    /// Subscribe to sequencer lifecycle events
    pub fn subscribe_events(&self) -> broadcast::Receiver<SequencerEvent> {
        self.event_tx.subscribe()
    }

    /// Get the current sequencer phase
    pub fn phase(&self) -> Result<Phase, String> {
        self.sequencer.lock()
            .map(|sequencer| sequencer.phase())
            .map_err(|e| format!("Failed to lock sequencer: {}", e))
    }

    /// Get the configured countdown length
    pub fn total_seconds(&self) -> Result<u32, String> {
        self.sequencer.lock()
            .map(|sequencer| sequencer.total_seconds())
            .map_err(|e| format!("Failed to lock sequencer: {}", e))
    }

    /// Get the current countdown display state
    pub fn countdown_state(&self) -> CountdownState {
        self.countdown_tx.borrow().clone()
    }

    /// Publish a countdown update to status watchers
    pub(crate) fn push_countdown(&self, countdown: CountdownState) {
        if let Err(e) = self.countdown_tx.send(countdown) {
            warn!("Failed to send countdown update: {}", e);
        }
    }

    /// Record the last host action for the status surface
    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        // Timer lifetimes are bound to this instance
        for slot in [&self.countdown_task, &self.confirm_task] {
            if let Ok(mut guard) = slot.lock() {
                if let Some(handle) = guard.take() {
                    handle.abort();
                }
            }
        }
    }
}
