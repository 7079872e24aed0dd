//! Countdown tick driver
//!
//! One task per activation; the handle is owned by [`AppState`] so a cancel
//! can abort it synchronously.

use std::{sync::Arc, time::Duration};

use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::{AppState, CountdownState, Phase};

/// Drive the sequencer at a one-second cadence until it fires or stops
/// counting.
///
/// The first tick lands one full second after arming; each tick takes the
/// sequencer lock, so a cancel that got there first wins and the task exits
/// without emitting anything.
pub async fn countdown_task(state: Arc<AppState>) {
    debug!("Countdown task started");

    let period = Duration::from_secs(1);
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        let (fired, remaining_seconds) = {
            let mut sequencer = match state.sequencer.lock() {
                Ok(sequencer) => sequencer,
                Err(e) => {
                    error!("Failed to lock sequencer from countdown task: {}", e);
                    break;
                }
            };

            if sequencer.phase() != Phase::Counting {
                debug!("Countdown no longer running, stopping tick driver");
                break;
            }

            let fired = sequencer.tick(&state.event_tx);
            (fired, sequencer.remaining_seconds())
        };

        if fired {
            info!("Countdown reached zero, emergency alert fired");
            state.push_countdown(CountdownState::inactive());
            state.schedule_location_confirm();
            break;
        }

        state.push_countdown(CountdownState::active(remaining_seconds));
    }

    debug!("Countdown task finished");
}
