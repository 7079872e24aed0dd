//! Emergency activation sequencer state machine
//!
//! Pure synchronous transitions; the one-second cadence is driven externally
//! by the countdown task. All out-of-phase calls are defined no-ops rather
//! than errors, so a re-entrant button press can never corrupt an in-flight
//! countdown.

use serde::{Deserialize, Serialize};

use super::events::{EventSink, SequencerEvent};

/// Lifecycle phase of one emergency activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No activation in progress
    Idle,
    /// Countdown running, one tick per second
    Counting,
    /// Alert went out; terminal for this activation
    Fired,
    /// Countdown stopped by the user; a new activation may re-arm
    Cancelled,
}

/// The emergency activation sequencer
#[derive(Debug)]
pub struct Sequencer {
    phase: Phase,
    remaining_seconds: u32,
    total_seconds: u32,
}

impl Sequencer {
    /// Create an idle sequencer with the configured countdown length
    pub fn new(total_seconds: u32) -> Self {
        Self {
            phase: Phase::Idle,
            remaining_seconds: 0,
            total_seconds,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left before auto-fire; only meaningful while counting
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Configured countdown length
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Arm the countdown. Returns true when the press took effect.
    ///
    /// Legal from `Idle` and from `Cancelled` (the button must be pressable
    /// again after a cancel). While counting or after firing the press is
    /// silently ignored and the existing schedule is left untouched.
    pub fn activate(&mut self, sink: &dyn EventSink) -> bool {
        match self.phase {
            Phase::Idle | Phase::Cancelled => {
                self.phase = Phase::Counting;
                self.remaining_seconds = self.total_seconds;
                sink.notify(SequencerEvent::Armed {
                    remaining_seconds: self.remaining_seconds,
                });
                true
            }
            Phase::Counting | Phase::Fired => false,
        }
    }

    /// Stop an in-flight countdown. Returns true when a countdown was stopped.
    ///
    /// Effective only while counting; any other phase is a silent no-op.
    pub fn cancel(&mut self, sink: &dyn EventSink) -> bool {
        if self.phase != Phase::Counting {
            return false;
        }

        self.phase = Phase::Cancelled;
        self.remaining_seconds = 0;
        sink.notify(SequencerEvent::Cancelled);
        true
    }

    /// One countdown step, invoked only by the countdown task.
    ///
    /// Decrements and emits the new value; entering zero fires the alert.
    /// Returns true when this step fired.
    pub(crate) fn tick(&mut self, sink: &dyn EventSink) -> bool {
        if self.phase != Phase::Counting {
            return false;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        sink.notify(SequencerEvent::Tick {
            remaining_seconds: self.remaining_seconds,
        });

        if self.remaining_seconds == 0 {
            self.phase = Phase::Fired;
            sink.notify(SequencerEvent::Fired);
            true
        } else {
            false
        }
    }
}
