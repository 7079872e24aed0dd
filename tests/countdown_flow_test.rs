//! End-to-end countdown behavior through the application state, driven on a
//! paused tokio clock so every timer fires deterministically.

use std::{sync::Arc, time::Duration};

use tokio::sync::broadcast::error::TryRecvError;

use sos_beacon::state::{ActivationOutcome, AppState, CancelOutcome, Phase, SequencerEvent};

fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string(), 5, 2))
}

/// Let every pending timer in the paused clock run out
async fn drain_timers() {
    tokio::time::sleep(Duration::from_secs(30)).await;
}

#[tokio::test(start_paused = true)]
async fn full_activation_emits_expected_sequence() {
    let state = test_state();
    let mut events = state.subscribe_events();

    let outcome = state.activate().unwrap();
    assert_eq!(outcome, ActivationOutcome::Armed { remaining_seconds: 5 });

    assert_eq!(
        events.recv().await.unwrap(),
        SequencerEvent::Armed { remaining_seconds: 5 }
    );
    for expected in (0..5).rev() {
        assert_eq!(
            events.recv().await.unwrap(),
            SequencerEvent::Tick { remaining_seconds: expected }
        );
    }
    assert_eq!(events.recv().await.unwrap(), SequencerEvent::Fired);
    assert_eq!(events.recv().await.unwrap(), SequencerEvent::LocationConfirmed);

    assert_eq!(state.phase().unwrap(), Phase::Fired);
    assert!(!state.countdown_state().is_active());
}

#[tokio::test(start_paused = true)]
async fn immediate_cancel_prevents_all_ticks() {
    let state = test_state();
    let mut events = state.subscribe_events();

    state.activate().unwrap();
    let outcome = state.cancel().unwrap();
    assert_eq!(outcome, CancelOutcome::Cancelled);

    assert_eq!(
        events.recv().await.unwrap(),
        SequencerEvent::Armed { remaining_seconds: 5 }
    );
    assert_eq!(events.recv().await.unwrap(), SequencerEvent::Cancelled);

    drain_timers().await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(state.phase().unwrap(), Phase::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn cancel_mid_countdown_suppresses_fire() {
    let state = test_state();
    let mut events = state.subscribe_events();

    state.activate().unwrap();
    assert_eq!(
        events.recv().await.unwrap(),
        SequencerEvent::Armed { remaining_seconds: 5 }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        SequencerEvent::Tick { remaining_seconds: 4 }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        SequencerEvent::Tick { remaining_seconds: 3 }
    );

    state.cancel().unwrap();
    assert_eq!(events.recv().await.unwrap(), SequencerEvent::Cancelled);

    drain_timers().await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn reactivation_after_cancel_restarts_from_total() {
    let state = test_state();

    state.activate().unwrap();
    state.cancel().unwrap();

    let mut events = state.subscribe_events();
    let outcome = state.activate().unwrap();
    assert_eq!(outcome, ActivationOutcome::Armed { remaining_seconds: 5 });

    assert_eq!(
        events.recv().await.unwrap(),
        SequencerEvent::Armed { remaining_seconds: 5 }
    );
    for expected in (0..5).rev() {
        assert_eq!(
            events.recv().await.unwrap(),
            SequencerEvent::Tick { remaining_seconds: expected }
        );
    }
    assert_eq!(events.recv().await.unwrap(), SequencerEvent::Fired);
}

#[tokio::test(start_paused = true)]
async fn duplicate_activation_is_ignored_and_fires_once() {
    let state = test_state();
    let mut events = state.subscribe_events();

    state.activate().unwrap();
    let second = state.activate().unwrap();
    assert_eq!(second, ActivationOutcome::Ignored { phase: Phase::Counting });

    drain_timers().await;

    let mut armed = 0;
    let mut fired = 0;
    while let Ok(event) = events.try_recv() {
        match event {
            SequencerEvent::Armed { .. } => armed += 1,
            SequencerEvent::Fired => fired += 1,
            _ => {}
        }
    }
    assert_eq!(armed, 1);
    assert_eq!(fired, 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_without_countdown_is_ignored() {
    let state = test_state();

    let outcome = state.cancel().unwrap();
    assert_eq!(outcome, CancelOutcome::Ignored { phase: Phase::Idle });
    assert_eq!(state.phase().unwrap(), Phase::Idle);
}
