use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use super::*;
use crate::ai::PredictorConfig;
use crate::config::GameConfig;
use crate::vision::{BlindClassifier, Frame, GestureClassifier, LabeledFrameClassifier};

// "rock"
const ROCK_FRAME: &str = "data:text/plain;base64,cm9jaw==";

fn deps(win_threshold: u32, classifier: Arc<dyn GestureClassifier>) -> SessionDeps {
    SessionDeps {
        game: GameConfig {
            win_threshold,
            ..GameConfig::default()
        },
        predictor: PredictorConfig::with_seed(7),
        classifier,
    }
}

async fn next(events: &mut UnboundedReceiver<GameEvent>) -> Option<GameEvent> {
    tokio::time::timeout(Duration::from_secs(600), events.recv())
        .await
        .expect("event before timeout")
}

/// Play until game over, submitting a rock frame at every capture.
async fn play_out(session: &Session, events: &mut UnboundedReceiver<GameEvent>) -> GameEvent {
    loop {
        let event = next(events).await.expect("loop alive");
        match event {
            GameEvent::Countdown { value: 0 } => session.submit_frame(Frame::new(ROCK_FRAME)),
            GameEvent::GameOver { .. } => return event,
            _ => {}
        }
    }
}

#[tokio::test(start_paused = true)]
async fn start_is_ignored_while_playing() {
    let mut session = Session::new(1, deps(5, Arc::new(BlindClassifier)));
    assert_eq!(session.status(), SessionStatus::Idle);

    let (tx, mut events) = unbounded_channel();
    assert!(session.start(tx));
    assert_eq!(session.status(), SessionStatus::Playing);

    let (second_tx, mut second_events) = unbounded_channel();
    assert!(!session.start(second_tx));

    assert_eq!(next(&mut events).await, Some(GameEvent::Countdown { value: 3 }));
    assert_eq!(next(&mut events).await, Some(GameEvent::Countdown { value: 2 }));
    // The rejected sink was dropped without ever receiving anything.
    assert_eq!(second_events.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn finished_game_can_be_restarted_with_fresh_scores() {
    let mut session = Session::new(2, deps(1, Arc::new(LabeledFrameClassifier)));
    let mut status = session.watch_status();

    let (tx, mut events) = unbounded_channel();
    assert!(session.start(tx));
    let over = play_out(&session, &mut events).await;
    let GameEvent::GameOver { scores, .. } = over else {
        panic!("expected game over");
    };
    assert_eq!(scores.max(), 1);
    assert_eq!(session.status(), SessionStatus::GameOver);
    assert_eq!(*status.borrow_and_update(), SessionStatus::GameOver);
    assert!(matches!(session.join().await, Some(LoopExit::Finished { .. })));

    let (tx, mut events) = unbounded_channel();
    assert!(session.start(tx));
    assert_eq!(session.status(), SessionStatus::Playing);
    loop {
        match next(&mut events).await.expect("loop alive") {
            GameEvent::Countdown { value: 0 } => session.submit_frame(Frame::new(ROCK_FRAME)),
            GameEvent::Round(result) => {
                assert_eq!(result.round, 1);
                assert!(result.scores.max() <= 1);
                break;
            }
            _ => {}
        }
    }
}

#[tokio::test(start_paused = true)]
async fn stale_frame_does_not_leak_into_new_game() {
    let mut session = Session::new(3, deps(5, Arc::new(LabeledFrameClassifier)));
    session.submit_frame(Frame::new(ROCK_FRAME));

    let (tx, mut events) = unbounded_channel();
    session.start(tx);
    loop {
        if let Some(GameEvent::Round(result)) = next(&mut events).await {
            assert_eq!(result.error(), Some(&RoundError::NoFrame));
            break;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_events_and_returns_to_idle() {
    let mut session = Session::new(4, deps(5, Arc::new(BlindClassifier)));
    let (tx, mut events) = unbounded_channel();
    session.start(tx);

    assert_eq!(next(&mut events).await, Some(GameEvent::Countdown { value: 3 }));
    session.cancel();
    assert_eq!(session.status(), SessionStatus::Idle);
    assert_eq!(next(&mut events).await, None);
    assert!(matches!(session.join().await, Some(LoopExit::Cancelled { .. })));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_session_cancels_its_game() {
    let mut session = Session::new(5, deps(5, Arc::new(BlindClassifier)));
    let (tx, mut events) = unbounded_channel();
    session.start(tx);

    assert_eq!(next(&mut events).await, Some(GameEvent::Countdown { value: 3 }));
    drop(session);
    assert_eq!(next(&mut events).await, None);
}

#[test]
fn sessions_get_distinct_derived_seeds() {
    let first = Session::new(1, deps(5, Arc::new(BlindClassifier)));
    let second = Session::new(2, deps(5, Arc::new(BlindClassifier)));
    assert_ne!(first.predictor_config(0).seed, second.predictor_config(0).seed);
    assert_ne!(first.predictor_config(0).seed, first.predictor_config(1).seed);
    assert_ne!(first.id(), second.id());
}
