//! Timed round loop of one game.
//!
//! ```text
//! loop while no score has reached the threshold:
//!     countdown N..=0, pausing `tick` after each value   (suspension points)
//!     take the latest frame                              (may be absent)
//!     classify it                                        (suspension point)
//!     score + learn                                      (synchronous)
//!     emit the round result
//!     cooldown after a processing failure                (suspension point)
//! emit game over
//! ```
//!
//! Every suspension point races the cancellation token, and every emission
//! re-checks it, so a cancelled loop never emits again.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::game::events::{GameEvent, RoundError, RoundResult, Scores, Winner};
use crate::game::frame_slot::FrameSlot;
use crate::game::session::StatusCell;
use crate::game::sink::EventSink;
use crate::game::state::GameState;
use crate::vision::GestureClassifier;

/// How a round loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Finished { winner: Winner, scores: Scores },
    Cancelled { scores: Scores },
}

/// The loop was cancelled or its sink went away.
struct Cancelled;

/// Pause owed before the next round starts.
///
/// Only processing failures back off; void rounds continue immediately.
pub fn cooldown_after(result: &RoundResult, config: &GameConfig) -> Option<Duration> {
    matches!(result.play, Err(RoundError::Processing(_))).then_some(config.error_cooldown)
}

pub struct RoundLoop<S> {
    session_id: Uuid,
    config: GameConfig,
    state: GameState,
    classifier: Arc<dyn GestureClassifier>,
    frames: FrameSlot,
    sink: S,
    cancel: CancellationToken,
    status: StatusCell,
}

impl<S: EventSink> RoundLoop<S> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session_id: Uuid,
        config: GameConfig,
        state: GameState,
        classifier: Arc<dyn GestureClassifier>,
        frames: FrameSlot,
        sink: S,
        cancel: CancellationToken,
        status: StatusCell,
    ) -> Self {
        Self {
            session_id,
            config,
            state,
            classifier,
            frames,
            sink,
            cancel,
            status,
        }
    }

    pub async fn run(mut self) -> LoopExit {
        info!(
            session_id = %self.session_id,
            win_threshold = self.config.win_threshold,
            "game started"
        );
        match self.play_game().await {
            Ok(winner) => {
                let scores = self.state.scores();
                info!(
                    session_id = %self.session_id,
                    winner = ?winner,
                    ai = scores.ai,
                    player = scores.player,
                    rounds = self.state.rounds(),
                    "game over"
                );
                LoopExit::Finished { winner, scores }
            }
            Err(Cancelled) => {
                let scores = self.state.scores();
                info!(
                    session_id = %self.session_id,
                    rounds = self.state.rounds(),
                    "game cancelled"
                );
                LoopExit::Cancelled { scores }
            }
        }
    }

    async fn play_game(&mut self) -> Result<Winner, Cancelled> {
        while !self.state.is_over() {
            let round = self.state.begin_round();
            self.countdown().await?;
            let result = self.resolve_round(round).await?;
            let cooldown = cooldown_after(&result, &self.config);
            self.emit(GameEvent::Round(result))?;
            if let Some(pause) = cooldown {
                self.pause(pause).await?;
            }
        }

        self.ensure_live()?;
        let winner = self.state.winner();
        self.status.finish();
        self.emit(GameEvent::GameOver {
            winner,
            scores: self.state.scores(),
        })?;
        Ok(winner)
    }

    async fn countdown(&self) -> Result<(), Cancelled> {
        for value in (0..=self.config.countdown_from).rev() {
            self.emit(GameEvent::Countdown { value })?;
            self.pause(self.config.tick).await?;
        }
        Ok(())
    }

    async fn resolve_round(&mut self, round: u32) -> Result<RoundResult, Cancelled> {
        let before = self.state.scores();

        let Some(frame) = self.frames.take() else {
            debug!(session_id = %self.session_id, round, "no frame at capture");
            return Ok(RoundResult::void(round, RoundError::NoFrame, before, None));
        };

        let classified = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Cancelled),
            classified = self.classifier.classify(&frame) => classified,
        };

        let detection = match classified {
            Ok(detection) => detection,
            Err(err) => {
                warn!(session_id = %self.session_id, round, error = %err, "frame processing failed");
                let error = RoundError::Processing(err.to_string());
                return Ok(RoundResult::void(round, error, before, None));
            }
        };

        let Some(player) = detection.gesture else {
            debug!(session_id = %self.session_id, round, "no gesture recognised");
            return Ok(RoundResult::void(
                round,
                RoundError::NoGesture,
                before,
                Some(detection),
            ));
        };

        // Abandon before touching scores if cancelled while classifying.
        self.ensure_live()?;
        match self.state.play(player) {
            Ok(play) => {
                let scores = self.state.scores();
                info!(
                    session_id = %self.session_id,
                    round,
                    player_move = %play.player,
                    ai_move = %play.ai,
                    outcome = %play.outcome,
                    ai = scores.ai,
                    player = scores.player,
                    "round scored"
                );
                Ok(RoundResult::scored(round, play, scores, detection))
            }
            Err(err) => {
                warn!(session_id = %self.session_id, round, error = %err, "opponent update failed");
                let error = RoundError::Processing(err.to_string());
                Ok(RoundResult::void(round, error, before, Some(detection)))
            }
        }
    }

    async fn pause(&self, duration: Duration) -> Result<(), Cancelled> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }

    fn emit(&self, event: GameEvent) -> Result<(), Cancelled> {
        self.ensure_live()?;
        if self.sink.emit(event) {
            Ok(())
        } else {
            debug!(session_id = %self.session_id, "event sink closed, stopping");
            self.cancel.cancel();
            Err(Cancelled)
        }
    }

    fn ensure_live(&self) -> Result<(), Cancelled> {
        if self.cancel.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}
