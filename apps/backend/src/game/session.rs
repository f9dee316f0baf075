//! One client's game session: status, frame slot and the running round task.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ai::{derive_predictor_seed, Predictor, PredictorConfig};
use crate::config::GameConfig;
use crate::game::frame_slot::FrameSlot;
use crate::game::round_loop::{LoopExit, RoundLoop};
use crate::game::sink::EventSink;
use crate::game::state::GameState;
use crate::vision::{Frame, GestureClassifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Playing,
    GameOver,
}

/// Shared, observable session status.
///
/// Written by the session and by its round loop (Playing -> GameOver).
#[derive(Debug, Clone)]
pub struct StatusCell(Arc<watch::Sender<SessionStatus>>);

impl StatusCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionStatus::Idle);
        Self(Arc::new(tx))
    }

    pub fn get(&self) -> SessionStatus {
        *self.0.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.0.subscribe()
    }

    pub(crate) fn set(&self, status: SessionStatus) {
        self.0.send_replace(status);
    }

    /// Playing -> GameOver. Returns false if the game was no longer playing.
    pub(crate) fn finish(&self) -> bool {
        self.0.send_if_modified(|status| {
            if *status == SessionStatus::Playing {
                *status = SessionStatus::GameOver;
                true
            } else {
                false
            }
        })
    }

    /// Playing -> Idle; any other status is kept.
    fn stop(&self) {
        self.0.send_if_modified(|status| {
            if *status == SessionStatus::Playing {
                *status = SessionStatus::Idle;
                true
            } else {
                false
            }
        });
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a session needs to start games.
#[derive(Clone)]
pub struct SessionDeps {
    pub game: GameConfig,
    pub predictor: PredictorConfig,
    pub classifier: Arc<dyn GestureClassifier>,
}

struct RoundTask {
    cancel: CancellationToken,
    handle: JoinHandle<LoopExit>,
}

/// Per-connection game session.
///
/// At most one round loop runs at a time. Dropping the session cancels it.
pub struct Session {
    id: Uuid,
    session_no: u64,
    deps: SessionDeps,
    frames: FrameSlot,
    status: StatusCell,
    games_started: u32,
    shutdown: CancellationToken,
    task: Option<RoundTask>,
}

impl Session {
    pub fn new(session_no: u64, deps: SessionDeps) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_no,
            deps,
            frames: FrameSlot::new(),
            status: StatusCell::new(),
            games_started: 0,
            shutdown: CancellationToken::new(),
            task: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status.get()
    }

    pub fn watch_status(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Replace the latest frame. Older frames are simply overwritten.
    pub fn submit_frame(&self, frame: Frame) {
        self.frames.store(frame);
    }

    /// Start a new game, emitting its events into `sink`.
    ///
    /// Ignored (returns false) while a game is playing. Must be called
    /// within a tokio runtime.
    pub fn start<S: EventSink>(&mut self, sink: S) -> bool {
        if self.status() == SessionStatus::Playing {
            debug!(session_id = %self.id, "start ignored, game already playing");
            return false;
        }
        self.abort_task();
        self.frames.clear();

        let game_no = self.games_started;
        self.games_started += 1;
        let predictor = Predictor::new(self.predictor_config(game_no));
        let state = GameState::new(Box::new(predictor), self.deps.game.win_threshold);

        let cancel = self.shutdown.child_token();
        let round_loop = RoundLoop::new(
            self.id,
            self.deps.game.clone(),
            state,
            Arc::clone(&self.deps.classifier),
            self.frames.clone(),
            sink,
            cancel.clone(),
            self.status.clone(),
        );
        self.status.set(SessionStatus::Playing);
        let handle = tokio::spawn(round_loop.run());
        self.task = Some(RoundTask { cancel, handle });

        info!(session_id = %self.id, game_no, "game task spawned");
        true
    }

    /// Cancel the running game, if any. No events are emitted afterwards.
    pub fn cancel(&mut self) {
        if let Some(task) = &self.task {
            task.cancel.cancel();
        }
        self.status.stop();
    }

    /// Wait for the current round task to end and report how it ended.
    pub async fn join(&mut self) -> Option<LoopExit> {
        let task = self.task.take()?;
        task.handle.await.ok()
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel.cancel();
        }
    }

    pub(crate) fn predictor_config(&self, game_no: u32) -> PredictorConfig {
        let mut config = self.deps.predictor.clone();
        config.seed = config
            .seed
            .map(|base| derive_predictor_seed(base, self.session_no, game_no));
        config
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
