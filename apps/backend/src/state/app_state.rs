use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::ai::PredictorConfig;
use crate::config::GameConfig;
use crate::game::SessionDeps;
use crate::vision::GestureClassifier;
use crate::ws::hub::WsRegistry;

/// Shared resources handed to every connection.
#[derive(Clone)]
pub struct AppState {
    pub game: GameConfig,
    pub predictor: PredictorConfig,
    classifier: Arc<dyn GestureClassifier>,
    registry: Arc<WsRegistry>,
    sessions_opened: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(
        game: GameConfig,
        predictor: PredictorConfig,
        classifier: Arc<dyn GestureClassifier>,
    ) -> Self {
        Self {
            game,
            predictor,
            classifier,
            registry: Arc::new(WsRegistry::new()),
            sessions_opened: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn websocket_registry(&self) -> Arc<WsRegistry> {
        Arc::clone(&self.registry)
    }

    /// Dependencies for a new game session.
    pub fn session_deps(&self) -> SessionDeps {
        SessionDeps {
            game: self.game.clone(),
            predictor: self.predictor.clone(),
            classifier: Arc::clone(&self.classifier),
        }
    }

    /// Monotonic per-process session number, used for seed derivation.
    pub fn next_session_no(&self) -> u64 {
        self.sessions_opened.fetch_add(1, Ordering::Relaxed)
    }
}
