use tokio::sync::mpsc::UnboundedSender;

use crate::game::events::GameEvent;

/// Where a round loop delivers its events.
///
/// `emit` returns `false` once the receiving side is gone; the loop treats
/// that like a cancellation.
pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: GameEvent) -> bool;
}

impl EventSink for UnboundedSender<GameEvent> {
    fn emit(&self, event: GameEvent) -> bool {
        self.send(event).is_ok()
    }
}
