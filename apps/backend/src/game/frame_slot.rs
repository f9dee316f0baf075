//! Latest-frame cell shared by a connection and its round loop.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::vision::Frame;

/// Single-writer, single-reader slot holding the newest unconsumed frame.
///
/// The inbound handler overwrites it on every frame; the round loop takes it
/// once per round. A frame is never used for two rounds, and starting a game
/// clears it, so a player who stops sending frames gets void rounds rather
/// than replays of an old gesture.
#[derive(Debug, Clone, Default)]
pub struct FrameSlot {
    latest: Arc<Mutex<Option<Frame>>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, frame: Frame) {
        *self.latest.lock() = Some(frame);
    }

    /// Take the newest frame, leaving the slot empty.
    pub fn take(&self) -> Option<Frame> {
        self.latest.lock().take()
    }

    pub fn clear(&self) {
        self.latest.lock().take();
    }
}
