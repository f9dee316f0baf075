//! Classifiers that need no hand tracker.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{decode_data_url, Detection, Frame, GestureClassifier, VisionError};
use crate::domain::Move;

/// Never recognises anything. Used when no hand detector is configured.
pub struct BlindClassifier;

#[async_trait]
impl GestureClassifier for BlindClassifier {
    async fn classify(&self, _frame: &Frame) -> Result<Detection, VisionError> {
        Ok(Detection::nothing())
    }
}

/// Reads the move name from the frame itself, e.g.
/// `data:text/plain;base64,cm9jaw==` is rock. Handy for demos and
/// websocket tests where no camera is involved.
pub struct LabeledFrameClassifier;

#[async_trait]
impl GestureClassifier for LabeledFrameClassifier {
    async fn classify(&self, frame: &Frame) -> Result<Detection, VisionError> {
        let image = decode_data_url(frame)?;
        let label = String::from_utf8_lossy(&image.bytes);
        Ok(Detection {
            gesture: label.parse::<Move>().ok(),
            ..Detection::default()
        })
    }
}

/// One scripted classifier answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Script {
    Gesture(Move),
    Nothing,
    Fail(String),
}

/// Replays a fixed sequence of answers, one per call, then reports nothing.
#[derive(Default)]
pub struct ScriptedClassifier {
    steps: Mutex<VecDeque<Script>>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new(steps: impl IntoIterator<Item = Script>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push(&self, step: Script) {
        self.steps.lock().push_back(step);
    }

    /// How many frames were classified so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GestureClassifier for ScriptedClassifier {
    async fn classify(&self, _frame: &Frame) -> Result<Detection, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.steps.lock().pop_front().unwrap_or(Script::Nothing) {
            Script::Gesture(mv) => Ok(Detection::gesture(mv)),
            Script::Nothing => Ok(Detection::nothing()),
            Script::Fail(reason) => Err(VisionError::Detector(reason)),
        }
    }
}
