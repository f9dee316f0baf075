//! Gesture mapping from raised-finger flags.

use async_trait::async_trait;

use super::{
    decode_data_url, BoundingBox, DecodedImage, Detection, Frame, GestureClassifier, Landmark,
    VisionError,
};
use crate::domain::Move;

/// Raised flags for `[thumb, index, middle, ring, pinky]`.
pub type FingerState = [bool; 5];

/// A single tracked hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hand {
    pub fingers: FingerState,
    pub landmarks: Vec<Landmark>,
    pub bbox: Option<BoundingBox>,
}

/// Fist is rock, open hand is paper, index+middle is scissors.
pub fn gesture_from_fingers(fingers: &FingerState) -> Option<Move> {
    match fingers {
        [false, false, false, false, false] => Some(Move::Rock),
        [true, true, true, true, true] => Some(Move::Paper),
        [false, true, true, false, false] => Some(Move::Scissors),
        _ => None,
    }
}

/// Finds at most one hand in a decoded image.
#[async_trait]
pub trait HandDetector: Send + Sync {
    async fn detect(&self, image: &DecodedImage) -> Result<Option<Hand>, VisionError>;
}

/// Classifier built from a data-URL decoder, a hand detector and the finger table.
pub struct FingerGestureClassifier<D> {
    detector: D,
}

impl<D: HandDetector> FingerGestureClassifier<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }
}

#[async_trait]
impl<D: HandDetector> GestureClassifier for FingerGestureClassifier<D> {
    async fn classify(&self, frame: &Frame) -> Result<Detection, VisionError> {
        let image = decode_data_url(frame)?;
        let Some(hand) = self.detector.detect(&image).await? else {
            return Ok(Detection::nothing());
        };
        Ok(Detection {
            gesture: gesture_from_fingers(&hand.fingers),
            landmarks: hand.landmarks,
            bbox: hand.bbox,
        })
    }
}
