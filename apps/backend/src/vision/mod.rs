//! Gesture recognition boundary.
//!
//! The game never looks at pixels. A [`GestureClassifier`] turns the latest
//! client [`Frame`] into a [`Detection`]; everything behind that trait (image
//! decoding, hand tracking) is a replaceable collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Move;

pub mod data_url;
pub mod fingers;
pub mod remote;
pub mod scripted;

pub use data_url::{decode_data_url, DecodedImage};
pub use fingers::{gesture_from_fingers, FingerGestureClassifier, FingerState, Hand, HandDetector};
pub use remote::RemoteHandDetector;
pub use scripted::{BlindClassifier, LabeledFrameClassifier, Script, ScriptedClassifier};

/// One landmark point `[x, y, z]` as reported by the hand tracker.
pub type Landmark = [f32; 3];

/// Hand bounding box `[x, y, width, height]`.
pub type BoundingBox = [f32; 4];

/// Encoded image exactly as the client sent it (usually a data URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(String);

impl Frame {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What the classifier saw in a frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Recognised move, `None` when no hand or no known gesture was found.
    pub gesture: Option<Move>,
    pub landmarks: Vec<Landmark>,
    pub bbox: Option<BoundingBox>,
}

impl Detection {
    pub fn nothing() -> Self {
        Self::default()
    }

    pub fn gesture(mv: Move) -> Self {
        Self {
            gesture: Some(mv),
            ..Self::default()
        }
    }
}

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
    #[error("frame payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("hand detector failed: {0}")]
    Detector(String),
    #[error("hand detector unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Maps a frame to a move plus auxiliary landmark data.
///
/// Implementations must not mutate game state; they may be shared by every
/// session in the process.
#[async_trait]
pub trait GestureClassifier: Send + Sync {
    async fn classify(&self, frame: &Frame) -> Result<Detection, VisionError>;
}
