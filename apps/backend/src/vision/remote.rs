//! Hand detector reached over HTTP.
//!
//! The image bytes are POSTed as the request body. The service answers with
//! the hand list shape produced by common hand-tracking libraries:
//!
//! ```json
//! {"hands": [{"fingers": [0, 1, 1, 0, 0], "lmList": [[x, y, z], ...], "bbox": [x, y, w, h]}]}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;

use super::{BoundingBox, DecodedImage, Hand, HandDetector, Landmark, VisionError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct DetectorResponse {
    #[serde(default)]
    hands: Vec<RawHand>,
}

#[derive(Debug, Deserialize)]
struct RawHand {
    fingers: Vec<u8>,
    #[serde(default, rename = "lmList")]
    landmarks: Vec<Landmark>,
    #[serde(default)]
    bbox: Option<BoundingBox>,
}

impl TryFrom<RawHand> for Hand {
    type Error = VisionError;

    fn try_from(raw: RawHand) -> Result<Self, Self::Error> {
        let flags: [u8; 5] = raw.fingers.as_slice().try_into().map_err(|_| {
            VisionError::Detector(format!(
                "expected 5 finger flags, got {}",
                raw.fingers.len()
            ))
        })?;
        Ok(Hand {
            fingers: flags.map(|f| f != 0),
            landmarks: raw.landmarks,
            bbox: raw.bbox,
        })
    }
}

pub struct RemoteHandDetector {
    client: reqwest::Client,
    url: String,
}

impl RemoteHandDetector {
    pub fn new(url: impl Into<String>) -> Result<Self, VisionError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl HandDetector for RemoteHandDetector {
    async fn detect(&self, image: &DecodedImage) -> Result<Option<Hand>, VisionError> {
        let mime = image.mime.as_deref().unwrap_or("application/octet-stream");
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, mime)
            .body(image.bytes.clone())
            .send()
            .await?
            .error_for_status()?;

        let body: DetectorResponse = response.json().await?;
        debug!(hands = body.hands.len(), "hand detector responded");
        body.hands.into_iter().next().map(Hand::try_from).transpose()
    }
}
