//! `data:<mime>;base64,<payload>` frame decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{Frame, VisionError};

/// Raw image bytes pulled out of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Decode the base64 payload after the first comma of a data URL.
pub fn decode_data_url(frame: &Frame) -> Result<DecodedImage, VisionError> {
    let (header, payload) = frame
        .as_str()
        .split_once(',')
        .ok_or_else(|| VisionError::MalformedFrame("missing data URL separator".to_string()))?;

    let mime = header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    let bytes = STANDARD.decode(payload.trim())?;
    if bytes.is_empty() {
        return Err(VisionError::MalformedFrame("empty image payload".to_string()));
    }

    Ok(DecodedImage { mime, bytes })
}
