//! Wire schema shared between the vision client and the analysis backend.
//!
//! This crate owns the JSON payloads of the `/analyze` endpoint and of the
//! realtime channel, plus the Engine.IO / Socket.IO text codec used to carry
//! channel events over a plain WebSocket.

pub mod socket_io;

use serde::{Deserialize, Serialize};

pub use socket_io::{
    ChannelSignal, ClientEvent, CodecError, Connection, EnginePacket, Handshake, Received, ServerEvent,
    SocketMessage, SocketPacket,
};

/// Kind of media an analysis was produced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A single uploaded still image.
    Image,
    /// An uploaded video clip.
    Video,
    /// A frame pushed from the live camera stream.
    Stream,
}

impl MediaKind {
    /// Lowercase label as it appears on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Stream => "stream",
        }
    }
}

/// Successful `/analyze` response body. Also pushed as `analysis_result`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Processed image reference (usually a `data:` URL).
    pub image: Option<String>,
    /// Processed video reference (usually a `data:` URL).
    pub video: Option<String>,
    #[serde(default)]
    pub faces_detected: u32,
    pub emotion: Option<String>,
    pub confidence: Option<f64>,
    pub blink_count: Option<u32>,
    pub file_type: MediaKind,
}

impl AnalysisResponse {
    /// The processed media reference, preferring the image over the video.
    #[must_use]
    pub fn media_ref(&self) -> Option<&str> {
        self.image.as_deref().or(self.video.as_deref())
    }

    /// Detection metadata normalized for display.
    #[must_use]
    pub fn to_result(&self) -> AnalysisResult {
        AnalysisResult {
            faces_detected: self.faces_detected,
            emotion: self.emotion.clone(),
            confidence: normalize_confidence(self.confidence),
            blink_count: self.blink_count,
            kind: self.file_type,
        }
    }
}

/// Failure body of a non-2xx `/analyze` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// A `processed_frame` push from the live stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFrame {
    /// Annotated frame reference (usually a `data:` URL).
    pub image: String,
    #[serde(default)]
    pub faces_detected: u32,
    pub emotion: Option<String>,
    pub confidence: Option<f64>,
    pub blink_count: Option<u32>,
}

impl ProcessedFrame {
    /// Detection metadata for this frame, tagged as [`MediaKind::Stream`].
    #[must_use]
    pub fn to_result(&self) -> AnalysisResult {
        AnalysisResult {
            faces_detected: self.faces_detected,
            emotion: self.emotion.clone(),
            confidence: normalize_confidence(self.confidence),
            blink_count: self.blink_count,
            kind: MediaKind::Stream,
        }
    }
}

/// Detection metadata rendered next to an image, video or live frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub faces_detected: u32,
    pub emotion: Option<String>,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: Option<f64>,
    pub blink_count: Option<u32>,
    pub kind: MediaKind,
}

/// A `stream_status` push.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStatus {
    pub status: StatusKind,
    #[serde(default)]
    pub message: String,
}

/// Status values carried by `stream_status`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusKind {
    Ok,
    Error,
    /// The server acknowledged `stop_stream`.
    Stopped,
    Other(String),
}

impl From<String> for StatusKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ok" => Self::Ok,
            "error" => Self::Error,
            "stopped" => Self::Stopped,
            _ => Self::Other(value),
        }
    }
}

impl From<StatusKind> for String {
    fn from(value: StatusKind) -> Self {
        match value {
            StatusKind::Ok => "ok".to_owned(),
            StatusKind::Error => "error".to_owned(),
            StatusKind::Stopped => "stopped".to_owned(),
            StatusKind::Other(other) => other,
        }
    }
}

fn normalize_confidence(value: Option<f64>) -> Option<f64> {
    value.filter(|c| c.is_finite()).map(|c| c.clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
