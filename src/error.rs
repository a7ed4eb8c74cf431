//! Error types.

use thiserror::Error;

/// Result type for generative API calls.
pub type GenAiResult<T> = Result<T, GenAiError>;

/// Errors from the Gemini REST client.
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("API key missing for Veo generation")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenAiError {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

/// Why a dropped file was not accepted as the source.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputRejection {
    #[error("Please upload a video file ({name} is {mime})")]
    NotAVideo { name: String, mime: String },
}

/// Handing a media URI to the system player failed.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Playback prevented: {0}")]
    Launch(#[from] std::io::Error),
}
