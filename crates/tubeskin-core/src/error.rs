//! Error types for Tubeskin Core

use crate::types::EmbedError;
use thiserror::Error;

/// Result type alias for player-view operations
pub type Result<T> = std::result::Result<T, Error>;

/// Player-view error types
#[derive(Error, Debug)]
pub enum Error {
    // Intake / routing errors
    #[error("Video identifier is empty")]
    EmptyIdentifier,

    #[error("Invalid video ID")]
    MissingVideoId,

    // Embed errors
    #[error("Failed to load embed API: {0}")]
    EmbedApiLoad(String),

    #[error("Embedded player is not ready")]
    PlayerNotReady,

    #[error("Embedded player error: {0}")]
    Embed(EmbedError),

    // Control errors
    #[error("Invalid seek geometry: offset {offset_x}px on a {width}px bar")]
    InvalidSeek { offset_x: f64, width: f64 },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an embed API load error
    pub fn api_load(msg: impl Into<String>) -> Self {
        Error::EmbedApiLoad(msg.into())
    }

    /// Returns true if a later mount may succeed where this one failed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::EmbedApiLoad(_) | Error::PlayerNotReady)
    }

    /// Returns the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::EmptyIdentifier => "EMPTY_IDENTIFIER",
            Error::MissingVideoId => "MISSING_VIDEO_ID",
            Error::EmbedApiLoad(_) => "EMBED_API_LOAD",
            Error::PlayerNotReady => "PLAYER_NOT_READY",
            Error::Embed(_) => "EMBED",
            Error::InvalidSeek { .. } => "INVALID_SEEK",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Json(_) => "JSON",
        }
    }
}

impl From<EmbedError> for Error {
    fn from(err: EmbedError) -> Self {
        Error::Embed(err)
    }
}
