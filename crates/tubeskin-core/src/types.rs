//! Core types for Tubeskin

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one mounted player view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier naming the remote video to load.
///
/// No format validation happens here; whatever the user typed is forwarded
/// to the embedded player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Embedded player state, as reported by its state-change callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// Player created, nothing played yet (-1)
    Unstarted,
    /// Playback reached the end (0)
    Ended,
    /// Content is playing (1)
    Playing,
    /// Playback paused (2)
    Paused,
    /// Waiting for data (3)
    Buffering,
    /// Video cued, not started (5)
    Cued,
}

impl PlayerState {
    /// Map the embed's numeric state code. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(PlayerState::Unstarted),
            0 => Some(PlayerState::Ended),
            1 => Some(PlayerState::Playing),
            2 => Some(PlayerState::Paused),
            3 => Some(PlayerState::Buffering),
            5 => Some(PlayerState::Cued),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            PlayerState::Unstarted => -1,
            PlayerState::Ended => 0,
            PlayerState::Playing => 1,
            PlayerState::Paused => 2,
            PlayerState::Buffering => 3,
            PlayerState::Cued => 5,
        }
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Unstarted => write!(f, "unstarted"),
            PlayerState::Ended => write!(f, "ended"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
            PlayerState::Buffering => write!(f, "buffering"),
            PlayerState::Cued => write!(f, "cued"),
        }
    }
}

/// Errors the embedded player reports through its error callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmbedError {
    /// Request contains an invalid parameter value, e.g. a malformed id (2)
    InvalidParameter,
    /// Content can't be played in the HTML5 player (5)
    Html5,
    /// Video not found or removed (100)
    NotFound,
    /// Owner does not allow embedded playback (101, 150)
    EmbeddingDisabled,
    /// Any code not listed above
    Unknown(i32),
}

impl EmbedError {
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => EmbedError::InvalidParameter,
            5 => EmbedError::Html5,
            100 => EmbedError::NotFound,
            101 | 150 => EmbedError::EmbeddingDisabled,
            other => EmbedError::Unknown(other),
        }
    }

    /// Message shown in place of the video
    pub fn user_message(&self) -> &'static str {
        match self {
            EmbedError::InvalidParameter => "Invalid video ID",
            EmbedError::Html5 => "This video can't be played in the browser",
            EmbedError::NotFound => "Video not found",
            EmbedError::EmbeddingDisabled => "This video can't be embedded",
            EmbedError::Unknown(_) => "The player reported an error",
        }
    }
}

impl std::fmt::Display for EmbedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedError::Unknown(code) => write!(f, "unknown error code {}", code),
            other => f.write_str(other.user_message()),
        }
    }
}

/// UI state of one mounted player view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSession {
    /// Mount this session belongs to
    pub id: SessionId,
    /// Video being played
    pub video_id: VideoId,
    /// Embedded player reports playing
    pub playing: bool,
    /// Current position in seconds
    pub current_time: f64,
    /// Total duration in seconds (0 until known)
    pub duration: f64,
    /// Embedded player reports buffering
    pub buffering: bool,
    /// Audio muted via our control
    pub muted: bool,
    /// Waiting for the embed to become ready
    pub loading: bool,
    /// Pointer is over the player container
    pub hovering: bool,
    /// Click-to-play thumbnail overlay is shown
    pub thumbnail_visible: bool,
    /// One-shot click-to-play listener is armed
    pub thumbnail_armed: bool,
    /// Player has loaded some data; control bar is revealed
    pub controls_revealed: bool,
    /// Progress polling has been started
    pub polling: bool,
    /// Last error reported by the embed
    pub error: Option<EmbedError>,
}

impl PlaybackSession {
    pub fn new(video_id: VideoId) -> Self {
        Self {
            id: SessionId::new(),
            video_id,
            playing: false,
            current_time: 0.0,
            duration: 0.0,
            buffering: false,
            muted: false,
            loading: true,
            hovering: false,
            thumbnail_visible: true,
            thumbnail_armed: false,
            controls_revealed: false,
            polling: false,
            error: None,
        }
    }

    /// Played fraction as a percentage in `[0, 100]`
    pub fn progress_percent(&self) -> f64 {
        if !(self.duration.is_finite() && self.duration > 0.0) || !self.current_time.is_finite() {
            return 0.0;
        }
        (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_state_codes() {
        for state in [
            PlayerState::Unstarted,
            PlayerState::Ended,
            PlayerState::Playing,
            PlayerState::Paused,
            PlayerState::Buffering,
            PlayerState::Cued,
        ] {
            assert_eq!(PlayerState::from_code(state.code()), Some(state));
        }
        assert_eq!(PlayerState::from_code(4), None);
    }

    #[test]
    fn test_embed_error_codes() {
        assert_eq!(EmbedError::from_code(100), EmbedError::NotFound);
        assert_eq!(EmbedError::from_code(101), EmbedError::EmbeddingDisabled);
        assert_eq!(EmbedError::from_code(150), EmbedError::EmbeddingDisabled);
        assert_eq!(EmbedError::from_code(7), EmbedError::Unknown(7));
        assert_eq!(EmbedError::Unknown(7).to_string(), "unknown error code 7");
    }

    #[test]
    fn test_new_session_is_loading() {
        let session = PlaybackSession::new(VideoId::new("abc123"));
        assert!(session.loading);
        assert!(session.thumbnail_visible);
        assert!(!session.playing);
        assert_eq!(session.video_id.as_str(), "abc123");
    }

    #[test]
    fn test_progress_percent() {
        let mut session = PlaybackSession::new(VideoId::new("abc123"));
        assert_eq!(session.progress_percent(), 0.0);

        session.duration = 200.0;
        session.current_time = 50.0;
        assert_eq!(session.progress_percent(), 25.0);

        session.current_time = 250.0;
        assert_eq!(session.progress_percent(), 100.0);
    }

    #[test]
    fn test_empty_video_id() {
        assert!(VideoId::new("").is_empty());
        assert!(!VideoId::new("   ").is_empty());
    }
}
