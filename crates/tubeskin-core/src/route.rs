//! Path routing between the intake form and the player view
//!
//! | Path | Route |
//! |---|---|
//! | `/` | [`Route::Home`] |
//! | `/player/{id}` | [`Route::Player`] |
//! | `/player`, `/player/` | [`Route::MissingVideo`] |
//! | anything else | [`Route::NotFound`] |

use crate::types::VideoId;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Prefix of the player route
pub const PLAYER_PREFIX: &str = "player";

/// Characters escaped when the identifier becomes one path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Identifier intake form
    Home,
    /// Player view for one video
    Player { video_id: VideoId },
    /// Player route without an identifier
    MissingVideo,
    /// No view for this path
    NotFound { path: String },
}

impl Route {
    /// Resolve a location path. Query and fragment must already be stripped.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Route::Home;
        }

        let mut segments = trimmed.splitn(2, '/');
        match (segments.next(), segments.next()) {
            (Some(PLAYER_PREFIX), None) => Route::MissingVideo,
            (Some(PLAYER_PREFIX), Some(raw)) if !raw.contains('/') => {
                let decoded = percent_decode_str(raw).decode_utf8_lossy();
                if decoded.is_empty() {
                    Route::MissingVideo
                } else {
                    Route::Player {
                        video_id: VideoId::new(decoded.into_owned()),
                    }
                }
            }
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    pub fn player(video_id: VideoId) -> Self {
        Route::Player { video_id }
    }

    /// Location path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Player { video_id } => format!(
                "/{}/{}",
                PLAYER_PREFIX,
                utf8_percent_encode(video_id.as_str(), SEGMENT)
            ),
            Route::MissingVideo => format!("/{}/", PLAYER_PREFIX),
            Route::NotFound { path } => path.clone(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_home() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn test_parse_player() {
        assert_eq!(
            Route::parse("/player/abc123"),
            Route::player(VideoId::new("abc123"))
        );
        assert_eq!(
            Route::parse("/player/abc123/"),
            Route::player(VideoId::new("abc123"))
        );
    }

    #[test]
    fn test_parse_missing_video() {
        assert_eq!(Route::parse("/player"), Route::MissingVideo);
        assert_eq!(Route::parse("/player/"), Route::MissingVideo);
    }

    #[test]
    fn test_parse_not_found() {
        assert!(matches!(Route::parse("/settings"), Route::NotFound { .. }));
        assert!(matches!(Route::parse("/player/a/b"), Route::NotFound { .. }));
    }

    #[test]
    fn test_identifier_with_reserved_characters() {
        let route = Route::player(VideoId::new("a/b c?d#e%f"));
        let path = route.to_path();
        assert_eq!(path, "/player/a%2Fb%20c%3Fd%23e%25f");
        assert_eq!(Route::parse(&path), route);
    }
}
