//! View configuration and embed construction parameters

use crate::{types::VideoId, Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Bootstrap script of the embed API
pub const DEFAULT_SCRIPT_SRC: &str = "https://www.youtube.com/iframe_api";

/// Delay before the top bar hides after the pointer leaves (ms)
pub const DEFAULT_HOVER_HIDE_DELAY_MS: u32 = 2500;

/// Volume applied when the player becomes ready
pub const DEFAULT_INITIAL_VOLUME: u8 = 100;

/// Embed player variables.
///
/// Defaults switch off everything the custom skin replaces: native controls,
/// related videos, annotations and captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerVars {
    pub autoplay: u8,
    pub controls: u8,
    pub rel: u8,
    pub showinfo: u8,
    pub fs: u8,
    pub iv_load_policy: u8,
    pub cc_load_policy: u8,
}

impl Default for PlayerVars {
    fn default() -> Self {
        Self {
            autoplay: 0,
            controls: 0,
            rel: 0,
            showinfo: 0,
            fs: 0,
            iv_load_policy: 3,
            cc_load_policy: 0,
        }
    }
}

/// Configuration for a player view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Embed API bootstrap script URL
    pub script_src: String,
    /// Top bar hide delay after pointer leave (ms)
    pub hover_hide_delay_ms: u32,
    /// Volume set on ready (0-100)
    pub initial_volume: u8,
    /// Text shown in the top bar
    pub title: String,
    /// Player variables passed to the embed
    pub player_vars: PlayerVars,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            script_src: DEFAULT_SCRIPT_SRC.to_string(),
            hover_hide_delay_ms: DEFAULT_HOVER_HIDE_DELAY_MS,
            initial_volume: DEFAULT_INITIAL_VOLUME,
            title: "YT Video Player".to_string(),
            player_vars: PlayerVars::default(),
        }
    }
}

impl ViewConfig {
    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.script_url()?;
        if self.initial_volume > 100 {
            return Err(Error::InvalidConfig(format!(
                "initial_volume must be 0-100, got {}",
                self.initial_volume
            )));
        }
        Ok(())
    }

    /// Parsed bootstrap script URL
    pub fn script_url(&self) -> Result<Url> {
        let url = Url::parse(&self.script_src)
            .map_err(|e| Error::InvalidConfig(format!("script_src: {}", e)))?;
        match url.scheme() {
            "https" | "http" => Ok(url),
            other => Err(Error::InvalidConfig(format!(
                "script_src must be http(s), got {}",
                other
            ))),
        }
    }

    pub fn hover_hide_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(u64::from(self.hover_hide_delay_ms))
    }

    /// Construction parameters for one embedded player
    pub fn embed_options(&self, video_id: &VideoId) -> EmbedOptions {
        EmbedOptions {
            height: "100%".to_string(),
            width: "100%".to_string(),
            video_id: video_id.clone(),
            player_vars: self.player_vars.clone(),
        }
    }
}

/// Serializable part of the embed constructor options.
///
/// Callbacks are attached by the front end after serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedOptions {
    pub height: String,
    pub width: String,
    pub video_id: VideoId,
    pub player_vars: PlayerVars,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.hover_hide_delay_ms, 2500);
        assert_eq!(config.initial_volume, 100);
        assert_eq!(config.player_vars.iv_load_policy, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ViewConfig::from_json(r#"{"hover_hide_delay_ms": 1000}"#).unwrap();
        assert_eq!(config.hover_hide_delay_ms, 1000);
        assert_eq!(config.script_src, DEFAULT_SCRIPT_SRC);
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        assert!(ViewConfig::from_json(r#"{"autoplay": true}"#).is_err());
    }

    #[test]
    fn test_invalid_volume() {
        let err = ViewConfig::from_json(r#"{"initial_volume": 150}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_script_scheme() {
        let config = ViewConfig {
            script_src: "ftp://example.com/api.js".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_embed_options_json() {
        let options = ViewConfig::default().embed_options(&VideoId::new("abc123"));
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["videoId"], "abc123");
        assert_eq!(json["height"], "100%");
        assert_eq!(json["playerVars"]["controls"], 0);
        assert_eq!(json["playerVars"]["rel"], 0);
        assert_eq!(json["playerVars"]["iv_load_policy"], 3);
        assert_eq!(json["playerVars"]["cc_load_policy"], 0);
    }
}
