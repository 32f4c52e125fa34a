//! YouTube IFrame API bindings and the [`PlayerControl`] adapter
//!
//! Every method import uses `catch`: until the iframe has finished loading,
//! `YT.Player` instances lack most of their methods and calling one throws.

use crate::dom::JsResultExt;
use anyhow::Result;
use js_sys::{Object, Reflect};
use tracing::warn;
use tubeskin_core::{EmbedOptions, PlayerControl};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    /// `YT.Player`
    #[wasm_bindgen(js_namespace = YT, js_name = Player)]
    pub type YtPlayer;

    #[wasm_bindgen(catch, constructor, js_namespace = YT, js_class = "Player")]
    fn new(element: &HtmlElement, options: &JsValue) -> std::result::Result<YtPlayer, JsValue>;

    #[wasm_bindgen(catch, method, js_name = playVideo)]
    fn play_video(this: &YtPlayer) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = pauseVideo)]
    fn pause_video(this: &YtPlayer) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, method)]
    fn mute(this: &YtPlayer) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = unMute)]
    fn un_mute(this: &YtPlayer) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = setVolume)]
    fn set_volume(this: &YtPlayer, volume: u8) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = seekTo)]
    fn seek_to(this: &YtPlayer, seconds: f64, allow_seek_ahead: bool) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = getCurrentTime)]
    fn get_current_time(this: &YtPlayer) -> std::result::Result<f64, JsValue>;

    #[wasm_bindgen(catch, method, js_name = getDuration)]
    fn get_duration(this: &YtPlayer) -> std::result::Result<f64, JsValue>;

    #[wasm_bindgen(catch, method, js_name = getVideoLoadedFraction)]
    fn get_video_loaded_fraction(this: &YtPlayer) -> std::result::Result<f64, JsValue>;

    #[wasm_bindgen(catch, method)]
    fn destroy(this: &YtPlayer) -> std::result::Result<(), JsValue>;
}

/// Callbacks handed to the embed; must outlive the player
pub struct EmbedCallbacks {
    pub on_ready: Closure<dyn FnMut(JsValue)>,
    pub on_state_change: Closure<dyn FnMut(JsValue)>,
    pub on_error: Closure<dyn FnMut(JsValue)>,
}

impl EmbedCallbacks {
    fn to_js(&self) -> Result<JsValue> {
        let events = Object::new();
        for (name, callback) in [
            ("onReady", &self.on_ready),
            ("onStateChange", &self.on_state_change),
            ("onError", &self.on_error),
        ] {
            Reflect::set(&events, &JsValue::from_str(name), callback.as_ref())
                .js_context("set embed callback")?;
        }
        Ok(events.into())
    }
}

/// Numeric `data` field of an embed event
pub fn event_code(event: &JsValue) -> Option<i32> {
    Reflect::get(event, &JsValue::from_str("data"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as i32)
}

/// Is `YT.Player` already defined on the page?
pub fn api_present() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    Reflect::get(&window, &JsValue::from_str("YT"))
        .ok()
        .filter(|yt| yt.is_object())
        .and_then(|yt| Reflect::get(&yt, &JsValue::from_str("Player")).ok())
        .map(|player| player.is_function())
        .unwrap_or(false)
}

/// Adapter exposing a `YT.Player` through [`PlayerControl`]
pub struct YoutubePlayer {
    inner: YtPlayer,
}

impl YoutubePlayer {
    /// Construct an embed inside `container`
    pub fn create(
        container: &HtmlElement,
        options: &EmbedOptions,
        callbacks: &EmbedCallbacks,
    ) -> Result<Self> {
        let js_options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| anyhow::anyhow!("serialize embed options: {}", e))?;
        Reflect::set(&js_options, &JsValue::from_str("events"), &callbacks.to_js()?)
            .js_context("attach embed events")?;

        let inner = YtPlayer::new(container, &js_options).js_context("construct YT.Player")?;
        Ok(Self { inner })
    }

    fn call(&self, method: &'static str, result: std::result::Result<(), JsValue>) {
        if let Err(err) = result {
            warn!(method, error = ?err, "Embed call failed");
        }
    }
}

impl PlayerControl for YoutubePlayer {
    fn play(&self) {
        self.call("playVideo", self.inner.play_video());
    }

    fn pause(&self) {
        self.call("pauseVideo", self.inner.pause_video());
    }

    fn mute(&self) {
        self.call("mute", self.inner.mute());
    }

    fn unmute(&self) {
        self.call("unMute", self.inner.un_mute());
    }

    fn set_volume(&self, volume: u8) {
        self.call("setVolume", self.inner.set_volume(volume));
    }

    fn seek_to(&self, seconds: f64) {
        self.call("seekTo", self.inner.seek_to(seconds, true));
    }

    fn current_time(&self) -> f64 {
        self.inner.get_current_time().unwrap_or(0.0)
    }

    fn duration(&self) -> f64 {
        self.inner.get_duration().unwrap_or(0.0)
    }

    fn loaded_fraction(&self) -> f64 {
        self.inner.get_video_loaded_fraction().unwrap_or(0.0)
    }

    fn destroy(&self) {
        self.call("destroy", self.inner.destroy());
    }
}
