//! Player view - custom skin around one embedded player
//!
//! Builds the DOM, wires pointer and click handlers to the
//! [`PlaybackController`], and re-renders from a [`ViewModel`] after every
//! change. Background work (the per-frame progress loop and the hover-hide
//! timeout) is tied to the controller's mount scope and stops on unmount.

use crate::dom::{self, JsResultExt, Listener};
use crate::loader;
use crate::youtube::{self, EmbedCallbacks, YoutubePlayer};
use anyhow::Result;
use gloo_timers::future::TimeoutFuture;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use tubeskin_core::theme::classes;
use tubeskin_core::{EmbedError, PlayGlyph, PlaybackController, VideoId, ViewConfig, ViewModel};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent};

type Shared = Rc<RefCell<ViewState>>;
type WeakShared = Weak<RefCell<ViewState>>;

/// Elements the view updates after mount
struct Elements {
    root: HtmlElement,
    embed: HtmlElement,
    thumbnail: HtmlElement,
    top_bar: HtmlElement,
    overlay: HtmlElement,
    center: HtmlElement,
    spinner: HtmlElement,
    play_button: HtmlElement,
    controls: HtmlElement,
    play_pause: HtmlElement,
    mute: HtmlElement,
    progress: HtmlElement,
    progress_fill: HtmlElement,
    time: HtmlElement,
    message: HtmlElement,
}

impl Elements {
    fn build(title: &str) -> Result<Self> {
        let doc = dom::document()?;
        let el = |tag: &str, class: &str, text: Option<&str>| dom::element(&doc, tag, class, text);

        let root = el("main", classes::PAGE, None)?;
        let container = el("div", classes::CONTAINER, None)?;
        let embed = el("div", classes::EMBED, None)?;
        // The embed replaces its target element; give it a child to replace
        let target = el("div", "", None)?;
        embed.append_child(&target).js_context("append embed target")?;

        let thumbnail = el("div", classes::THUMBNAIL, None)?;
        let overlay = el("div", classes::OVERLAY, None)?;
        let center = el("div", classes::CENTER, None)?;
        let spinner = el("div", classes::SPINNER, None)?;
        let play_button = el("button", classes::PLAY, None)?;
        play_button.set_attribute("aria-label", "Play").js_context("set aria-label")?;
        center.append_child(&spinner).js_context("append spinner")?;
        center.append_child(&play_button).js_context("append play button")?;

        let top_bar = el("div", classes::TOP_BAR, Some(title))?;
        let message = el("p", classes::MESSAGE, None)?;
        top_bar.append_child(&message).js_context("append message")?;

        let controls = el("div", classes::CONTROLS, None)?;
        let play_pause = el("button", classes::BUTTON, None)?;
        let mute = el("button", classes::BUTTON, None)?;
        let progress = el("div", classes::PROGRESS, None)?;
        let progress_fill = el("div", classes::PROGRESS_FILL, None)?;
        let time = el("span", classes::TIME, None)?;
        progress.append_child(&progress_fill).js_context("append progress fill")?;
        for child in [&play_pause, &mute, &progress, &time] {
            controls.append_child(child).js_context("append control")?;
        }

        for child in [&embed, &overlay, &thumbnail, &center, &top_bar, &controls] {
            container.append_child(child).js_context("append layer")?;
        }
        root.append_child(&container).js_context("append container")?;

        Ok(Self {
            root,
            embed,
            thumbnail,
            top_bar,
            overlay,
            center,
            spinner,
            play_button,
            controls,
            play_pause,
            mute,
            progress,
            progress_fill,
            time,
            message,
        })
    }

    fn container(&self) -> Option<Element> {
        self.root.first_element_child()
    }

    fn embed_target(&self) -> Option<HtmlElement> {
        self.embed
            .first_element_child()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn apply(&self, view: &ViewModel) {
        dom::set_shown(&self.spinner, view.spinner_visible);
        dom::set_shown(&self.play_button, view.play_button_visible);
        self.play_button.set_text_content(Some(PlayGlyph::Play.symbol()));
        dom::set_shown(&self.thumbnail, view.thumbnail_visible);
        dom::set_shown(&self.overlay, view.overlay_visible);
        dom::set_shown(&self.center, view.overlay_visible);
        dom::set_faded(&self.top_bar, !view.top_bar_visible);
        dom::set_faded(&self.controls, !view.controls_visible);

        self.play_pause.set_text_content(Some(view.play_glyph.symbol()));
        let _ = self.play_pause.set_attribute("aria-label", view.play_glyph.label());
        self.mute.set_text_content(Some(view.volume_glyph.symbol()));
        let _ = self.mute.set_attribute("aria-label", view.volume_glyph.label());

        let _ = self
            .progress_fill
            .style()
            .set_property("width", &view.progress_width());
        self.time.set_text_content(Some(&view.time_label));

        dom::set_shown(&self.message, view.error_message.is_some());
        self.message.set_text_content(view.error_message);
    }
}

/// Per-frame progress loop built on `requestAnimationFrame`
struct FrameLoop {
    token: CancellationToken,
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl FrameLoop {
    /// Run `tick` every frame until it returns false or the token is cancelled
    fn start<F>(token: CancellationToken, mut tick: F) -> Result<Self>
    where
        F: FnMut() -> bool + 'static,
    {
        let handle = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let closure = Closure::<dyn FnMut(f64)>::new({
            let token = token.clone();
            let handle = handle.clone();
            let callback = callback.clone();
            move |_timestamp: f64| {
                handle.set(None);
                if token.is_cancelled() || !tick() {
                    // Drop our own closure; it is not referenced by any pending frame
                    let _ = callback.borrow_mut().take();
                    return;
                }
                let next = callback
                    .borrow()
                    .as_ref()
                    .and_then(|cb| request_frame(cb.as_ref().unchecked_ref()).ok());
                handle.set(next);
            }
        });

        let id = request_frame(closure.as_ref().unchecked_ref())?;
        handle.set(Some(id));
        *callback.borrow_mut() = Some(closure);

        Ok(Self {
            token,
            handle,
            callback,
        })
    }

    fn stop(&self) {
        self.token.cancel();
        if let Some(id) = self.handle.take() {
            if let Ok(window) = dom::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(callback: &js_sys::Function) -> Result<i32> {
    dom::window()?
        .request_animation_frame(callback)
        .js_context("requestAnimationFrame")
}

/// Mutable state behind the view's handlers
struct ViewState {
    controller: PlaybackController<YoutubePlayer>,
    elements: Elements,
    callbacks: Option<EmbedCallbacks>,
    listeners: Vec<Listener>,
    frame_loop: Option<FrameLoop>,
    hide_token: Option<CancellationToken>,
}

impl ViewState {
    fn render(&self) {
        self.elements.apply(&ViewModel::from_controller(&self.controller));
    }

    fn start_polling(&mut self, weak: WeakShared) {
        let token = self.controller.poll_token();
        let tick = move || {
            let Some(state) = weak.upgrade() else {
                return false;
            };
            let Ok(mut state) = state.try_borrow_mut() else {
                // Another handler holds the state; try again next frame
                return true;
            };
            if state.controller.poll_progress().is_some() {
                state.render();
            }
            state.controller.is_mounted()
        };

        match FrameLoop::start(token, tick) {
            Ok(frame_loop) => self.frame_loop = Some(frame_loop),
            Err(err) => error!(error = %err, "Failed to start progress polling"),
        }
    }

    /// Hide the top bar once `delay` has passed, replacing any pending hide
    fn arm_hide(&mut self, weak: WeakShared, delay: Duration) {
        self.cancel_hide();
        let token = self.controller.timer_token();
        self.hide_token = Some(token.clone());
        wasm_bindgen_futures::spawn_local(hide_after(weak, token, delay));
    }

    fn cancel_hide(&mut self) {
        if let Some(token) = self.hide_token.take() {
            token.cancel();
        }
    }

    /// Show the failure in place of the spinner
    fn fail(&mut self) {
        self.controller.on_error(EmbedError::Unknown(-1));
        self.render();
    }

    fn teardown(&mut self) {
        self.cancel_hide();
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.stop();
        }
        self.controller.unmount();
        self.callbacks.take();
        self.listeners.clear();
        self.elements.root.remove();
    }
}

/// Handle to a mounted player view
pub struct PlayerView {
    state: Shared,
}

impl PlayerView {
    /// Build the view under `parent` and start loading the embed
    pub fn mount(parent: &Element, video_id: VideoId, config: ViewConfig) -> Result<Self> {
        let elements = Elements::build(&config.title)?;
        parent
            .append_child(&elements.root)
            .js_context("mount player view")?;

        let script_src = config.script_src.clone();
        let controller = PlaybackController::new(video_id, config);

        let state: Shared = Rc::new(RefCell::new(ViewState {
            controller,
            elements,
            callbacks: None,
            listeners: Vec::new(),
            frame_loop: None,
            hide_token: None,
        }));

        let listeners = wire_listeners(&state)?;
        {
            let mut s = state.borrow_mut();
            s.listeners = listeners;
            s.render();
        }

        let weak = Rc::downgrade(&state);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = loader::ensure_embed_api(&script_src).await {
                error!(code = err.error_code(), error = %err, "Embed API unavailable");
                if let Some(state) = weak.upgrade() {
                    let mut s = state.borrow_mut();
                    if s.controller.is_mounted() {
                        s.fail();
                    }
                }
                return;
            }
            if let Err(err) = construct_player(&weak) {
                error!(error = %err, "Failed to construct embedded player");
                if let Some(state) = weak.upgrade() {
                    let mut s = state.borrow_mut();
                    if s.controller.is_mounted() {
                        s.fail();
                    }
                }
            }
        });

        Ok(Self { state })
    }

    /// Stop polling and timers, destroy the embed and remove the DOM
    pub fn unmount(self) {
        self.state.borrow_mut().teardown();
    }
}

/// Create the embed once the API is ready and bind it to the controller
fn construct_player(weak: &WeakShared) -> Result<()> {
    let Some(state) = weak.upgrade() else {
        debug!("View unmounted before the embed API became ready");
        return Ok(());
    };

    let (target, options) = {
        let s = state.borrow();
        if !s.controller.is_mounted() {
            return Ok(());
        }
        let target = s
            .elements
            .embed_target()
            .ok_or_else(|| anyhow::anyhow!("embed target missing"))?;
        let options = s.controller.config().embed_options(&s.controller.session().video_id);
        (target, options)
    };

    let callbacks = embed_callbacks(weak.clone());
    let player = YoutubePlayer::create(&target, &options, &callbacks)?;

    let mut s = state.borrow_mut();
    s.callbacks = Some(callbacks);
    s.controller.attach(player);
    Ok(())
}

/// Wait out a hover-hide delay.
///
/// Timers may fire slightly before the deadline on the `performance.now()`
/// clock; the remaining shortfall is waited again rather than dropped.
async fn hide_after(weak: WeakShared, token: CancellationToken, mut wait: Duration) {
    loop {
        TimeoutFuture::new(timeout_millis(wait)).await;
        if token.is_cancelled() {
            return;
        }
        let Some(state) = weak.upgrade() else {
            return;
        };
        let mut s = state.borrow_mut();
        let now = dom::now();
        if s.controller.hover_tick(now) {
            s.render();
            return;
        }
        match s.controller.hover_remaining(now) {
            Some(left) => wait = left,
            None => return,
        }
    }
}

/// Whole milliseconds for a timer, rounded up and at least one
fn timeout_millis(wait: Duration) -> u32 {
    let millis = (wait.as_micros() + 999) / 1000;
    u32::try_from(millis).unwrap_or(u32::MAX).max(1)
}

/// Run `f` against the state on a fresh task.
///
/// Embed callbacks may fire from inside a call we made while holding the
/// state borrow; deferring keeps the borrow exclusive.
fn defer<F>(weak: &WeakShared, f: F)
where
    F: FnOnce(&mut ViewState, &WeakShared) + 'static,
{
    let weak = weak.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Some(state) = weak.upgrade() {
            let mut s = state.borrow_mut();
            if s.controller.is_mounted() {
                f(&mut s, &weak);
                s.render();
            }
        }
    });
}

fn embed_callbacks(weak: WeakShared) -> EmbedCallbacks {
    let on_ready = Closure::<dyn FnMut(JsValue)>::new({
        let weak = weak.clone();
        move |_event: JsValue| {
            defer(&weak, |s, _| {
                if let Err(err) = s.controller.on_ready() {
                    warn!(error = %err, "Ready before player attached");
                }
            })
        }
    });

    let on_state_change = Closure::<dyn FnMut(JsValue)>::new({
        let weak = weak.clone();
        move |event: JsValue| {
            let Some(code) = youtube::event_code(&event) else {
                warn!("State change without data");
                return;
            };
            defer(&weak, move |s, weak| {
                if s.controller.on_state_code(code).start_polling {
                    s.start_polling(weak.clone());
                }
            })
        }
    });

    let on_error = Closure::<dyn FnMut(JsValue)>::new({
        move |event: JsValue| {
            let code = youtube::event_code(&event).unwrap_or(-1);
            defer(&weak, move |s, _| s.controller.on_error(EmbedError::from_code(code)))
        }
    });

    EmbedCallbacks {
        on_ready,
        on_state_change,
        on_error,
    }
}

/// Attach a handler that borrows the state mutably and re-renders afterwards
fn on<F>(state: &Shared, target: &HtmlElement, kind: &'static str, mut handler: F) -> Result<Listener>
where
    F: FnMut(&mut ViewState, &WeakShared, &Event) + 'static,
{
    let weak = Rc::downgrade(state);
    Listener::new(target, kind, move |event: Event| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let Ok(mut s) = state.try_borrow_mut() else {
            warn!(kind, "Dropped event while view is busy");
            return;
        };
        if !s.controller.is_mounted() {
            return;
        }
        handler(&mut s, &weak, &event);
        s.render();
    })
}

fn wire_listeners(state: &Shared) -> Result<Vec<Listener>> {
    let (container, thumbnail, overlay, play_pause, mute, progress) = {
        let s = state.borrow();
        let e = &s.elements;
        let container = e
            .container()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| anyhow::anyhow!("player container missing"))?;
        (
            container,
            e.thumbnail.clone(),
            e.overlay.clone(),
            e.play_pause.clone(),
            e.mute.clone(),
            e.progress.clone(),
        )
    };

    let mut listeners = Vec::new();

    listeners.push(on(state, &container, "mouseenter", |s, _, _| {
        s.cancel_hide();
        s.controller.hover_enter();
    })?);

    listeners.push(on(state, &container, "mouseleave", |s, weak, _| {
        let delay = s.controller.hover_leave(dom::now());
        s.arm_hide(weak.clone(), delay);
    })?);

    listeners.push(on(state, &thumbnail, "click", |s, _, _| {
        if let Err(err) = s.controller.click_thumbnail() {
            debug!(error = %err, "Thumbnail click ignored");
        }
    })?);

    for target in [&overlay, &play_pause] {
        listeners.push(on(state, target, "click", |s, _, _| {
            if let Err(err) = s.controller.toggle_play_pause() {
                debug!(error = %err, "Play/pause ignored");
            }
        })?);
    }

    listeners.push(on(state, &mute, "click", |s, _, _| {
        if let Err(err) = s.controller.toggle_mute() {
            debug!(error = %err, "Mute ignored");
        }
    })?);

    listeners.push(on(state, &progress, "click", |s, _, event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let width = f64::from(s.elements.progress.offset_width());
        if let Err(err) = s.controller.seek_click(f64::from(mouse.offset_x()), width) {
            debug!(error = %err, "Seek ignored");
        }
    })?);

    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_millis_rounds_up() {
        assert_eq!(timeout_millis(Duration::from_millis(2500)), 2500);
        assert_eq!(timeout_millis(Duration::from_micros(200)), 1);
        assert_eq!(timeout_millis(Duration::from_micros(1_001)), 2);
        assert_eq!(timeout_millis(Duration::ZERO), 1);
    }
}
