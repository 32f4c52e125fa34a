//! DOM helpers shared by the views

use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use tubeskin_core::theme::classes;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

/// Convert a JS exception into an `anyhow` error with context
pub trait JsResultExt<T> {
    fn js_context(self, context: &'static str) -> Result<T>;
}

impl<T> JsResultExt<T> for std::result::Result<T, JsValue> {
    fn js_context(self, context: &'static str) -> Result<T> {
        self.map_err(|err| anyhow!("{}: {:?}", context, err))
    }
}

pub fn window() -> Result<Window> {
    web_sys::window().context("no global window")
}

pub fn document() -> Result<Document> {
    window()?.document().context("window has no document")
}

/// Create an element with a class and optional text
pub fn element(doc: &Document, tag: &str, class: &str, text: Option<&str>) -> Result<HtmlElement> {
    let el = doc
        .create_element(tag)
        .js_context("create element")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow!("<{}> is not an HtmlElement", tag))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

/// Toggle display via the hidden class
pub fn set_shown(el: &Element, shown: bool) {
    let _ = el.class_list().toggle_with_force(classes::HIDDEN, !shown);
}

/// Toggle opacity via the faded class
pub fn set_faded(el: &Element, faded: bool) {
    let _ = el.class_list().toggle_with_force(classes::FADED, faded);
}

/// Monotonic time since page load
pub fn now() -> Duration {
    let ms = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

/// DOM event listener that unregisters itself on drop
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .js_context("add event listener")?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}
