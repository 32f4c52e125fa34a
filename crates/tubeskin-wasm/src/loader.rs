//! One-time loading of the embed API bootstrap script
//!
//! The bootstrap script announces readiness by calling the global
//! `onYouTubeIframeAPIReady`. Every player view awaits the same
//! process-wide [`ReadyGate`], so the script is injected at most once per
//! successful load.

use crate::{dom, youtube};
use futures_channel::oneshot;
use js_sys::Reflect;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};
use tubeskin_core::{Error, ReadyGate, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlScriptElement};

/// Global callback name the bootstrap script invokes
const READY_CALLBACK: &str = "onYouTubeIframeAPIReady";

static EMBED_API: ReadyGate = ReadyGate::new();

/// Resolve once the embed API is usable, loading it on first call
pub async fn ensure_embed_api(src: &str) -> Result<()> {
    let src = src.to_string();
    EMBED_API.ready(move || load_script(src)).await
}

type Signal = Rc<RefCell<Option<oneshot::Sender<std::result::Result<(), String>>>>>;

fn fire(signal: &Signal, outcome: std::result::Result<(), String>) {
    if let Some(tx) = signal.borrow_mut().take() {
        let _ = tx.send(outcome);
    }
}

async fn load_script(src: String) -> Result<()> {
    if youtube::api_present() {
        debug!("Embed API already on the page");
        return Ok(());
    }

    let window = dom::window().map_err(|e| Error::api_load(e.to_string()))?;
    let document = dom::document().map_err(|e| Error::api_load(e.to_string()))?;

    let (tx, rx) = oneshot::channel();
    let signal: Signal = Rc::new(RefCell::new(Some(tx)));

    let on_ready = Closure::<dyn FnMut()>::new({
        let signal = signal.clone();
        move || fire(&signal, Ok(()))
    });
    let on_error = Closure::<dyn FnMut(Event)>::new({
        let signal = signal.clone();
        move |_: Event| fire(&signal, Err("bootstrap script failed to load".to_string()))
    });

    Reflect::set(&window, &JsValue::from_str(READY_CALLBACK), on_ready.as_ref())
        .map_err(|e| Error::api_load(format!("install ready callback: {:?}", e)))?;

    let script = document
        .create_element("script")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
        .ok_or_else(|| Error::api_load("cannot create <script>"))?;
    script.set_src(&src);
    script.set_async(true);
    script.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let first_script = document.get_elements_by_tag_name("script").item(0);
    let inserted = match first_script.as_ref().and_then(|s| s.parent_node()) {
        Some(parent) => parent.insert_before(&script, first_script.as_deref()),
        None => match document.head() {
            Some(head) => head.append_child(&script),
            None => Err(JsValue::from_str("document has no <head>")),
        },
    };
    inserted.map_err(|e| Error::api_load(format!("insert script: {:?}", e)))?;
    info!(src = %src, "Embed API script injected");

    let outcome = rx.await;

    // The callbacks are about to be dropped; unhook them first
    let _ = Reflect::set(&window, &JsValue::from_str(READY_CALLBACK), &JsValue::UNDEFINED);
    script.set_onerror(None);
    drop(on_ready);
    drop(on_error);

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(msg)) => {
            script.remove();
            Err(Error::api_load(msg))
        }
        Err(_) => Err(Error::api_load("ready signal dropped")),
    }
}
