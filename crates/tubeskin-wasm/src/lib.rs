//! Tubeskin WASM - browser front end for the custom YouTube skin
//!
//! Routes the current location to a view and mounts it:
//! - `/` - identifier intake form
//! - `/player/{id}` - skinned player
//! - `/player` - "Invalid video ID"
//! - anything else - not found
//!
//! ## Page setup
//!
//! ```html
//! <div id="app"></div>
//! <script type="application/json" id="tubeskin-config">
//!   { "hover_hide_delay_ms": 1500 }
//! </script>
//! <script type="module">
//!   import init from './tubeskin_wasm.js';
//!   await init();
//! </script>
//! ```

use anyhow::{Context, Result};
use std::cell::RefCell;
use tracing::{error, info, warn};
use tubeskin_core::theme::classes;
use tubeskin_core::{Route, SkinTheme, ViewConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, PageTransitionEvent};

mod dom;
mod home;
mod loader;
mod player_view;
mod youtube;

pub use home::LocationNavigator;
pub use player_view::PlayerView;

use dom::{JsResultExt, Listener};
use home::HomeView;

/// Element id holding the optional JSON page configuration
const CONFIG_ELEMENT_ID: &str = "tubeskin-config";
/// Element id the app mounts into; falls back to `<body>`
const MOUNT_ELEMENT_ID: &str = "app";
const STYLE_ELEMENT_ID: &str = "tubeskin-style";

/// Whatever view the current route mounted
enum MountedView {
    Home(HomeView),
    Player(PlayerView),
    Message(Element),
}

impl MountedView {
    fn unmount(self) {
        match self {
            MountedView::Home(view) => view.unmount(),
            MountedView::Player(view) => view.unmount(),
            MountedView::Message(el) => el.remove(),
        }
    }
}

struct App {
    view: Option<MountedView>,
    _page_events: Vec<Listener>,
}

thread_local! {
    static APP: RefCell<App> = const {
        RefCell::new(App {
            view: None,
            _page_events: Vec::new(),
        })
    };
}

/// Initialize the WASM module and mount the view for the current URL
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tubeskin_core::init();

    boot().map_err(|err| {
        error!(error = %err, "Failed to start");
        JsValue::from_str(&format!("{:#}", err))
    })
}

fn boot() -> Result<()> {
    let window = dom::window()?;
    inject_stylesheet(&dom::document()?)?;
    mount_current()?;

    let pagehide = Listener::new(&window, "pagehide", |_: Event| unmount())?;
    let pageshow = Listener::new(&window, "pageshow", |event: Event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(|e| e.persisted());
        let mounted = APP.with(|app| app.borrow().view.is_some());
        if needs_remount(persisted, mounted) {
            info!("Page restored from back/forward cache, remounting");
            if let Err(err) = mount_current() {
                error!(error = %err, "Failed to remount");
            }
        }
    })?;
    APP.with(|app| app.borrow_mut()._page_events = vec![pagehide, pageshow]);
    Ok(())
}

/// Mount the view for the current location, replacing any mounted one
fn mount_current() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;
    let config = load_config(&document);

    let path = window.location().pathname().js_context("read pathname")?;
    let route = Route::parse(&path);
    info!(path = %path, route = %route, "Routing");

    let parent = mount_point(&document)?;
    let view = mount(&document, &parent, route, config)?;

    let previous = APP.with(|app| app.borrow_mut().view.replace(view));
    if let Some(previous) = previous {
        previous.unmount();
    }
    Ok(())
}

/// `pagehide` tears every view down. A page the back/forward cache restores
/// runs no startup code, so it needs its view mounted again.
fn needs_remount(persisted: bool, mounted: bool) -> bool {
    persisted && !mounted
}

/// Tear down the mounted view. Safe to call more than once.
#[wasm_bindgen]
pub fn unmount() {
    let view = APP.with(|app| app.borrow_mut().view.take());
    if let Some(view) = view {
        info!("Unmounting view");
        view.unmount();
    }
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    tubeskin_core::VERSION.to_string()
}

/// Page config, or defaults when absent or invalid
fn load_config(document: &Document) -> ViewConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return ViewConfig::default();
    };

    match ViewConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            warn!(code = err.error_code(), error = %err, "Ignoring page config");
            ViewConfig::default()
        }
    }
}

fn inject_stylesheet(document: &Document) -> Result<()> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style").js_context("create style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(&SkinTheme::default().to_css()));
    let head = document.head().context("document has no <head>")?;
    head.append_child(&style).js_context("append style")?;
    Ok(())
}

fn mount_point(document: &Document) -> Result<Element> {
    if let Some(el) = document.get_element_by_id(MOUNT_ELEMENT_ID) {
        return Ok(el);
    }
    document
        .body()
        .map(Element::from)
        .context("document has no <body>")
}

fn mount(document: &Document, parent: &Element, route: Route, config: ViewConfig) -> Result<MountedView> {
    match route {
        Route::Home => Ok(MountedView::Home(HomeView::mount(parent)?)),
        Route::Player { video_id } => Ok(MountedView::Player(PlayerView::mount(
            parent, video_id, config,
        )?)),
        Route::MissingVideo => {
            let el = message_page(document, parent, &tubeskin_core::Error::MissingVideoId.to_string())?;
            Ok(MountedView::Message(el))
        }
        Route::NotFound { path } => {
            let el = message_page(document, parent, &format!("Nothing at {}", path))?;
            let link = document.create_element("a").js_context("create link")?;
            link.set_attribute("href", &Route::Home.to_path())
                .js_context("link href")?;
            link.set_text_content(Some("Back to start"));
            el.append_child(&link).js_context("append link")?;
            Ok(MountedView::Message(el))
        }
    }
}

fn message_page(document: &Document, parent: &Element, text: &str) -> Result<Element> {
    let page = dom::element(document, "main", classes::HOME, None)?;
    let message = dom::element(document, "p", classes::MESSAGE, Some(text))?;
    page.append_child(&message).js_context("append message")?;
    parent.append_child(&page).js_context("mount message")?;
    Ok(page.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_restore_remounts_torn_down_view() {
        assert!(needs_remount(true, false));
    }

    #[test]
    fn test_fresh_load_or_live_view_does_not_remount() {
        assert!(!needs_remount(false, false));
        assert!(!needs_remount(true, true));
        assert!(!needs_remount(false, true));
    }
}
