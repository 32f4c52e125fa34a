//! Home view - the identifier intake form

use crate::dom::{self, JsResultExt, Listener};
use anyhow::Result;
use tracing::error;
use tubeskin_core::intake;
use tubeskin_core::theme::classes;
use tubeskin_core::{Navigator, Route};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement, Node};

/// Navigates by assigning `window.location`
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, route: &Route) {
        let result = dom::window().and_then(|w| {
            w.location()
                .set_href(&route.to_path())
                .js_context("set location")
        });
        if let Err(err) = result {
            error!(route = %route, error = %err, "Navigation failed");
        }
    }
}

/// Mounted intake form
pub struct HomeView {
    root: HtmlElement,
    _submit: Listener,
}

impl HomeView {
    pub fn mount(parent: &Element) -> Result<Self> {
        let doc = dom::document()?;

        let root = dom::element(&doc, "main", classes::HOME, None)?;
        let form = dom::element(&doc, "form", classes::FORM, None)?;
        let label = dom::element(&doc, "label", classes::LABEL, Some("YouTube VideoId"))?;
        label.set_attribute("for", "ts-video-id").js_context("label for")?;

        let input = doc
            .create_element("input")
            .js_context("create input")?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| anyhow::anyhow!("<input> is not an HtmlInputElement"))?;
        input.set_id("ts-video-id");
        input.set_class_name(classes::INPUT);
        input.set_type("text");
        input.set_placeholder("Enter YouTube Video id");

        let submit = dom::element(&doc, "button", classes::SUBMIT, Some("Submit"))?;
        submit.set_attribute("type", "submit").js_context("button type")?;

        let fields: [&Node; 3] = [&label, &input, &submit];
        for child in fields {
            form.append_child(child).js_context("append form field")?;
        }
        root.append_child(&form).js_context("append form")?;
        parent.append_child(&root).js_context("mount home view")?;

        let listener = Listener::new(&form, "submit", move |event: Event| {
            event.prevent_default();
            intake::submit(&input.value(), &LocationNavigator);
        })?;

        Ok(Self {
            root,
            _submit: listener,
        })
    }

    pub fn unmount(self) {
        self.root.remove();
    }
}
