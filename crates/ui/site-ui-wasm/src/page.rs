//! `Page` and `Scheduler` over the real browser document.

use std::time::Duration;

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use site_ui_core::{Page, Result, Scheduler, UiError};

pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| UiError::host("no global `window`"))?;
        let document = window
            .document()
            .ok_or_else(|| UiError::host("window has no document"))?;
        Ok(Self { window, document })
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn html(node: &Element) -> Option<&HtmlElement> {
    node.dyn_ref::<HtmlElement>()
}

impl Page for WebPage {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        html(node)
            .and_then(|el| el.style().get_property_value(property).ok())
            .filter(|v| !v.is_empty())
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = html(node) {
            let _ = el.style().set_property(property, value);
        }
    }

    fn remove_style(&self, node: &Element, property: &str) {
        if let Some(el) = html(node) {
            let _ = el.style().remove_property(property);
        }
    }

    fn is_hidden(&self, node: &Element) -> bool {
        html(node).is_some_and(|el| el.hidden())
    }

    fn set_hidden(&self, node: &Element, hidden: bool) {
        if let Some(el) = html(node) {
            el.set_hidden(hidden);
        }
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let list = node.children();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn append_children(&self, parent: &Element, children: &[Element]) {
        let fragment = self.document.create_document_fragment();
        for child in children {
            let _ = fragment.append_child(child);
        }
        let _ = parent.append_child(&fragment);
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn matches_min_width(&self, px: u32) -> bool {
        self.window
            .match_media(&format!("(min-width: {px}px)"))
            .ok()
            .flatten()
            .is_some_and(|mq| mq.matches())
    }
}

impl Scheduler for WebPage {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task)
    }

    fn cancel(&self, handle: Timeout) {
        // Dropping a Timeout clears it.
        drop(handle);
    }
}
