//! wasm-bindgen interface for the site UI controller.
//!
//! `boot()` is the usual entry point: it waits for `DOMContentLoaded`,
//! builds the controller and keeps it alive for the page session. `SiteUi`
//! exposes the same controller to scripts that want to drive it.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use log::{warn, LevelFilter};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, Node};

use site_ui_core::{Config, Page, UiController};

mod animation;
mod glide;
mod gsap;
mod logger;
mod page;
mod utils;

pub use animation::WebAnimation;
pub use glide::GlideFactory;
pub use gsap::GsapEngine;
pub use page::WebPage;

use utils::jsvalue_is_undefined_or_null;

type WebController = UiController<WebPage, WebAnimation, GlideFactory>;

thread_local! {
    static ACTIVE: RefCell<Option<SiteUi>> = const { RefCell::new(None) };
}

#[wasm_bindgen]
pub struct SiteUi {
    controller: Rc<WebController>,
    listeners: Vec<EventListener>,
    backend: &'static str,
}

fn parse_config(config: JsValue) -> Result<Config, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        return Ok(Config::default());
    }
    let cfg: Config =
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?;
    cfg.validate().map_err(|e| JsError::new(&e.to_string()))?;
    Ok(cfg)
}

/// The element a click landed on; text-node targets resolve to their parent.
fn target_element(event: &Event) -> Option<Element> {
    let target = event.target()?;
    match target.dyn_into::<Element>() {
        Ok(el) => Some(el),
        Err(other) => other.dyn_into::<Node>().ok()?.parent_element(),
    }
}

fn key_of(event: &Event) -> Option<String> {
    event.dyn_ref::<KeyboardEvent>().map(|e| e.key())
}

fn wire(ui: &Rc<WebController>, page: &WebPage) -> Vec<EventListener> {
    let sel = &ui.config().selectors;
    let mut listeners = Vec::new();

    if let Some(toggle) = page.query(&sel.menu_toggle) {
        let ui = Rc::clone(ui);
        listeners.push(EventListener::new_with_options(
            &toggle,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                e.prevent_default();
                ui.on_menu_toggle_click();
            },
        ));
    }
    if let Some(overlay) = page.query(&sel.overlay) {
        let ui = Rc::clone(ui);
        listeners.push(EventListener::new(&overlay, "click", move |_| {
            ui.on_overlay_click()
        }));
    }
    {
        let ui = Rc::clone(ui);
        listeners.push(EventListener::new(page.document(), "click", move |e| {
            if let Some(target) = target_element(e) {
                ui.on_document_click(&target);
            }
        }));
    }
    {
        let ui = Rc::clone(ui);
        listeners.push(EventListener::new(page.document(), "keydown", move |e| {
            if let Some(key) = key_of(e) {
                ui.on_keydown(&key);
            }
        }));
    }
    {
        let ui = Rc::clone(ui);
        listeners.push(EventListener::new(page.window(), "resize", move |_| {
            ui.on_resize()
        }));
    }

    if let Some(trigger) = page.query(&sel.service_toggle) {
        let click_ui = Rc::clone(ui);
        listeners.push(EventListener::new(&trigger, "click", move |_| {
            click_ui.on_service_toggle_click();
        }));
        let key_ui = Rc::clone(ui);
        listeners.push(EventListener::new_with_options(
            &trigger,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                let Some(key) = key_of(e) else {
                    return;
                };
                if key_ui.on_service_toggle_keydown(&key).prevents_default() {
                    e.prevent_default();
                }
            },
        ));
    }

    if let Some(button) = page.query(&sel.load_more) {
        let ui = Rc::clone(ui);
        listeners.push(EventListener::new(&button, "click", move |_| {
            ui.on_load_more_click();
        }));
    }

    listeners
}

#[wasm_bindgen]
impl SiteUi {
    /// Build the controller against the current document and attach its
    /// listeners. Pass a (partial) config object or undefined/null for the
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SiteUi, JsError> {
        console_error_panic_hook::set_once();
        logger::init();

        let cfg = parse_config(config)?;
        let page = Rc::new(WebPage::new().map_err(|e| JsError::new(&e.to_string()))?);
        let animation = Rc::new(WebAnimation::detect(Rc::clone(&page)));
        let backend = animation.backend();
        let glide = match GlideFactory::detect() {
            Ok(factory) => Some(factory),
            Err(e) => {
                warn!("carousel disabled: {e}");
                None
            }
        };

        let controller = UiController::new(Rc::clone(&page), animation, glide, cfg)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let controller = Rc::new(controller);
        let listeners = wire(&controller, &page);

        Ok(SiteUi {
            controller,
            listeners,
            backend,
        })
    }

    #[wasm_bindgen(js_name = openMenu)]
    pub fn open_menu(&self) {
        self.controller.open_menu();
    }

    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&self) {
        self.controller.close_menu();
    }

    #[wasm_bindgen(js_name = toggleMenu)]
    pub fn toggle_menu(&self) {
        self.controller.toggle_menu();
    }

    /// `{ is_desktop, is_open, is_animating }`, or null without a menu.
    #[wasm_bindgen(js_name = menuState)]
    pub fn menu_state(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.controller.menu_state())
            .map_err(|e| JsError::new(&format!("menu state error: {e}")))
    }

    /// `{ menu, service_table, testimonials, carousel }`.
    pub fn features(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.controller.features())
            .map_err(|e| JsError::new(&format!("features error: {e}")))
    }

    /// `"gsap"` or `"native"`.
    #[wasm_bindgen(getter)]
    pub fn backend(&self) -> String {
        self.backend.to_string()
    }

    /// Detach listeners, cancel the pending layout check and destroy the
    /// carousel. Safe to call twice.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.controller.destroy();
    }
}

/// Start the page controller once the document is parsed and keep it for
/// the page session. A second call replaces the running controller.
#[wasm_bindgen]
pub fn boot(config: JsValue) -> Result<(), JsError> {
    let page = WebPage::new().map_err(|e| JsError::new(&e.to_string()))?;
    if page.document().ready_state() == "loading" {
        EventListener::once(page.document(), "DOMContentLoaded", move |_| {
            if let Err(e) = install(config) {
                web_sys::console::error_1(&JsValue::from(e));
            }
        })
        .forget();
        return Ok(());
    }
    install(config)
}

fn install(config: JsValue) -> Result<(), JsError> {
    let ui = SiteUi::new(config)?;
    ACTIVE.with(|slot| {
        if let Some(mut previous) = slot.borrow_mut().replace(ui) {
            previous.destroy();
        }
    });
    Ok(())
}

/// Adjust console log verbosity (`"off"`, `"error"`, ... `"trace"`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| JsError::new(&format!("unknown log level `{level}`")))?;
    logger::set_level(filter);
    Ok(())
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
