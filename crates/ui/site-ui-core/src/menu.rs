//! Slide-in navigation menu.
//!
//! `is_animating` guards against re-entrant transitions: `open`/`close` are
//! no-ops while a slide is in flight or when the menu is already in the
//! requested state. The desktop reset in [`Menu::handle_resize`] is the only
//! path allowed to bypass the guard.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationEngine, Tween, TweenCallbacks, TweenProp, Visibility};
use crate::config::{ClassNames, MenuConfig, Selectors};
use crate::error::{Result, UiError};
use crate::page::{Page, KEY_ESCAPE};
use crate::refs::ElementRefs;

const FEATURE: &str = "menu";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
    pub is_desktop: bool,
    pub is_open: bool,
    pub is_animating: bool,
}

impl MenuState {
    pub fn phase(&self) -> MenuPhase {
        match (self.is_open, self.is_animating) {
            (false, false) => MenuPhase::Closed,
            (true, true) => MenuPhase::Opening,
            (true, false) => MenuPhase::Open,
            (false, true) => MenuPhase::Closing,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

struct Shared<P: Page> {
    page: Rc<P>,
    toggle: P::Node,
    nav: P::Node,
    overlay: P::Node,
    body: P::Node,
    classes: ClassNames,
    state: Cell<MenuState>,
}

impl<P: Page> Shared<P> {
    fn update(&self, f: impl FnOnce(&mut MenuState)) {
        let mut s = self.state.get();
        f(&mut s);
        self.state.set(s);
    }

    fn set_expanded(&self, expanded: bool) {
        self.page.set_attribute(
            &self.toggle,
            "aria-expanded",
            if expanded { "true" } else { "false" },
        );
    }

    fn opened(&self) {
        let c = &self.classes;
        self.page.add_class(&self.toggle, &c.toggle_active);
        self.page.add_class(&self.overlay, &c.overlay_visible);
        self.page.add_class(&self.body, &c.scroll_lock);
        self.set_expanded(true);
    }

    fn closed(&self) {
        let c = &self.classes;
        self.page.remove_class(&self.toggle, &c.toggle_active);
        self.page.remove_class(&self.overlay, &c.overlay_visible);
        self.page.remove_class(&self.body, &c.scroll_lock);
        self.set_expanded(false);
    }
}

pub struct Menu<P: Page, A> {
    shared: Rc<Shared<P>>,
    animation: Rc<A>,
    cfg: MenuConfig,
}

impl<P, A> Menu<P, A>
where
    P: Page + 'static,
    A: AnimationEngine<P::Node>,
{
    /// Requires the toggle, nav panel, overlay and document body. Parks the
    /// nav off-screen and hidden.
    pub fn new(
        page: Rc<P>,
        animation: Rc<A>,
        refs: &ElementRefs<P::Node>,
        selectors: &Selectors,
        classes: &ClassNames,
        cfg: &MenuConfig,
    ) -> Result<Self> {
        let need = |node: &Option<P::Node>, selector: &str| {
            node.clone()
                .ok_or_else(|| UiError::missing(FEATURE, selector))
        };
        let toggle = need(&refs.menu_toggle, &selectors.menu_toggle)?;
        let nav = need(&refs.nav, &selectors.nav)?;
        let overlay = need(&refs.overlay, &selectors.overlay)?;
        let body = need(&refs.body, "body")?;

        let is_desktop = page.matches_min_width(cfg.initial_desktop_min_width);
        animation.set(
            &nav,
            &[
                TweenProp::XPercent(100.0),
                TweenProp::Visibility(Visibility::Hidden),
            ],
        );

        Ok(Self {
            shared: Rc::new(Shared {
                page,
                toggle,
                nav,
                overlay,
                body,
                classes: classes.clone(),
                state: Cell::new(MenuState {
                    is_desktop,
                    is_open: false,
                    is_animating: false,
                }),
            }),
            animation,
            cfg: cfg.clone(),
        })
    }

    #[inline]
    pub fn state(&self) -> MenuState {
        self.shared.state.get()
    }

    #[inline]
    pub fn phase(&self) -> MenuPhase {
        self.state().phase()
    }

    pub fn open(&self) {
        let s = self.state();
        if s.is_animating || s.is_open {
            return;
        }
        let sh = &self.shared;
        sh.update(|s| {
            s.is_animating = true;
            s.is_open = true;
        });
        debug!("menu: opening");
        // Visible before the slide starts so the panel never flashes in.
        sh.page.set_style(&sh.nav, "will-change", "transform");
        sh.page.set_style(&sh.nav, "visibility", "visible");
        sh.page.set_style(&sh.overlay, "visibility", "visible");

        let on_start = Rc::clone(sh);
        let on_complete = Rc::clone(sh);
        self.animation.to(
            &sh.nav,
            Tween::x_percent(0.0, self.cfg.slide_duration, self.cfg.open_ease),
            TweenCallbacks::new()
                .on_start(move || on_start.opened())
                .on_complete(move || on_complete.update(|s| s.is_animating = false)),
        );
    }

    pub fn close(&self) {
        let s = self.state();
        if s.is_animating || !s.is_open {
            return;
        }
        let sh = &self.shared;
        sh.update(|s| {
            s.is_animating = true;
            s.is_open = false;
        });
        debug!("menu: closing");

        let on_start = Rc::clone(sh);
        let on_complete = Rc::clone(sh);
        self.animation.to(
            &sh.nav,
            Tween::x_percent(100.0, self.cfg.slide_duration, self.cfg.close_ease),
            TweenCallbacks::new()
                .on_start(move || on_start.closed())
                .on_complete(move || {
                    let sh = on_complete;
                    sh.page.set_style(&sh.nav, "visibility", "hidden");
                    sh.page.set_style(&sh.overlay, "visibility", "hidden");
                    sh.page.set_style(&sh.nav, "will-change", "auto");
                    sh.update(|s| s.is_animating = false);
                }),
        );
    }

    /// Ignored in desktop layout.
    pub fn toggle(&self) {
        let s = self.state();
        if s.is_desktop {
            return;
        }
        if s.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Document-level click: close when the target lies outside both the
    /// nav panel and the toggle.
    pub fn handle_document_click(&self, target: &P::Node) {
        let sh = &self.shared;
        if self.state().is_open
            && !sh.page.contains(&sh.nav, target)
            && !sh.page.contains(&sh.toggle, target)
        {
            self.close();
        }
    }

    pub fn handle_overlay_click(&self) {
        self.close();
    }

    /// Returns true when the key closed the menu.
    pub fn handle_keydown(&self, key: &str) -> bool {
        if key == KEY_ESCAPE && self.state().is_open {
            self.close();
            return true;
        }
        false
    }

    /// Re-classify the layout after a (debounced) resize.
    pub fn handle_resize(&self) {
        let sh = &self.shared;
        let is_desktop = sh.page.matches_min_width(self.cfg.resize_desktop_min_width);
        sh.update(|s| s.is_desktop = is_desktop);
        if is_desktop {
            self.force_desktop_reset();
        } else if !self.state().is_open {
            self.animation.set(
                &sh.nav,
                &[
                    TweenProp::XPercent(100.0),
                    TweenProp::Visibility(Visibility::Hidden),
                ],
            );
        }
    }

    fn force_desktop_reset(&self) {
        let sh = &self.shared;
        // A slide still in flight would hide the nav when it completes.
        self.animation.kill(&sh.nav);
        self.animation.clear_props(&sh.nav);
        sh.page.set_style(&sh.nav, "visibility", "visible");
        // The killed close would have hidden the overlay on completion.
        sh.page.set_style(&sh.overlay, "visibility", "hidden");
        sh.closed();
        sh.update(|s| {
            s.is_open = false;
            s.is_animating = false;
        });
        debug!("menu: reset for desktop layout");
    }
}
