//! The page's UI controller: one object owning every feature, built once
//! when the document is ready.
//!
//! Features are wired independently. A feature whose elements are missing
//! (or whose library failed to load) is logged and left out; the others
//! still come up.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::animation::AnimationEngine;
use crate::carousel::{Carousel, CarouselFactory, CarouselTransition};
use crate::config::Config;
use crate::debounce::{debounce, Debounced};
use crate::disclosure::Disclosure;
use crate::error::{Result, UiError};
use crate::menu::{Menu, MenuState};
use crate::page::{KeyOutcome, Page, Scheduler};
use crate::refs::ElementRefs;
use crate::testimonials::Testimonials;

/// Which features came up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub menu: bool,
    pub service_table: bool,
    pub testimonials: bool,
    pub carousel: bool,
}

pub struct UiController<P, A, F>
where
    P: Page + Scheduler + 'static,
    F: CarouselFactory,
{
    page: Rc<P>,
    config: Config,
    menu: Option<Rc<Menu<P, A>>>,
    resize: Option<Debounced<P, ()>>,
    disclosure: Option<Disclosure<P>>,
    testimonials: Option<Testimonials<P>>,
    carousel: Option<RefCell<Carousel<F>>>,
    destroyed: Cell<bool>,
}

/// A feature-local failure leaves the feature out; anything else aborts.
fn feature<T>(name: &str, built: Result<T>) -> Result<Option<T>> {
    match built {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_feature_local() => {
            debug!("{name} disabled: {e}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

impl<P, A, F> UiController<P, A, F>
where
    P: Page + Scheduler + 'static,
    A: AnimationEngine<P::Node> + 'static,
    F: CarouselFactory,
{
    /// Validate `config`, resolve elements and wire every feature. Only an
    /// invalid config fails construction. `carousel_factory` is `None` when
    /// the widget library is not on the page.
    pub fn new(
        page: Rc<P>,
        animation: Rc<A>,
        carousel_factory: Option<F>,
        config: Config,
    ) -> Result<Self> {
        config.validate()?;
        let refs = ElementRefs::resolve(page.as_ref(), &config.selectors);

        let menu = feature(
            "menu",
            Menu::new(
                Rc::clone(&page),
                animation,
                &refs,
                &config.selectors,
                &config.classes,
                &config.menu,
            ),
        )?
        .map(Rc::new);
        let resize = menu.as_ref().map(|menu| {
            let menu = Rc::clone(menu);
            debounce(
                Rc::clone(&page),
                Duration::from_millis(u64::from(config.menu.resize_debounce_ms)),
                move |()| menu.handle_resize(),
            )
        });

        let disclosure = feature(
            "service-table",
            Disclosure::new(Rc::clone(&page), &refs, &config.selectors),
        )?;
        let testimonials = feature(
            "testimonials",
            Testimonials::new(Rc::clone(&page), &refs, &config.selectors),
        )?;

        let carousel = feature(
            "carousel",
            refs.carousel
                .as_ref()
                .ok_or_else(|| UiError::missing("carousel", &config.selectors.carousel))
                .and_then(|_| {
                    carousel_factory.ok_or_else(|| UiError::MissingLibrary {
                        name: "carousel widget".into(),
                    })
                }),
        )?
        .map(|factory| {
            RefCell::new(Carousel::new(
                factory,
                config.selectors.carousel.clone(),
                config.carousel.options.clone(),
                config.carousel.breakpoint_min_width,
            ))
        });

        let controller = Self {
            page,
            config,
            menu,
            resize,
            disclosure,
            testimonials,
            carousel,
            destroyed: Cell::new(false),
        };
        controller.sync_carousel();
        // The initial layout check goes through the debounce like any resize.
        if let Some(resize) = &controller.resize {
            resize.call(());
        }
        info!("site-ui: controller ready {:?}", controller.features());
        Ok(controller)
    }

    pub fn features(&self) -> Features {
        Features {
            menu: self.menu.is_some(),
            service_table: self.disclosure.is_some(),
            testimonials: self.testimonials.is_some(),
            carousel: self.carousel.is_some(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    fn live(&self) -> bool {
        !self.destroyed.get()
    }

    pub fn menu_state(&self) -> Option<MenuState> {
        self.menu.as_ref().map(|m| m.state())
    }

    pub fn open_menu(&self) {
        if let (true, Some(menu)) = (self.live(), &self.menu) {
            menu.open();
        }
    }

    pub fn close_menu(&self) {
        if let (true, Some(menu)) = (self.live(), &self.menu) {
            menu.close();
        }
    }

    pub fn toggle_menu(&self) {
        if let (true, Some(menu)) = (self.live(), &self.menu) {
            menu.toggle();
        }
    }

    pub fn is_carousel_mounted(&self) -> bool {
        self.carousel
            .as_ref()
            .is_some_and(|c| c.borrow().is_mounted())
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize.as_ref().is_some_and(|r| r.is_pending())
    }

    // ---- event entry points ------------------------------------------

    pub fn on_menu_toggle_click(&self) {
        self.toggle_menu();
    }

    pub fn on_overlay_click(&self) {
        if let (true, Some(menu)) = (self.live(), &self.menu) {
            menu.handle_overlay_click();
        }
    }

    pub fn on_document_click(&self, target: &P::Node) {
        if let (true, Some(menu)) = (self.live(), &self.menu) {
            menu.handle_document_click(target);
        }
    }

    pub fn on_keydown(&self, key: &str) {
        if let (true, Some(menu)) = (self.live(), &self.menu) {
            menu.handle_keydown(key);
        }
    }

    /// Menu re-check is debounced; the carousel reacts immediately.
    pub fn on_resize(&self) {
        if !self.live() {
            return;
        }
        if let Some(resize) = &self.resize {
            resize.call(());
        }
        self.sync_carousel();
    }

    pub fn on_service_toggle_click(&self) -> Option<bool> {
        match (self.live(), &self.disclosure) {
            (true, Some(d)) => Some(d.toggle()),
            _ => None,
        }
    }

    pub fn on_service_toggle_keydown(&self, key: &str) -> KeyOutcome {
        match (self.live(), &self.disclosure) {
            (true, Some(d)) => d.handle_keydown(key),
            _ => KeyOutcome::Ignored,
        }
    }

    pub fn on_load_more_click(&self) -> usize {
        match (self.live(), &self.testimonials) {
            (true, Some(t)) => t.reveal(),
            _ => 0,
        }
    }

    fn sync_carousel(&self) -> CarouselTransition {
        let Some(carousel) = &self.carousel else {
            return CarouselTransition::Unchanged;
        };
        let mut carousel = carousel.borrow_mut();
        let is_wide = self.page.matches_min_width(carousel.breakpoint_min_width());
        carousel.sync(is_wide)
    }

    /// Tear down: cancel the pending layout check and destroy the carousel.
    /// Later events are ignored. Idempotent.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(resize) = &self.resize {
            resize.cancel();
        }
        if let Some(carousel) = &self.carousel {
            carousel.borrow_mut().destroy();
        }
        info!("site-ui: controller destroyed");
    }
}
