//! One-shot "load more" reveal for testimonial cards.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::config::Selectors;
use crate::error::{Result, UiError};
use crate::page::Page;
use crate::refs::ElementRefs;

const FEATURE: &str = "testimonials";

pub struct Testimonials<P: Page> {
    page: Rc<P>,
    trigger: P::Node,
    visible: P::Node,
    // Drained and forgotten on the first reveal.
    hidden: RefCell<Option<P::Node>>,
}

impl<P: Page> Testimonials<P> {
    /// Needs the trigger, the container and its visible group. A missing
    /// hidden group is fine: the reveal is then a no-op.
    pub fn new(page: Rc<P>, refs: &ElementRefs<P::Node>, selectors: &Selectors) -> Result<Self> {
        let trigger = refs
            .load_more
            .clone()
            .ok_or_else(|| UiError::missing(FEATURE, &selectors.load_more))?;
        if refs.testimonials.is_none() {
            return Err(UiError::missing(FEATURE, &selectors.testimonials));
        }
        let visible = refs
            .testimonials_visible
            .clone()
            .ok_or_else(|| UiError::missing(FEATURE, &selectors.testimonials_visible))?;
        Ok(Self {
            page,
            trigger,
            visible,
            hidden: RefCell::new(refs.testimonials_hidden.clone()),
        })
    }

    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.hidden.borrow().is_none()
    }

    /// Move every hidden card to the end of the visible group, hide the
    /// trigger and drop the emptied container. Returns the number of cards
    /// moved; 0 once the reveal has already happened.
    pub fn reveal(&self) -> usize {
        let Some(hidden) = self.hidden.borrow_mut().take() else {
            return 0;
        };
        let cards = self.page.children(&hidden);
        self.page.append_children(&self.visible, &cards);
        self.page.set_style(&self.trigger, "display", "none");
        self.page.remove(&hidden);
        debug!("testimonials: revealed {} cards", cards.len());
        cards.len()
    }
}
