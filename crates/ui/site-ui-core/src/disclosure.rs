//! Service-table disclosure. The open/closed state lives in the DOM, on the
//! trigger's `aria-expanded` attribute.

use std::rc::Rc;

use crate::config::Selectors;
use crate::error::{Result, UiError};
use crate::page::{KeyOutcome, Page, KEY_ENTER, KEY_SPACE};
use crate::refs::ElementRefs;

const FEATURE: &str = "service-table";

pub struct Disclosure<P: Page> {
    page: Rc<P>,
    trigger: P::Node,
    panel: P::Node,
}

impl<P: Page> Disclosure<P> {
    pub fn new(page: Rc<P>, refs: &ElementRefs<P::Node>, selectors: &Selectors) -> Result<Self> {
        let trigger = refs
            .service_toggle
            .clone()
            .ok_or_else(|| UiError::missing(FEATURE, &selectors.service_toggle))?;
        let panel = refs
            .service_table
            .clone()
            .ok_or_else(|| UiError::missing(FEATURE, &selectors.service_table))?;
        Ok(Self {
            page,
            trigger,
            panel,
        })
    }

    pub fn is_expanded(&self) -> bool {
        self.page
            .attribute(&self.trigger, "aria-expanded")
            .is_some_and(|v| v == "true")
    }

    /// Invert the disclosure; returns the new expanded state.
    pub fn toggle(&self) -> bool {
        let was_expanded = self.is_expanded();
        self.page.set_attribute(
            &self.trigger,
            "aria-expanded",
            if was_expanded { "false" } else { "true" },
        );
        self.page.set_hidden(&self.panel, was_expanded);
        !was_expanded
    }

    /// Enter and Space activate the trigger like a click. The default action
    /// is suppressed for both: Space would scroll, Enter would synthesize a
    /// second click on the button.
    pub fn handle_keydown(&self, key: &str) -> KeyOutcome {
        if key == KEY_ENTER || key == KEY_SPACE {
            self.toggle();
            KeyOutcome::Handled {
                prevent_default: true,
            }
        } else {
            KeyOutcome::Ignored
        }
    }
}
