//! Controller configuration.
//!
//! Every section defaults to the values the marketing site ships with, so a
//! host can pass a partial override (JSON or a JS object) and keep the rest.

use serde::{Deserialize, Serialize};

use crate::carousel::CarouselOptions;
use crate::ease::Ease;
use crate::error::{Result, UiError};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub selectors: Selectors,
    pub classes: ClassNames,
    pub menu: MenuConfig,
    pub carousel: CarouselConfig,
}

/// Selectors resolved once at startup. A selector that matches nothing
/// disables the feature that needs it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub menu_toggle: String,
    pub nav: String,
    pub overlay: String,
    /// Resolved at startup but read by no feature.
    pub header: String,
    pub service_toggle: String,
    pub service_table: String,
    pub carousel: String,
    pub load_more: String,
    pub testimonials: String,
    /// Looked up inside `testimonials`.
    pub testimonials_visible: String,
    /// Looked up inside `testimonials`.
    pub testimonials_hidden: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_toggle: ".header__toggle".into(),
            nav: ".header__nav".into(),
            overlay: ".background".into(),
            header: ".header".into(),
            service_toggle: "#service-table-toggle".into(),
            service_table: ".service-table".into(),
            carousel: ".glide".into(),
            load_more: ".load-more-testimonials".into(),
            testimonials: ".testimonials-container".into(),
            testimonials_visible: ".testimonials-visible".into(),
            testimonials_hidden: ".testimonials-hidden".into(),
        }
    }
}

/// CSS classes owned by the stylesheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub toggle_active: String,
    pub overlay_visible: String,
    pub scroll_lock: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            toggle_active: "header__toggle--active".into(),
            overlay_visible: "show".into(),
            scroll_lock: "overflow-hidden".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Desktop threshold used when the page first loads.
    pub initial_desktop_min_width: u32,
    /// Desktop threshold used by the resize handler. Deliberately a separate
    /// value from `initial_desktop_min_width`; the site ships 1024 / 1110.
    pub resize_desktop_min_width: u32,
    pub resize_debounce_ms: u32,
    /// Slide duration in seconds.
    pub slide_duration: f32,
    pub open_ease: Ease,
    pub close_ease: Ease,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            initial_desktop_min_width: 1024,
            resize_desktop_min_width: 1110,
            resize_debounce_ms: 150,
            slide_duration: 0.3,
            open_ease: Ease::POWER2_OUT,
            close_ease: Ease::POWER2_IN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// At or above this width the carousel is torn down.
    pub breakpoint_min_width: u32,
    pub options: CarouselOptions,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            breakpoint_min_width: 768,
            options: CarouselOptions::default(),
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(s).map_err(|e| UiError::InvalidConfig {
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(UiError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if !self.menu.slide_duration.is_finite() || self.menu.slide_duration < 0.0 {
            return invalid("menu.slide_duration must be a non-negative number");
        }
        if self.menu.initial_desktop_min_width == 0 || self.menu.resize_desktop_min_width == 0 {
            return invalid("menu breakpoints must be positive");
        }
        if self.carousel.breakpoint_min_width == 0 {
            return invalid("carousel.breakpoint_min_width must be positive");
        }
        let opts = &self.carousel.options;
        if opts.per_view == 0 {
            return invalid("carousel.options.perView must be at least 1");
        }
        if !opts.touch_ratio.is_finite() || opts.touch_ratio < 0.0 {
            return invalid("carousel.options.touchRatio must be a non-negative number");
        }
        Ok(())
    }
}
