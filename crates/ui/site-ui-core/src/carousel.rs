//! Responsive carousel lifecycle: mounted below the breakpoint, destroyed at
//! or above it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Widget options, serialised with the carousel library's own key names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselOptions {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "perView")]
    pub per_view: u32,
    pub gap: u32,
    pub keyboard: bool,
    #[serde(rename = "touchRatio")]
    pub touch_ratio: f32,
    /// Pixels of drag before a swipe registers.
    #[serde(rename = "dragThreshold")]
    pub drag_threshold: u32,
    /// Milliseconds between slides; `None` disables autoplay.
    #[serde(with = "autoplay")]
    pub autoplay: Option<u32>,
    pub hoverpause: bool,
    pub arrows: bool,
    pub dots: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            kind: "carousel".into(),
            per_view: 1,
            gap: 0,
            keyboard: true,
            touch_ratio: 1.0,
            drag_threshold: 60,
            autoplay: Some(2500),
            hoverpause: true,
            arrows: false,
            dots: false,
        }
    }
}

// The widget expects `autoplay: false` rather than a missing key.
mod autoplay {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const DEFAULT_INTERVAL_MS: u32 = 2500;

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Interval(u32),
        Flag(bool),
    }

    pub fn serialize<S: Serializer>(v: &Option<u32>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(ms) => Raw::Interval(*ms).serialize(s),
            None => Raw::Flag(false).serialize(s),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match Raw::deserialize(d)? {
            Raw::Interval(0) | Raw::Flag(false) => None,
            Raw::Interval(ms) => Some(ms),
            Raw::Flag(true) => Some(DEFAULT_INTERVAL_MS),
        })
    }
}

/// A live widget. Dropping it without `destroy` leaves it running.
pub trait CarouselInstance {
    fn destroy(self);
}

/// Constructs and mounts widgets (`new Glide(selector, options).mount()`).
pub trait CarouselFactory {
    type Instance: CarouselInstance;

    fn mount(&self, selector: &str, options: &CarouselOptions) -> Result<Self::Instance>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CarouselTransition {
    Mounted,
    Destroyed,
    Unchanged,
}

/// Sole owner of the carousel instance; at most one is ever live.
pub struct Carousel<F: CarouselFactory> {
    factory: F,
    selector: String,
    options: CarouselOptions,
    breakpoint_min_width: u32,
    instance: Option<F::Instance>,
}

impl<F: CarouselFactory> Carousel<F> {
    pub fn new(
        factory: F,
        selector: impl Into<String>,
        options: CarouselOptions,
        breakpoint_min_width: u32,
    ) -> Self {
        Self {
            factory,
            selector: selector.into(),
            options,
            breakpoint_min_width,
            instance: None,
        }
    }

    #[inline]
    pub fn breakpoint_min_width(&self) -> u32 {
        self.breakpoint_min_width
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.instance.is_some()
    }

    /// `is_wide` is the breakpoint query result: wide layouts render a
    /// static list, narrow ones get the widget.
    pub fn sync(&mut self, is_wide: bool) -> CarouselTransition {
        if is_wide {
            self.destroy()
        } else {
            self.mount()
        }
    }

    pub fn mount(&mut self) -> CarouselTransition {
        if self.instance.is_some() {
            return CarouselTransition::Unchanged;
        }
        match self.factory.mount(&self.selector, &self.options) {
            Ok(instance) => {
                self.instance = Some(instance);
                debug!("carousel: mounted on {}", self.selector);
                CarouselTransition::Mounted
            }
            Err(e) => {
                warn!("carousel: mount failed: {e}");
                CarouselTransition::Unchanged
            }
        }
    }

    pub fn destroy(&mut self) -> CarouselTransition {
        match self.instance.take() {
            Some(instance) => {
                instance.destroy();
                debug!("carousel: destroyed");
                CarouselTransition::Destroyed
            }
            None => CarouselTransition::Unchanged,
        }
    }
}
