//! Site UI core (host-agnostic).
//!
//! Behaviour for the marketing site's interactive bits: the slide-in mobile
//! menu, the service-table disclosure, the testimonials "load more" reveal
//! and the responsive carousel. Everything the browser provides (DOM, timers,
//! the animation and carousel libraries) is reached through the traits in
//! [`page`], [`animation`] and [`carousel`], so the same controller runs
//! against the real page in `site-ui-wasm` and against in-memory fakes in
//! tests.

pub mod animation;
pub mod carousel;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod disclosure;
pub mod ease;
pub mod error;
pub mod menu;
pub mod page;
pub mod refs;
pub mod testimonials;
pub mod tween;

// Re-exports for consumers (adapters)
pub use animation::{AnimationEngine, Tween, TweenCallbacks, TweenProp, Visibility};
pub use carousel::{
    Carousel, CarouselFactory, CarouselInstance, CarouselOptions, CarouselTransition,
};
pub use config::{CarouselConfig, ClassNames, Config, MenuConfig, Selectors};
pub use controller::{Features, UiController};
pub use debounce::{debounce, Debounced};
pub use disclosure::Disclosure;
pub use ease::{Ease, EaseDir};
pub use error::{Result, UiError};
pub use menu::{Menu, MenuPhase, MenuState};
pub use page::{KeyOutcome, Page, Scheduler};
pub use refs::ElementRefs;
pub use testimonials::Testimonials;
pub use tween::Tweener;
