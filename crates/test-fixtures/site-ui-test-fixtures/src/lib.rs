//! In-memory stand-ins for the browser, used by the core integration tests.

pub mod animation;
pub mod carousel;
pub mod page;
pub mod site;

pub use animation::{AnimCall, RecordingAnimation};
pub use carousel::{CarouselLog, FakeCarousel, FakeCarouselFactory};
pub use page::{FakePage, NodeId, TimerId};
pub use site::{site, SiteNodes};
