use std::cell::{Cell, RefCell};
use std::rc::Rc;

use site_ui_core::{CarouselFactory, CarouselInstance, CarouselOptions, Result, UiError};

#[derive(Debug, Default)]
pub struct CarouselLog {
    pub mounts: Vec<(String, CarouselOptions)>,
    pub destroys: usize,
}

impl CarouselLog {
    pub fn live(&self) -> usize {
        self.mounts.len() - self.destroys
    }
}

/// Factory whose instances report into a shared [`CarouselLog`].
#[derive(Clone, Default)]
pub struct FakeCarouselFactory {
    log: Rc<RefCell<CarouselLog>>,
    fail_next: Rc<Cell<bool>>,
}

impl FakeCarouselFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Rc<RefCell<CarouselLog>> {
        Rc::clone(&self.log)
    }

    /// Make the next `mount` fail as if the widget threw.
    pub fn fail_next_mount(&self) {
        self.fail_next.set(true);
    }
}

pub struct FakeCarousel {
    log: Rc<RefCell<CarouselLog>>,
}

impl CarouselInstance for FakeCarousel {
    fn destroy(self) {
        self.log.borrow_mut().destroys += 1;
    }
}

impl CarouselFactory for FakeCarouselFactory {
    type Instance = FakeCarousel;

    fn mount(&self, selector: &str, options: &CarouselOptions) -> Result<FakeCarousel> {
        if self.fail_next.replace(false) {
            return Err(UiError::host("Glide: root element not found"));
        }
        self.log
            .borrow_mut()
            .mounts
            .push((selector.to_string(), options.clone()));
        Ok(FakeCarousel {
            log: Rc::clone(&self.log),
        })
    }
}
