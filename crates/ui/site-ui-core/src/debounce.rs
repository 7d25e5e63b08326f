//! Timer-based debounce: run once after `delay` of quiet.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::page::Scheduler;

/// Wrapped function returned by [`debounce`].
///
/// Every [`call`](Debounced::call) cancels the pending execution (if any)
/// and schedules a new one carrying the latest arguments.
pub struct Debounced<S: Scheduler, A> {
    scheduler: Rc<S>,
    delay: Duration,
    f: Rc<dyn Fn(A)>,
    handle: RefCell<Option<S::Handle>>,
    // Generation of the most recent call; a task whose generation is stale
    // lost the race against a later call and must not run.
    generation: Rc<Cell<u64>>,
    pending: Rc<Cell<bool>>,
}

pub fn debounce<S, A, F>(scheduler: Rc<S>, delay: Duration, f: F) -> Debounced<S, A>
where
    S: Scheduler,
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced {
        scheduler,
        delay,
        f: Rc::new(f),
        handle: RefCell::new(None),
        generation: Rc::new(Cell::new(0)),
        pending: Rc::new(Cell::new(false)),
    }
}

impl<S: Scheduler, A: 'static> Debounced<S, A> {
    pub fn call(&self, args: A) {
        self.cancel();
        let generation = self.generation.get();
        let current = Rc::clone(&self.generation);
        let pending = Rc::clone(&self.pending);
        let f = Rc::clone(&self.f);
        let handle = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                if current.get() != generation {
                    return;
                }
                pending.set(false);
                f(args);
            }),
        );
        self.pending.set(true);
        // A fired handle stays parked until the next call replaces it; the
        // task never drops its own handle.
        *self.handle.borrow_mut() = Some(handle);
    }

    /// Drop the pending execution, if any.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        self.pending.set(false);
        if let Some(handle) = self.handle.borrow_mut().take() {
            self.scheduler.cancel(handle);
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
