//! Built-in tween engine.
//!
//! Deterministic: nothing moves until the host calls [`Tweener::update`]
//! with the elapsed time (the wasm adapter drives it from
//! `requestAnimationFrame`). Start values are captured on the first update
//! that sees a tween, as GSAP does on its first render.

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{AnimationEngine, Tween, TweenCallbacks, TweenProp, Visibility};
use crate::ease::{lerp_f32, Ease};
use crate::page::Page;

/// Inline style properties this engine may write; `clear_props` removes them.
pub const MANAGED_STYLES: [&str; 3] = ["transform", "visibility", "will-change"];

pub fn translate_x(percent: f32) -> String {
    format!("translateX({percent}%)")
}

struct ActiveTween<N> {
    target: N,
    to_x: Option<f32>,
    visibility: Option<Visibility>,
    duration: f32,
    ease: Ease,
    elapsed: f32,
    from_x: Option<f32>,
    callbacks: TweenCallbacks,
}

pub struct Tweener<P: Page> {
    page: Rc<P>,
    positions: RefCell<Vec<(P::Node, f32)>>,
    active: RefCell<Vec<ActiveTween<P::Node>>>,
}

impl<P: Page> Tweener<P> {
    pub fn new(page: Rc<P>) -> Self {
        Self {
            page,
            positions: RefCell::new(Vec::new()),
            active: RefCell::new(Vec::new()),
        }
    }

    /// Last x-percent written to `target`, if any.
    pub fn x_percent(&self, target: &P::Node) -> Option<f32> {
        self.positions
            .borrow()
            .iter()
            .find_map(|(n, x)| (n == target).then_some(*x))
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    pub fn is_tweening(&self, target: &P::Node) -> bool {
        self.active.borrow().iter().any(|t| &t.target == target)
    }

    fn write_x(&self, target: &P::Node, x: f32) {
        {
            let mut positions = self.positions.borrow_mut();
            match positions.iter_mut().find(|(n, _)| n == target) {
                Some(entry) => entry.1 = x,
                None => positions.push((target.clone(), x)),
            }
        }
        self.page.set_style(target, "transform", &translate_x(x));
    }

    fn write_visibility(&self, target: &P::Node, v: Visibility) {
        self.page.set_style(target, "visibility", v.as_css());
    }

    /// Advance every active tween by `dt` seconds and fire due callbacks.
    /// Returns the number of tweens still running.
    pub fn update(&self, dt: f32) -> usize {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut fired: Vec<Box<dyn FnOnce()>> = Vec::new();
        {
            let mut active = self.active.borrow_mut();
            let mut i = 0;
            while i < active.len() {
                let tween = &mut active[i];
                if tween.from_x.is_none() {
                    tween.from_x = Some(self.x_percent(&tween.target).unwrap_or(0.0));
                    if let Some(v) = tween.visibility {
                        self.write_visibility(&tween.target, v);
                    }
                    if let Some(cb) = tween.callbacks.on_start.take() {
                        fired.push(cb);
                    }
                }
                tween.elapsed += dt;
                let progress = if tween.duration <= 0.0 {
                    1.0
                } else {
                    (tween.elapsed / tween.duration).min(1.0)
                };
                if let (Some(from), Some(to)) = (tween.from_x, tween.to_x) {
                    let x = lerp_f32(from, to, tween.ease.apply(progress));
                    let target = tween.target.clone();
                    self.write_x(&target, x);
                }
                if progress >= 1.0 {
                    let mut done = active.remove(i);
                    if let Some(to) = done.to_x {
                        // Land exactly on the target value.
                        self.write_x(&done.target, to);
                    }
                    if let Some(cb) = done.callbacks.on_complete.take() {
                        fired.push(cb);
                    }
                } else {
                    i += 1;
                }
            }
        }
        for cb in fired {
            cb();
        }
        self.active_count()
    }
}

impl<P: Page> AnimationEngine<P::Node> for Tweener<P> {
    fn set(&self, target: &P::Node, props: &[TweenProp]) {
        for prop in props {
            match *prop {
                TweenProp::XPercent(x) => self.write_x(target, x),
                TweenProp::Visibility(v) => self.write_visibility(target, v),
            }
        }
    }

    fn to(&self, target: &P::Node, tween: Tween, callbacks: TweenCallbacks) {
        let mut to_x = None;
        let mut visibility = None;
        for prop in &tween.props {
            match *prop {
                TweenProp::XPercent(x) => to_x = Some(x),
                TweenProp::Visibility(v) => visibility = Some(v),
            }
        }
        self.active.borrow_mut().push(ActiveTween {
            target: target.clone(),
            to_x,
            visibility,
            duration: tween.duration,
            ease: tween.ease,
            elapsed: 0.0,
            from_x: None,
            callbacks,
        });
    }

    fn clear_props(&self, target: &P::Node) {
        self.positions.borrow_mut().retain(|(n, _)| n != target);
        for property in MANAGED_STYLES {
            self.page.remove_style(target, property);
        }
    }

    fn kill(&self, target: &P::Node) {
        // Dropped outside the borrow in case a callback's captures touch us.
        let killed: Vec<ActiveTween<P::Node>> = {
            let mut active = self.active.borrow_mut();
            let (killed, kept) = active.drain(..).partition(|t| &t.target == target);
            *active = kept;
            killed
        };
        drop(killed);
    }
}
