//! Animation backend selection: GSAP when the page loads it, otherwise the
//! core `Tweener` ticked from `requestAnimationFrame`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use log::info;
use web_sys::Element;

use site_ui_core::{AnimationEngine, Tween, TweenCallbacks, TweenProp, Tweener};

use crate::gsap::GsapEngine;
use crate::page::WebPage;

struct FrameLoop {
    tweener: Tweener<WebPage>,
    frame: RefCell<Option<AnimationFrame>>,
    last_ts: Cell<Option<f64>>,
}

fn request_tick(state: Rc<FrameLoop>) {
    let next = Rc::clone(&state);
    let handle = request_animation_frame(move |ts| {
        let dt = next
            .last_ts
            .replace(Some(ts))
            .map_or(0.0, |prev| ((ts - prev) / 1000.0) as f32);
        if next.tweener.update(dt) > 0 {
            request_tick(next);
        } else {
            next.last_ts.set(None);
            next.frame.borrow_mut().take();
        }
    });
    *state.frame.borrow_mut() = Some(handle);
}

/// `Tweener` plus the frame loop that drives it while tweens are active.
pub struct FrameTweener {
    state: Rc<FrameLoop>,
}

impl FrameTweener {
    pub fn new(page: Rc<WebPage>) -> Self {
        Self {
            state: Rc::new(FrameLoop {
                tweener: Tweener::new(page),
                frame: RefCell::new(None),
                last_ts: Cell::new(None),
            }),
        }
    }

    fn ensure_running(&self) {
        if self.state.frame.borrow().is_none() {
            request_tick(Rc::clone(&self.state));
        }
    }
}

pub enum WebAnimation {
    Gsap(GsapEngine),
    Native(FrameTweener),
}

impl WebAnimation {
    pub fn detect(page: Rc<WebPage>) -> Self {
        match GsapEngine::detect() {
            Ok(gsap) => WebAnimation::Gsap(gsap),
            Err(e) => {
                info!("{e}; using built-in tweens");
                WebAnimation::Native(FrameTweener::new(page))
            }
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            WebAnimation::Gsap(_) => "gsap",
            WebAnimation::Native(_) => "native",
        }
    }
}

impl AnimationEngine<Element> for WebAnimation {
    fn set(&self, target: &Element, props: &[TweenProp]) {
        match self {
            WebAnimation::Gsap(g) => g.set(target, props),
            WebAnimation::Native(n) => n.state.tweener.set(target, props),
        }
    }

    fn to(&self, target: &Element, tween: Tween, callbacks: TweenCallbacks) {
        match self {
            WebAnimation::Gsap(g) => g.to(target, tween, callbacks),
            WebAnimation::Native(n) => {
                n.state.tweener.to(target, tween, callbacks);
                n.ensure_running();
            }
        }
    }

    fn clear_props(&self, target: &Element) {
        match self {
            WebAnimation::Gsap(g) => g.clear_props(target),
            WebAnimation::Native(n) => n.state.tweener.clear_props(target),
        }
    }

    fn kill(&self, target: &Element) {
        match self {
            WebAnimation::Gsap(g) => g.kill(target),
            WebAnimation::Native(n) => n.state.tweener.kill(target),
        }
    }
}
