//! Animation engine contract.
//!
//! Mirrors the two GSAP primitives the site uses (`gsap.set` / `gsap.to`)
//! plus `clearProps` and `killTweensOf`, so either GSAP or the built-in
//! [`Tweener`](crate::tween::Tweener) can sit behind it.

use serde::{Deserialize, Serialize};

use crate::ease::Ease;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn as_css(self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        }
    }
}

/// A property an engine knows how to set or tween.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TweenProp {
    /// Horizontal translation as a percentage of the element's own width.
    XPercent(f32),
    /// Not interpolated: applied at the start of a tween.
    Visibility(Visibility),
}

/// Parameters of an animated transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub props: Vec<TweenProp>,
    /// Seconds.
    pub duration: f32,
    pub ease: Ease,
}

impl Tween {
    pub fn x_percent(to: f32, duration: f32, ease: Ease) -> Self {
        Self {
            props: vec![TweenProp::XPercent(to)],
            duration,
            ease,
        }
    }
}

type Callback = Box<dyn FnOnce()>;

/// Lifecycle hooks for [`AnimationEngine::to`]. `on_start` always runs
/// before `on_complete`.
#[derive(Default)]
pub struct TweenCallbacks {
    pub on_start: Option<Callback>,
    pub on_complete: Option<Callback>,
}

impl TweenCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for TweenCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenCallbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

pub trait AnimationEngine<N> {
    /// Apply `props` immediately.
    fn set(&self, target: &N, props: &[TweenProp]);
    /// Start an animated transition. Callbacks run from the engine's own
    /// ticking, never synchronously inside this call.
    fn to(&self, target: &N, tween: Tween, callbacks: TweenCallbacks);
    /// Remove every inline property the engine wrote on `target`.
    fn clear_props(&self, target: &N);
    /// Drop in-flight tweens on `target` without running their callbacks.
    fn kill(&self, target: &N);
}

impl<N, E: AnimationEngine<N> + ?Sized> AnimationEngine<N> for std::rc::Rc<E> {
    fn set(&self, target: &N, props: &[TweenProp]) {
        (**self).set(target, props)
    }

    fn to(&self, target: &N, tween: Tween, callbacks: TweenCallbacks) {
        (**self).to(target, tween, callbacks)
    }

    fn clear_props(&self, target: &N) {
        (**self).clear_props(target)
    }

    fn kill(&self, target: &N) {
        (**self).kill(target)
    }
}
