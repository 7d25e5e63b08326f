//! Bridge to GSAP (`window.gsap`).

use js_sys::{Array, Object, Reflect};
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys::Element;

use site_ui_core::{AnimationEngine, Result, Tween, TweenCallbacks, TweenProp};

use crate::utils::{global, js_err, method};

pub struct GsapEngine {
    gsap: JsValue,
}

fn put(obj: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

fn vars(props: &[TweenProp]) -> Object {
    let obj = Object::new();
    for prop in props {
        match *prop {
            TweenProp::XPercent(x) => put(&obj, "x", &JsValue::from_str(&format!("{x}%"))),
            TweenProp::Visibility(v) => put(&obj, "visibility", &JsValue::from_str(v.as_css())),
        }
    }
    obj
}

fn once(cb: Option<Box<dyn FnOnce()>>) -> Option<JsValue> {
    cb.map(|f| Closure::once_into_js(move || f()))
}

impl GsapEngine {
    pub fn detect() -> Result<Self> {
        Ok(Self {
            gsap: global("gsap")?,
        })
    }

    fn call(&self, name: &str, target: &Element, arg: Option<&JsValue>) -> Result<JsValue> {
        let f = method(&self.gsap, name)?;
        let args = match arg {
            Some(arg) => Array::of2(target, arg),
            None => Array::of1(target),
        };
        f.apply(&self.gsap, &args).map_err(js_err)
    }

    fn call_logged(&self, name: &str, target: &Element, arg: Option<&JsValue>) {
        if let Err(e) = self.call(name, target, arg) {
            warn!("gsap.{name} failed: {e}");
        }
    }
}

impl AnimationEngine<Element> for GsapEngine {
    fn set(&self, target: &Element, props: &[TweenProp]) {
        self.call_logged("set", target, Some(&vars(props).into()));
    }

    fn to(&self, target: &Element, tween: Tween, callbacks: TweenCallbacks) {
        let obj = vars(&tween.props);
        put(&obj, "duration", &JsValue::from_f64(f64::from(tween.duration)));
        put(&obj, "ease", &JsValue::from_str(&tween.ease.name()));
        // One-shot closures free themselves when GSAP calls them; a tween
        // killed before it starts leaks its pair.
        if let Some(f) = once(callbacks.on_start) {
            put(&obj, "onStart", &f);
        }
        if let Some(f) = once(callbacks.on_complete) {
            put(&obj, "onComplete", &f);
        }
        self.call_logged("to", target, Some(&obj.into()));
    }

    fn clear_props(&self, target: &Element) {
        let obj = Object::new();
        put(&obj, "clearProps", &JsValue::from_str("all"));
        self.call_logged("set", target, Some(&obj.into()));
    }

    fn kill(&self, target: &Element) {
        self.call_logged("killTweensOf", target, None);
    }
}
