use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use site_ui_core::{Result, UiError};

pub(crate) fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Convert a thrown JS value into a host error, keeping its message.
pub(crate) fn js_err(e: JsValue) -> UiError {
    let message = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{e:?}"));
    UiError::host(message)
}

/// Look up a library global such as `window.gsap`.
pub(crate) fn global(name: &str) -> Result<JsValue> {
    let value = Reflect::get(&js_sys::global(), &JsValue::from_str(name)).map_err(js_err)?;
    if jsvalue_is_undefined_or_null(&value) {
        return Err(UiError::MissingLibrary {
            name: name.to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn method(target: &JsValue, name: &str) -> Result<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .map_err(js_err)?
        .dyn_into::<Function>()
        .map_err(|_| UiError::host(format!("`{name}` is not a function")))
}
