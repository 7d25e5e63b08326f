//! Bridge to Glide.js (`window.Glide`).

use js_sys::{Array, Function, Reflect};
use log::warn;
use serde_wasm_bindgen as swb;
use wasm_bindgen::{JsCast, JsValue};

use site_ui_core::{CarouselFactory, CarouselInstance, CarouselOptions, Result, UiError};

use crate::utils::{global, js_err, method};

pub struct GlideFactory {
    ctor: Function,
}

impl GlideFactory {
    pub fn detect() -> Result<Self> {
        let ctor = global("Glide")?
            .dyn_into::<Function>()
            .map_err(|_| UiError::host("`Glide` is not a constructor"))?;
        Ok(Self { ctor })
    }
}

pub struct GlideInstance {
    glide: JsValue,
}

impl CarouselFactory for GlideFactory {
    type Instance = GlideInstance;

    fn mount(&self, selector: &str, options: &CarouselOptions) -> Result<GlideInstance> {
        let opts = swb::to_value(options).map_err(|e| UiError::host(e.to_string()))?;
        let args = Array::of2(&JsValue::from_str(selector), &opts);
        let glide = Reflect::construct(&self.ctor, &args).map_err(js_err)?;
        let instance = GlideInstance { glide };
        let mounted = method(&instance.glide, "mount")
            .and_then(|f| f.call0(&instance.glide).map_err(js_err));
        match mounted {
            Ok(_) => Ok(instance),
            Err(e) => {
                // Undo whatever listeners the half-mounted widget bound.
                instance.destroy();
                Err(e)
            }
        }
    }
}

impl CarouselInstance for GlideInstance {
    fn destroy(self) {
        let result = method(&self.glide, "destroy")
            .and_then(|f| f.call0(&self.glide).map_err(js_err));
        if let Err(e) = result {
            warn!("glide.destroy failed: {e}");
        }
    }
}
