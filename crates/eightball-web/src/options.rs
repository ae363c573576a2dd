use eightball_core::{BallConfig, TransitionRequest};
use wasm_bindgen::{JsCast, JsValue};

/// Reads `key` from a plain options object; undefined and null count as
/// absent.
fn get(obj: &JsValue, key: &str) -> Option<JsValue> {
    if !obj.is_object() {
        return None;
    }
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

pub fn read_bool(obj: &JsValue, key: &str) -> Option<bool> {
    get(obj, key).and_then(|v| v.as_bool())
}

pub fn read_f64(obj: &JsValue, key: &str) -> Option<f64> {
    get(obj, key).and_then(|v| v.as_f64())
}

pub fn read_string(obj: &JsValue, key: &str) -> Option<String> {
    get(obj, key).and_then(|v| v.as_string())
}

pub fn read_function(obj: &JsValue, key: &str) -> Option<js_sys::Function> {
    get(obj, key).and_then(|v| v.dyn_into::<js_sys::Function>().ok())
}

/// Options accepted by `mountEightBall`.
#[derive(Clone, Debug, Default)]
pub struct MountOptions {
    pub revealed: bool,
    pub prompt_text: String,
    pub disabled: bool,
    pub max_device_pixel_ratio: Option<f64>,
    pub duration_ms: Option<f64>,
    pub reduced_duration_ms: Option<f64>,
    pub fallback_id: Option<String>,
    pub on_press: Option<js_sys::Function>,
}

impl MountOptions {
    pub fn from_js(obj: &JsValue) -> Self {
        Self {
            revealed: read_bool(obj, "revealed").unwrap_or(false),
            prompt_text: read_string(obj, "promptText").unwrap_or_default(),
            disabled: read_bool(obj, "disabled").unwrap_or(false),
            max_device_pixel_ratio: read_f64(obj, "maxDevicePixelRatio"),
            duration_ms: read_f64(obj, "durationMs"),
            reduced_duration_ms: read_f64(obj, "reducedDurationMs"),
            fallback_id: read_string(obj, "fallbackId"),
            on_press: read_function(obj, "onPress"),
        }
    }

    /// Overrides applied on top of `base`; validation is left to the caller.
    pub fn apply(&self, base: BallConfig) -> BallConfig {
        BallConfig {
            full_duration_ms: self.duration_ms.unwrap_or(base.full_duration_ms),
            reduced_duration_ms: self.reduced_duration_ms.unwrap_or(base.reduced_duration_ms),
            max_device_pixel_ratio: self
                .max_device_pixel_ratio
                .unwrap_or(base.max_device_pixel_ratio),
            ..base
        }
    }
}

/// Options accepted by `playTransition`. An absent `reducedMotion` is
/// resolved against the user's motion preference by the caller.
pub fn transition_request(obj: &JsValue) -> TransitionRequest {
    TransitionRequest {
        reduced_motion: read_bool(obj, "reducedMotion"),
        duration_ms: read_f64(obj, "durationMs"),
    }
}
