//! Text measurement backed by a JS callback (usually canvas `measureText`)

use crate::layout::{FontLibrary, TextMeasurer};
use wasm_bindgen::prelude::*;

/// Calls `measure(text, fontFamily, fontSize)` on the JS side.
///
/// Falls back to the built-in font metrics when the callback throws or
/// returns something that is not a finite, non-negative number.
pub struct JsMeasurer {
    callback: js_sys::Function,
    fallback: FontLibrary,
}

impl JsMeasurer {
    pub fn new(callback: js_sys::Function, fallback: FontLibrary) -> Self {
        Self { callback, fallback }
    }
}

impl TextMeasurer for JsMeasurer {
    fn measure_width(&self, text: &str, font_family: &str, font_size: f32) -> f32 {
        let result = self.callback.call3(
            &JsValue::NULL,
            &JsValue::from_str(text),
            &JsValue::from_str(font_family),
            &JsValue::from_f64(font_size as f64),
        );

        match result.ok().and_then(|value| value.as_f64()) {
            Some(width) if width.is_finite() && width >= 0.0 => width as f32,
            _ => {
                log::warn!("measure callback failed for {:?}, using font metrics", font_family);
                self.fallback.measure_width(text, font_family, font_size)
            }
        }
    }
}
