//! WASM bindings for the editor

mod measure;

pub use measure::JsMeasurer;

use crate::config::EditorConfig;
use crate::document::StyleSnapshot;
use crate::layout::{FontLibrary, Paginator, TextMeasurer};
use crate::schedule::current_timestamp;
use crate::{Editor, ReflowReport};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Split `text` into pages of at most `capacity` characters
#[wasm_bindgen(js_name = paginateText)]
pub fn paginate_text(text: &str, capacity: usize) -> js_sys::Array {
    Paginator::default()
        .paginate(text, capacity)
        .into_iter()
        .map(JsValue::from)
        .collect()
}

/// WASM-exposed editor wrapper
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
    fonts: FontLibrary,
    measurer: Option<JsMeasurer>,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor with the default A4-like page
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_editor(Editor::default())
    }

    /// Create an editor from a JSON config; missing fields take defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<WasmEditor, JsValue> {
        let config = EditorConfig::from_json(json).map_err(to_js_error)?;
        Ok(Self::from_editor(Editor::new(config)))
    }

    /// Route text measurement through `measure(text, fontFamily, fontSize)`
    #[wasm_bindgen(js_name = setMeasurer)]
    pub fn set_measurer(&mut self, measure: js_sys::Function) {
        self.measurer = Some(JsMeasurer::new(measure, self.fonts.clone()));
    }

    /// Replace the active page's text; pagination runs after the input window
    pub fn input(&mut self, text: &str) {
        self.editor.input(text, current_timestamp());
    }

    /// Replace the active page's text and paginate immediately
    pub fn paste(&mut self, text: &str) -> JsValue {
        report_to_js(&self.editor.paste(text))
    }

    /// Run the pending reflow if its window has elapsed. Returns the
    /// reflow report, or null when nothing ran.
    pub fn tick(&mut self) -> JsValue {
        match self.editor.tick(current_timestamp()) {
            Some(report) => report_to_js(&report),
            None => JsValue::NULL,
        }
    }

    /// Run the pending reflow now
    pub fn flush(&mut self) -> JsValue {
        match self.editor.flush() {
            Some(report) => report_to_js(&report),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = hasPending)]
    pub fn has_pending(&self) -> bool {
        self.editor.has_pending()
    }

    #[wasm_bindgen(js_name = setPageSize)]
    pub fn set_page_size(&mut self, page_width: f32, page_height: f32) -> Result<(), JsValue> {
        self.editor
            .set_page_size(page_width, page_height, current_timestamp())
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Apply a JSON style object on top of the current style
    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, json: &str) -> Result<JsValue, JsValue> {
        let mut merged = serde_json::to_value(self.editor.style()).map_err(to_js_error)?;
        let patch: serde_json::Value = serde_json::from_str(json).map_err(to_js_error)?;
        if let (Some(base), serde_json::Value::Object(fields)) = (merged.as_object_mut(), patch) {
            base.extend(fields);
        }

        let style: StyleSnapshot = serde_json::from_value(merged).map_err(to_js_error)?;
        if !(style.font_size.is_finite() && style.font_size > 0.0) {
            return Err(JsValue::from_str("fontSize must be positive"));
        }

        Ok(match self.editor.set_style(style) {
            Some(report) => report_to_js(&report),
            None => JsValue::NULL,
        })
    }

    #[wasm_bindgen(js_name = applyStyleToAll)]
    pub fn apply_style_to_all(&mut self) {
        self.editor.apply_style_to_all();
    }

    #[wasm_bindgen(js_name = addPage)]
    pub fn add_page(&mut self) -> usize {
        self.editor.add_page()
    }

    #[wasm_bindgen(js_name = deletePage)]
    pub fn delete_page(&mut self) -> Result<usize, JsValue> {
        self.editor.delete_page().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = previousPage)]
    pub fn previous_page(&mut self) -> bool {
        self.editor.previous_page()
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) -> bool {
        self.editor.next_page()
    }

    #[wasm_bindgen(js_name = switchToPage)]
    pub fn switch_to_page(&mut self, index: usize) -> Result<bool, JsValue> {
        self.editor.switch_to_page(index).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = clearText)]
    pub fn clear_text(&mut self) {
        self.editor.clear_active_text();
    }

    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self) -> usize {
        self.editor.document.page_count()
    }

    #[wasm_bindgen(js_name = getActiveIndex)]
    pub fn get_active_index(&self) -> usize {
        self.editor.document.active_index()
    }

    /// Text of the active page
    #[wasm_bindgen(js_name = getText)]
    pub fn get_text(&self) -> String {
        self.editor.document.active_page().text.clone()
    }

    #[wasm_bindgen(js_name = getCapacity)]
    pub fn get_capacity(&self) -> usize {
        self.editor.capacity()
    }

    #[wasm_bindgen(js_name = getCharCount)]
    pub fn get_char_count(&self) -> usize {
        self.editor.stats().characters
    }

    #[wasm_bindgen(js_name = getWordCount)]
    pub fn get_word_count(&self) -> usize {
        self.editor.stats().words
    }

    #[wasm_bindgen(js_name = hasContent)]
    pub fn has_content(&self) -> bool {
        self.editor.document.has_content()
    }

    /// Current global style
    #[wasm_bindgen(js_name = getStyle)]
    pub fn get_style(&self) -> JsValue {
        to_js(self.editor.style())
    }

    /// All pages with their text and style snapshots
    #[wasm_bindgen(js_name = getPages)]
    pub fn get_pages(&self) -> JsValue {
        to_js(&self.editor.document.pages())
    }

    #[wasm_bindgen(js_name = getIndicator)]
    pub fn get_indicator(&self) -> JsValue {
        to_js(&self.editor.document.indicator())
    }

    /// Display list for one page, or null if the index is out of range
    #[wasm_bindgen(js_name = getDisplayPage)]
    pub fn get_display_page(&self, index: usize) -> JsValue {
        match self.editor.display_page(index, self.measurer()) {
            Some(page) => to_js(&page),
            None => JsValue::NULL,
        }
    }

    /// Display lists for every page with content
    #[wasm_bindgen(js_name = getExport)]
    pub fn get_export(&self) -> JsValue {
        to_js(&self.editor.export(self.measurer()))
    }
}

impl WasmEditor {
    fn from_editor(editor: Editor) -> Self {
        Self {
            editor,
            fonts: FontLibrary::new(),
            measurer: None,
        }
    }

    fn measurer(&self) -> &dyn TextMeasurer {
        match &self.measurer {
            Some(measurer) => measurer as &dyn TextMeasurer,
            None => &self.fonts,
        }
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Serialize through JSON so the JS side receives plain objects
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("failed to serialize value for JS: {}", err);
            return JsValue::NULL;
        }
    };
    js_sys::JSON::parse(&json).unwrap_or_else(|_| {
        log::warn!("failed to parse serialized value in JS");
        JsValue::NULL
    })
}

fn report_to_js(report: &ReflowReport) -> JsValue {
    to_js(report)
}
