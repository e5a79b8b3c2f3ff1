//! Font metrics and the text measurement boundary

use rustc_hash::FxHashMap;

/// Average advance of a glyph in ems, used when nothing better is known
pub const DEFAULT_EM_WIDTH: f32 = 0.55;

/// Text measurement service.
///
/// Implementations must be deterministic for identical inputs and monotonic:
/// a string never measures narrower than any of its prefixes.
pub trait TextMeasurer {
    /// Rendered width of `text` in the same units as the page geometry
    fn measure_width(&self, text: &str, font_family: &str, font_size: f32) -> f32;
}

/// Per-glyph advances for one font family, expressed in ems
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Advance of ASCII characters (0-127), in ems
    pub char_widths: Vec<f32>,
    /// Advance for characters outside the table, in ems
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::uniform(DEFAULT_EM_WIDTH)
    }
}

impl FontMetrics {
    pub fn new(char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            char_widths,
            default_width,
        }
    }

    /// Metrics where every glyph has the same advance
    pub fn uniform(em_width: f32) -> Self {
        Self {
            char_widths: vec![em_width; 128],
            default_width: em_width,
        }
    }

    /// Get width of a character in ems
    pub fn width(&self, c: char) -> f32 {
        if c.is_control() {
            return 0.0;
        }
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }

    /// Width of a run in ems
    pub fn run_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.width(c)).sum()
    }
}

/// Library of font metrics keyed by family name.
///
/// Unknown families fall back to the library's default metrics, so
/// measurement never fails.
#[derive(Debug, Clone, Default)]
pub struct FontLibrary {
    fonts: FxHashMap<String, FontMetrics>,
    fallback: FontMetrics,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library whose fallback uses the given metrics
    pub fn with_fallback(fallback: FontMetrics) -> Self {
        Self {
            fonts: FxHashMap::default(),
            fallback,
        }
    }

    /// Register metrics for a family, replacing any previous entry
    pub fn set(&mut self, family: impl Into<String>, metrics: FontMetrics) {
        self.fonts.insert(family.into(), metrics);
    }

    /// Get metrics for a family, if registered
    pub fn get(&self, family: &str) -> Option<&FontMetrics> {
        self.fonts.get(family)
    }

    /// Metrics used to measure a family
    pub fn resolve(&self, family: &str) -> &FontMetrics {
        self.fonts.get(family).unwrap_or(&self.fallback)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl TextMeasurer for FontLibrary {
    fn measure_width(&self, text: &str, font_family: &str, font_size: f32) -> f32 {
        if font_size.is_nan() || font_size <= 0.0 {
            return 0.0;
        }
        self.resolve(font_family).run_width(text) * font_size
    }
}
