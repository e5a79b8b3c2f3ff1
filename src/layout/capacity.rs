//! Page capacity estimation
//!
//! Turns a drawing area and font size into an approximate number of
//! characters one page holds. The estimate deliberately errs low: an extra
//! page is a smaller failure than text running off the bottom of one.

use crate::layout::geometry::LayoutGeometry;
use serde::{Deserialize, Serialize};

/// Line height as a multiple of font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.6;

/// Average glyph advance as a multiple of font size
pub const AVG_CHAR_WIDTH_FACTOR: f32 = 0.55;

/// Discount applied to the raw grid capacity
pub const SAFETY_FACTOR: f32 = 0.75;

/// Lower bound on any estimate
pub const MIN_CAPACITY: usize = 100;

/// Tuning for the capacity estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CapacityConfig {
    /// Also serves as the line-spacing setting
    pub line_height_factor: f32,
    pub avg_char_width_factor: f32,
    pub safety_factor: f32,
    pub min_capacity: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            line_height_factor: LINE_HEIGHT_FACTOR,
            avg_char_width_factor: AVG_CHAR_WIDTH_FACTOR,
            safety_factor: SAFETY_FACTOR,
            min_capacity: MIN_CAPACITY,
        }
    }
}

/// Capacity estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityEstimator {
    config: CapacityConfig,
}

impl CapacityEstimator {
    pub fn new(config: CapacityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CapacityConfig {
        &self.config
    }

    /// Estimate how many characters fit on a page.
    ///
    /// Never returns less than the configured minimum, whatever the inputs.
    pub fn estimate(&self, geometry: &LayoutGeometry, font_size: f32) -> usize {
        let min = self.config.min_capacity.max(1);

        let line_height = font_size * self.config.line_height_factor;
        let char_width = font_size * self.config.avg_char_width_factor;
        if !is_positive(line_height) || !is_positive(char_width) {
            return min;
        }
        if !is_positive(geometry.usable_width) || !is_positive(geometry.usable_height) {
            return min;
        }

        let lines_per_page = (geometry.usable_height / line_height).floor();
        let chars_per_line = (geometry.usable_width / char_width).floor();

        let safety = if is_positive(self.config.safety_factor) {
            self.config.safety_factor
        } else {
            SAFETY_FACTOR
        };
        let estimate = (lines_per_page as f64 * chars_per_line as f64 * safety as f64).floor();

        if estimate.is_finite() && estimate > min as f64 {
            // Saturates on absurd page sizes
            estimate as usize
        } else {
            min
        }
    }
}

/// Estimate capacity with the default tuning
pub fn estimate_capacity(geometry: &LayoutGeometry, font_size: f32) -> usize {
    CapacityEstimator::default().estimate(geometry, font_size)
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
