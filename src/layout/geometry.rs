//! Page constraints and the derived drawing area

use serde::{Deserialize, Serialize};

/// Vertical distance between ruled lines
pub const RULE_SPACING: f32 = 30.0;

/// Y position of the first ruled line
pub const FIRST_RULE_Y: f32 = 50.0;

/// X position of the red margin rule
pub const MARGIN_RULE_X: f32 = 60.0;

/// Largest accepted page width or height
pub const MAX_PAGE_DIMENSION: f32 = 100_000.0;

/// Page size and paddings supplied by the geometry provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConstraints {
    pub page_width: f32,
    pub page_height: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    /// Applied on both sides
    pub padding_side: f32,
    /// Extra left offset reserved when the ruled margin is shown
    pub ruled_margin_offset: f32,
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self {
            page_width: 800.0, // A4 proportions
            page_height: 1131.0,
            padding_top: 60.0,
            padding_bottom: 40.0,
            padding_side: 20.0,
            ruled_margin_offset: 60.0,
        }
    }
}

impl LayoutConstraints {
    /// Constraints for a page of the given size with default paddings
    pub fn with_page_size(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            ..Self::default()
        }
    }

    /// Check that the page size is positive and bounded and that every
    /// padding is finite and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("pageWidth", self.page_width),
            ("pageHeight", self.page_height),
        ] {
            if !(value > 0.0 && value <= MAX_PAGE_DIMENSION) {
                return Err(format!(
                    "{} must be within (0, {}], got {}",
                    name, MAX_PAGE_DIMENSION, value
                ));
            }
        }
        for (name, value) in [
            ("paddingTop", self.padding_top),
            ("paddingBottom", self.padding_bottom),
            ("paddingSide", self.padding_side),
            ("ruledMarginOffset", self.ruled_margin_offset),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{} must be finite and non-negative", name));
            }
        }
        Ok(())
    }

    /// Derive the drawing area for a page
    pub fn geometry(&self, show_margin: bool) -> LayoutGeometry {
        LayoutGeometry::compute(self, show_margin)
    }
}

/// Usable drawing area, recomputed on every layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub usable_width: f32,
    pub usable_height: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub padding_side: f32,
    /// Left offset taken by the ruled margin, zero when hidden
    pub margin_offset: f32,
}

impl LayoutGeometry {
    pub fn compute(constraints: &LayoutConstraints, show_margin: bool) -> Self {
        let margin_offset = if show_margin {
            constraints.ruled_margin_offset.max(0.0)
        } else {
            0.0
        };

        let usable_width = constraints.page_width - margin_offset - 2.0 * constraints.padding_side;
        let usable_height =
            constraints.page_height - constraints.padding_top - constraints.padding_bottom;

        Self {
            usable_width: usable_width.max(0.0),
            usable_height: usable_height.max(0.0),
            padding_top: constraints.padding_top,
            padding_bottom: constraints.padding_bottom,
            padding_side: constraints.padding_side,
            margin_offset,
        }
    }

    /// X coordinate where text lines start
    pub fn text_left(&self) -> f32 {
        self.padding_side + self.margin_offset
    }

    /// Lowest Y a text line may start at
    pub fn text_bottom(&self) -> f32 {
        self.padding_top + self.usable_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_page_size() {
        assert!(LayoutConstraints::default().validate().is_ok());
        assert!(LayoutConstraints::with_page_size(800.0, f32::INFINITY)
            .validate()
            .is_err());
        assert!(LayoutConstraints::with_page_size(f32::NAN, 500.0)
            .validate()
            .is_err());
        assert!(LayoutConstraints::with_page_size(800.0, 0.0).validate().is_err());
        assert!(LayoutConstraints::with_page_size(800.0, 1e9).validate().is_err());

        let negative = LayoutConstraints {
            padding_top: -1.0,
            ..LayoutConstraints::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_default_geometry() {
        let constraints = LayoutConstraints::default();
        let geometry = constraints.geometry(false);
        assert_eq!(geometry.usable_width, 760.0); // 800 - 20 - 20
        assert_eq!(geometry.usable_height, 1031.0); // 1131 - 60 - 40
        assert_eq!(geometry.text_left(), 20.0);
        assert_eq!(geometry.text_bottom(), 1091.0);
    }

    #[test]
    fn test_ruled_margin_shifts_text() {
        let geometry = LayoutConstraints::default().geometry(true);
        assert_eq!(geometry.margin_offset, 60.0);
        assert_eq!(geometry.text_left(), 80.0);
        assert_eq!(geometry.usable_width, 700.0);
    }

    #[test]
    fn test_degenerate_page_clamps_to_zero() {
        let constraints = LayoutConstraints::with_page_size(30.0, 50.0);
        let geometry = constraints.geometry(true);
        assert_eq!(geometry.usable_width, 0.0);
        assert_eq!(geometry.usable_height, 0.0);
    }
}
