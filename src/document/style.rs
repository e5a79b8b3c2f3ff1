//! Per-page style snapshots

use serde::{Deserialize, Serialize};

/// Style settings captured when a page was created or last edited.
///
/// Pages own their snapshot by value, so changing the global style later
/// leaves already-paginated pages untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleSnapshot {
    pub font_family: String,
    /// Font size in geometry units
    pub font_size: f32,
    /// CSS color string
    pub pen_color: String,
    /// Draw ruled lines
    pub show_lines: bool,
    /// Draw the red margin rule and reserve space for it
    pub show_margin: bool,
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            font_family: "Homemade Apple".to_string(),
            font_size: 20.0,
            pen_color: "#1e3a8a".to_string(),
            show_lines: true,
            show_margin: true,
        }
    }
}

impl StyleSnapshot {
    /// Whether switching from `self` to `other` can change page capacity
    pub fn affects_capacity(&self, other: &StyleSnapshot) -> bool {
        self.font_size != other.font_size || self.show_margin != other.show_margin
    }
}
