//! A single page of text

use crate::document::StyleSnapshot;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// One unit of output
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Text assigned to this page (may be empty)
    pub text: String,
    /// Style in effect when the page was created or last edited
    pub style: StyleSnapshot,
}

impl Page {
    /// Create an empty page
    pub fn new(style: StyleSnapshot) -> Self {
        Self {
            text: String::new(),
            style,
        }
    }

    pub fn with_text(text: impl Into<String>, style: StyleSnapshot) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Page has something other than whitespace
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Length in user-perceived characters
    pub fn char_len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.text)
    }
}

/// Character and word counts shown next to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.graphemes(true).count(),
            words: text.split_whitespace().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats() {
        assert_eq!(
            TextStats::of("Test input"),
            TextStats {
                characters: 10,
                words: 2
            }
        );
        assert_eq!(TextStats::of("   "), TextStats { characters: 3, words: 0 });
        assert_eq!(TextStats::of("").words, 0);
        // Graphemes, not bytes
        assert_eq!(TextStats::of("café 👍🏽").characters, 6);
    }

    #[test]
    fn test_has_content() {
        let style = StyleSnapshot::default();
        assert!(!Page::new(style.clone()).has_content());
        assert!(!Page::with_text(" \n\t", style.clone()).has_content());
        assert!(Page::with_text("ink", style).has_content());
    }
}
