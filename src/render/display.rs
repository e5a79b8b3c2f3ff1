//! Display list: render-ready representation of the pages

use crate::document::{Document, Page, StyleSnapshot};
use crate::layout::geometry::{FIRST_RULE_Y, MARGIN_RULE_X, MAX_PAGE_DIMENSION, RULE_SPACING};
use crate::layout::{LayoutConstraints, LineBreaker, TextMeasurer};
use crate::{Point, Rect};
use serde::Serialize;

/// A display item to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DisplayItem {
    /// Horizontal ruled line across the page
    RuleLine { y: f32 },
    /// Vertical margin rule
    MarginLine { x: f32 },
    /// Text run, drawn from its top-left corner
    TextRun {
        position: Point,
        text: String,
        width: f32,
    },
}

/// Display list for a single page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPage {
    pub page_index: usize,
    /// Page rectangle, pages stacked vertically
    pub bounds: Rect,
    pub style: StyleSnapshot,
    pub items: Vec<DisplayItem>,
    /// Text continued past the bottom edge and was cut off
    pub overflowed: bool,
}

impl DisplayPage {
    /// Build the display items for one page using its own style snapshot
    pub fn build(
        page_index: usize,
        page: &Page,
        constraints: &LayoutConstraints,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let style = &page.style;
        let mut items = Vec::new();

        if style.show_lines {
            let count = rule_count(constraints.page_height);
            items.extend((0..count).map(|i| DisplayItem::RuleLine {
                y: FIRST_RULE_Y + i as f32 * RULE_SPACING,
            }));
        }

        if style.show_margin {
            items.push(DisplayItem::MarginLine { x: MARGIN_RULE_X });
        }

        let geometry = constraints.geometry(style.show_margin);
        let layout = LineBreaker::new().layout_page(&page.text, style, &geometry, measurer);

        items.extend(layout.lines.iter().map(|line| DisplayItem::TextRun {
            position: Point {
                x: line.x,
                y: line.y,
            },
            text: line.text.clone(),
            width: line.width,
        }));

        DisplayPage {
            page_index,
            bounds: Rect::new(
                0.0,
                page_index as f32 * constraints.page_height,
                constraints.page_width,
                constraints.page_height,
            ),
            style: style.clone(),
            items,
            overflowed: layout.overflowed(),
        }
    }

    /// Text runs in drawing order
    pub fn text_runs(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::TextRun { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Ruled lines that start above `page_height`
fn rule_count(page_height: f32) -> usize {
    if page_height.is_nan() {
        return 0;
    }
    let height = page_height.min(MAX_PAGE_DIMENSION);
    if height <= FIRST_RULE_Y {
        return 0;
    }
    ((height - FIRST_RULE_Y) / RULE_SPACING).ceil() as usize
}

/// Complete display list for rendering or export
#[derive(Debug, Clone, Serialize)]
pub struct DisplayList {
    pub pages: Vec<DisplayPage>,
}

impl DisplayList {
    /// Build display pages for every page in the document
    pub fn build(
        document: &Document,
        constraints: &LayoutConstraints,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let pages = document
            .pages()
            .iter()
            .enumerate()
            .map(|(index, page)| DisplayPage::build(index, page, constraints, measurer))
            .collect();

        Self { pages }
    }

    /// Build display pages only for pages worth exporting
    pub fn build_for_export(
        document: &Document,
        constraints: &LayoutConstraints,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let pages = document
            .exportable_pages()
            .into_iter()
            .map(|(number, page)| DisplayPage::build(number - 1, page, constraints, measurer))
            .collect();

        Self { pages }
    }
}
