//! Line breaking for drawing a page

use crate::document::StyleSnapshot;
use crate::layout::font::TextMeasurer;
use crate::layout::geometry::LayoutGeometry;
use serde::Serialize;
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// Drawn line height as a multiple of font size
pub const RENDER_LINE_HEIGHT_FACTOR: f32 = 1.8;

/// A positioned line of text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineLayout {
    pub text: String,
    pub x: f32,
    /// Top of the line
    pub y: f32,
    pub width: f32,
}

/// Lines for one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub lines: Vec<LineLayout>,
    pub line_height: f32,
    /// Lines that fell below the drawing area and were not placed
    pub hidden_lines: usize,
}

impl PageLayout {
    /// Text ran past the bottom of the page
    pub fn overflowed(&self) -> bool {
        self.hidden_lines > 0
    }
}

/// Places lines top to bottom, counting the ones that do not fit
struct LineSink<'a> {
    measurer: &'a dyn TextMeasurer,
    style: &'a StyleSnapshot,
    x: f32,
    y: f32,
    bottom: f32,
    line_height: f32,
    lines: Vec<LineLayout>,
    hidden_lines: usize,
}

impl LineSink<'_> {
    /// Place a line; an empty line only advances the pen
    fn push(&mut self, text: &str) {
        let text = text.trim();
        if self.y > self.bottom {
            if !text.is_empty() {
                self.hidden_lines += 1;
            }
        } else if !text.is_empty() {
            let width = self
                .measurer
                .measure_width(text, &self.style.font_family, self.style.font_size);
            self.lines.push(LineLayout {
                text: text.to_string(),
                x: self.x,
                y: self.y,
                width,
            });
        }
        self.y += self.line_height;
    }
}

/// Greedy line breaker over UAX #14 break opportunities
#[derive(Debug, Default)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Wrap page text into positioned lines
    pub fn layout_page(
        &self,
        text: &str,
        style: &StyleSnapshot,
        geometry: &LayoutGeometry,
        measurer: &dyn TextMeasurer,
    ) -> PageLayout {
        let line_height = (style.font_size * RENDER_LINE_HEIGHT_FACTOR).max(1.0);
        let max_width = geometry.usable_width;

        let mut sink = LineSink {
            measurer,
            style,
            x: geometry.text_left(),
            y: geometry.padding_top,
            bottom: geometry.text_bottom(),
            line_height,
            lines: Vec::new(),
            hidden_lines: 0,
        };

        let mut current = String::new();
        let mut start = 0;

        for (end, opportunity) in linebreaks(text) {
            let segment = &text[start..end];
            start = end;

            let word = segment.trim_end_matches(['\r', '\n']);
            if !word.is_empty() {
                let candidate = format!("{}{}", current, word);
                let too_wide = measurer.measure_width(
                    candidate.trim(),
                    &style.font_family,
                    style.font_size,
                ) > max_width;

                if too_wide && !current.trim().is_empty() {
                    sink.push(&current);
                    current = word.to_string();
                } else {
                    current = candidate;
                }
            }

            if opportunity == BreakOpportunity::Mandatory {
                sink.push(&current);
                current.clear();
            }
        }

        if !current.trim().is_empty() {
            sink.push(&current);
        }

        PageLayout {
            lines: sink.lines,
            line_height,
            hidden_lines: sink.hidden_lines,
        }
    }
}
