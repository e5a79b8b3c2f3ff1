//! handwrite-core: pagination and layout engine for handwritten pages
//!
//! This crate provides the core of a text-to-handwriting converter:
//! - Capacity estimation from page geometry and font size
//! - Pagination that prefers paragraph, line, sentence, clause and word breaks
//! - Debounced re-flow when the text or the settings change
//! - Display lists for the drawing and export layers

pub mod config;
pub mod document;
pub mod layout;
pub mod render;
pub mod schedule;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmEditor;

// Re-export primary types
pub use config::{ConfigError, EditorConfig};
pub use document::{Document, DocumentError, Page, PageIndicator, StyleSnapshot, TextStats};
pub use layout::{
    estimate_capacity, paginate, CapacityEstimator, FontLibrary, LayoutConstraints,
    LayoutGeometry, Paginator, TextMeasurer,
};
pub use render::{DisplayItem, DisplayList, DisplayPage};
pub use schedule::{Debouncer, TaskId, TaskKind};

use serde::{Deserialize, Serialize};

/// Separator used when re-joining pages for redistribution
const PAGE_JOINER: &str = "\n";

/// Page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Page rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Outcome of a capacity check on the active page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflowReport {
    pub capacity: usize,
    /// Pages from the active one onward were re-derived
    pub redistributed: bool,
    pub pages_before: usize,
    pub pages_after: usize,
    /// Debounced task that triggered the pass, if any
    pub trigger: Option<TaskKind>,
}

/// The main editor state combining all components
pub struct Editor {
    pub document: Document,
    config: EditorConfig,
    /// Global style used for new pages and capacity checks
    style: StyleSnapshot,
    constraints: LayoutConstraints,
    estimator: CapacityEstimator,
    paginator: Paginator,
    scheduler: Debouncer,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create a new editor with one empty page
    pub fn new(config: EditorConfig) -> Self {
        Self {
            document: Document::new(config.style.clone()),
            style: config.style.clone(),
            constraints: config.constraints,
            estimator: CapacityEstimator::new(config.capacity),
            paginator: Paginator::new(config.pagination),
            scheduler: Debouncer::new(),
            config,
        }
    }

    /// Create an editor holding `text`, already paginated
    pub fn with_text(text: &str, config: EditorConfig) -> Self {
        let mut editor = Self::new(config);
        editor.paste(text);
        editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn style(&self) -> &StyleSnapshot {
        &self.style
    }

    pub fn constraints(&self) -> &LayoutConstraints {
        &self.constraints
    }

    /// Drawing area for the current style
    pub fn geometry(&self) -> LayoutGeometry {
        self.constraints.geometry(self.style.show_margin)
    }

    /// Current per-page character capacity
    pub fn capacity(&self) -> usize {
        self.estimator
            .estimate(&self.geometry(), self.style.font_size)
    }

    /// Replace the active page's text from a keystroke; reflow is debounced
    pub fn input(&mut self, text: &str, now_ms: u64) -> TaskId {
        self.document.set_active_text(text, &self.style);
        self.scheduler
            .schedule(TaskKind::TextInput, now_ms, self.config.input_debounce_ms)
    }

    /// Replace the active page's text from a paste and reflow immediately
    pub fn paste(&mut self, text: &str) -> ReflowReport {
        self.scheduler.cancel();
        self.document.set_active_text(text, &self.style);
        self.reflow(None)
    }

    /// Run the pending task if its window has elapsed
    pub fn tick(&mut self, now_ms: u64) -> Option<ReflowReport> {
        let task = self.scheduler.poll(now_ms)?;
        Some(self.reflow(Some(task.kind)))
    }

    /// Run the pending task now, regardless of its window
    pub fn flush(&mut self) -> Option<ReflowReport> {
        let task = self.scheduler.cancel()?;
        Some(self.reflow(Some(task.kind)))
    }

    /// Whether a debounced reflow is waiting
    pub fn has_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Resize the page; reflow is debounced
    pub fn set_page_size(
        &mut self,
        page_width: f32,
        page_height: f32,
        now_ms: u64,
    ) -> Result<TaskId, ConfigError> {
        let constraints = LayoutConstraints {
            page_width,
            page_height,
            ..self.constraints
        };
        self.set_constraints(constraints, now_ms)
    }

    /// Replace all page constraints; reflow is debounced. Invalid
    /// constraints are rejected and the current ones kept.
    pub fn set_constraints(
        &mut self,
        constraints: LayoutConstraints,
        now_ms: u64,
    ) -> Result<TaskId, ConfigError> {
        constraints.validate().map_err(ConfigError::Invalid)?;
        self.constraints = constraints;
        Ok(self
            .scheduler
            .schedule(TaskKind::Resize, now_ms, self.config.resize_debounce_ms))
    }

    /// Change the global style. Settings that can shrink capacity trigger
    /// an immediate reflow of the active page onward.
    pub fn set_style(&mut self, style: StyleSnapshot) -> Option<ReflowReport> {
        let affects_capacity = self.style.affects_capacity(&style);
        self.style = style;
        self.document.active_page_mut().style = self.style.clone();

        if affects_capacity {
            log::debug!("style change: capacity now {}", self.capacity());
            Some(self.reflow(None))
        } else {
            None
        }
    }

    /// Copy the global style into every page's snapshot
    pub fn apply_style_to_all(&mut self) {
        self.document.apply_style_to_all(&self.style);
    }

    /// Check the active page against current capacity and redistribute the
    /// text from the active page onward if it no longer fits.
    pub fn reflow(&mut self, trigger: Option<TaskKind>) -> ReflowReport {
        let capacity = self.capacity();
        let pages_before = self.document.page_count();
        let active = self.document.active_index();

        let active_len = self.document.active_page().char_len();
        if active_len <= capacity {
            return ReflowReport {
                capacity,
                redistributed: false,
                pages_before,
                pages_after: pages_before,
                trigger,
            };
        }

        let text = self.document.text_from(active, PAGE_JOINER);
        let pages: Vec<Page> = self
            .paginator
            .paginate(&text, capacity)
            .into_iter()
            .map(|chunk| Page::with_text(chunk, self.style.clone()))
            .collect();
        self.document.replace_from(active, pages, &self.style);

        let pages_after = self.document.page_count();
        log::debug!(
            "reflow from page {}: capacity {}, {} -> {} pages",
            active,
            capacity,
            pages_before,
            pages_after
        );

        ReflowReport {
            capacity,
            redistributed: true,
            pages_before,
            pages_after,
            trigger,
        }
    }

    /// Append an empty page with the global style and switch to it
    pub fn add_page(&mut self) -> usize {
        self.flush();
        self.document.add_page(self.style.clone())
    }

    /// Delete the active page; the last remaining page cannot be deleted
    pub fn delete_page(&mut self) -> Result<usize, DocumentError> {
        let index = self.document.delete_active_page()?;
        self.load_active_style();
        // A pending resize still applies to the new active page
        self.flush();
        Ok(index)
    }

    pub fn previous_page(&mut self) -> bool {
        self.flush();
        let moved = self.document.previous_page();
        if moved {
            self.load_active_style();
        }
        moved
    }

    pub fn next_page(&mut self) -> bool {
        self.flush();
        let moved = self.document.next_page();
        if moved {
            self.load_active_style();
        }
        moved
    }

    pub fn switch_to_page(&mut self, index: usize) -> Result<bool, DocumentError> {
        if index >= self.document.page_count() {
            return Err(DocumentError::PageOutOfRange {
                index,
                len: self.document.page_count(),
            });
        }
        self.flush();
        // A flush can shrink the page list
        let moved = self.document.switch_to(index)?;
        if moved {
            self.load_active_style();
        }
        Ok(moved)
    }

    /// Empty the active page
    pub fn clear_active_text(&mut self) {
        self.scheduler.cancel_kind(TaskKind::TextInput);
        self.document.set_active_text("", &self.style);
    }

    /// Character and word counts of the active page
    pub fn stats(&self) -> TextStats {
        self.document.active_page().stats()
    }

    /// Display list for one page
    pub fn display_page(&self, index: usize, measurer: &dyn TextMeasurer) -> Option<DisplayPage> {
        let page = self.document.page(index)?;
        Some(DisplayPage::build(index, page, &self.constraints, measurer))
    }

    /// Display list for every page with content, for export
    pub fn export(&self, measurer: &dyn TextMeasurer) -> DisplayList {
        DisplayList::build_for_export(&self.document, &self.constraints, measurer)
    }

    /// A page's snapshot becomes the global style when it is shown
    fn load_active_style(&mut self) {
        self.style = self.document.active_page().style.clone();
    }
}
