//! Layout: capacity estimation, pagination and line breaking

pub mod capacity;
pub mod font;
pub mod geometry;
mod line_break;
pub mod pagination;

pub use capacity::{estimate_capacity, CapacityConfig, CapacityEstimator, MIN_CAPACITY};
pub use font::{FontLibrary, FontMetrics, TextMeasurer};
pub use geometry::{LayoutConstraints, LayoutGeometry};
pub use line_break::{LineBreaker, LineLayout, PageLayout, RENDER_LINE_HEIGHT_FACTOR};
pub use pagination::{paginate, BreakKind, BreakPoint, Chunk, PaginationConfig, Paginator};
