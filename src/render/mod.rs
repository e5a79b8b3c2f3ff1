//! Render output: display list consumed by the drawing and export layers

mod display;

pub use display::{DisplayItem, DisplayList, DisplayPage};
