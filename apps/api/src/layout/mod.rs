//! Layout: font metrics and block/row flow. Pure and synchronous; callers that
//! lay out large documents do so inside `spawn_blocking` alongside rasterization.

pub mod flow;
pub mod font_metrics;

pub use flow::{layout, DisplayItem, DisplayList, Rect};
pub use font_metrics::{get_metrics, FontFamily, FontWeight};
