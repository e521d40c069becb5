//! Stroke rasterization
//!
//! Converts sparse pointer samples into a dense sequence of erase dabs
//! so fast gestures leave no gaps, and applies each dab against the
//! coverage grid and the raster surface as one unit.

mod brush;
mod rasterizer;

pub use brush::{Brush, BrushShape};
pub use rasterizer::{apply_stroke, rasterize_segment};
