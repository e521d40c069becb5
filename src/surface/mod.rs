//! Raster surface boundary
//!
//! The engine never draws to a screen itself; it consumes a 2D raster
//! capability that can fill itself and punch transparent holes. `Pixmap`
//! is the in-memory implementation with true per-pixel coverage;
//! `PlainOverlay` is the non-inspectable fallback that degrades the
//! session to click-to-reveal.

mod color;
mod factory;
mod pixmap;
mod plain;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::Result;
use crate::geometry::Point;

pub use color::Color;
pub use factory::{prepare, probe_coverage, Background, PreparedSurface};
pub use pixmap::Pixmap;
pub use plain::PlainOverlay;

/// Reference to image data used as an overlay fill
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Image file on disk
    Path(PathBuf),
    /// Already-loaded encoded image bytes
    Bytes(Vec<u8>),
}

/// A 2D raster target the mask lives on.
///
/// Erase operations make pixels transparent; alpha inspection, when
/// supported, is how the reveal baseline is measured. Loading an image
/// fill is the one asynchronous capability, awaited once during session
/// construction.
#[async_trait]
pub trait ScratchSurface: Send {
    /// Surface width in pixels
    fn width(&self) -> u32;

    /// Surface height in pixels
    fn height(&self) -> u32;

    /// Paint the whole surface with a solid color
    fn fill_solid(&mut self, color: Color);

    /// Paint the whole surface with an image, resolving once ready
    async fn fill_image(&mut self, source: &ImageSource) -> Result<()>;

    /// Punch a transparent disc around `center`
    fn erase_disc(&mut self, center: Point, radius: f64) -> Result<()>;

    /// Punch a transparent axis-aligned rectangle
    fn erase_rect(&mut self, top_left: Point, width: f64, height: f64) -> Result<()>;

    /// Count of non-transparent pixels. Surfaces without pixel
    /// inspection return [`crate::ScratchError::PixelInspection`].
    fn read_alpha_coverage(&self) -> Result<usize>;

    /// Whether per-pixel alpha can be inspected on this surface
    fn supports_pixel_inspection(&self) -> bool;

    /// Repaint the initial fill (used by session reset)
    fn restore(&mut self) -> Result<()>;
}
