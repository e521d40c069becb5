//! Non-inspectable fallback surface

use async_trait::async_trait;

use crate::errors::{Result, ScratchError};
use crate::geometry::Point;
use crate::surface::{Color, ImageSource, ScratchSurface};

/// Fallback surface for hosts without per-pixel raster access.
///
/// Fills are remembered so the host can style the overlay; erases are
/// accepted and ignored. Because alpha cannot be inspected, a session
/// bound to this surface runs in degraded click-to-reveal mode.
#[derive(Debug, Clone, Default)]
pub struct PlainOverlay {
    width: u32,
    height: u32,
    background: Option<Color>,
    image: Option<ImageSource>,
}

impl PlainOverlay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            image: None,
        }
    }

    /// The solid fill the host should present, if any
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// The image fill the host should present, if any
    pub fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }
}

#[async_trait]
impl ScratchSurface for PlainOverlay {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_solid(&mut self, color: Color) {
        self.background = Some(color);
        self.image = None;
    }

    async fn fill_image(&mut self, source: &ImageSource) -> Result<()> {
        self.image = Some(source.clone());
        self.background = None;
        Ok(())
    }

    fn erase_disc(&mut self, _center: Point, _radius: f64) -> Result<()> {
        Ok(())
    }

    fn erase_rect(&mut self, _top_left: Point, _width: f64, _height: f64) -> Result<()> {
        Ok(())
    }

    fn read_alpha_coverage(&self) -> Result<usize> {
        Err(ScratchError::PixelInspection(
            "plain overlay has no readable pixels".to_string(),
        ))
    }

    fn supports_pixel_inspection(&self) -> bool {
        false
    }

    fn restore(&mut self) -> Result<()> {
        Ok(())
    }
}
