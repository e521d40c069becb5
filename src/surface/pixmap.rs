//! In-memory RGBA raster surface

use async_trait::async_trait;

use crate::errors::Result;
use crate::geometry::Point;
use crate::surface::{Color, ImageSource, ScratchSurface};

/// The initial fill, cached so reset can repaint without re-decoding
#[derive(Debug, Clone)]
enum Fill {
    None,
    Solid(Color),
    Image(image::RgbaImage),
}

/// In-memory raster surface with true per-pixel coverage.
///
/// Pixels are RGBA, row-major. Erase operations punch fully transparent
/// holes, mirroring what the coverage grid records for the same dab.
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    fill: Fill,
}

impl Pixmap {
    /// Create a transparent pixmap
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; size],
            fill: Fill::None,
        }
    }

    /// Get pixel at coordinates
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Row-major visibility mask: `true` where the fill left a visible
    /// pixel. Cells outside it are excluded from coverage tracking.
    pub fn alpha_mask(&self) -> Vec<bool> {
        self.pixels.iter().map(Color::is_opaque_enough).collect()
    }

    /// Clip a float bounding box to pixel ranges; `None` when fully
    /// outside the surface.
    #[allow(clippy::type_complexity)]
    fn clip(
        &self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    ) -> Option<(std::ops::RangeInclusive<u32>, std::ops::RangeInclusive<u32>)> {
        let min_x = (x0.floor() as i64).max(0);
        let max_x = (x1.ceil() as i64).min(i64::from(self.width) - 1);
        let min_y = (y0.floor() as i64).max(0);
        let max_y = (y1.ceil() as i64).min(i64::from(self.height) - 1);
        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some((min_x as u32..=max_x as u32, min_y as u32..=max_y as u32))
    }

    fn paint_image(&mut self, img: &image::RgbaImage) {
        for y in 0..self.height {
            for x in 0..self.width {
                let color = if x < img.width() && y < img.height() {
                    let p = img.get_pixel(x, y);
                    Color::from_rgba8(p[0], p[1], p[2], p[3])
                } else {
                    Color::TRANSPARENT
                };
                self.pixels[(y * self.width + x) as usize] = color;
            }
        }
    }
}

#[async_trait]
impl ScratchSurface for Pixmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_solid(&mut self, color: Color) {
        self.pixels.fill(color);
        self.fill = Fill::Solid(color);
    }

    async fn fill_image(&mut self, source: &ImageSource) -> Result<()> {
        let bytes = match source {
            ImageSource::Path(path) => tokio::fs::read(path).await?,
            ImageSource::Bytes(bytes) => bytes.clone(),
        };
        let img = image::load_from_memory(&bytes)?.to_rgba8();
        self.paint_image(&img);
        self.fill = Fill::Image(img);
        Ok(())
    }

    fn erase_disc(&mut self, center: Point, radius: f64) -> Result<()> {
        let Some((xs, ys)) = self.clip(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        ) else {
            return Ok(());
        };

        for py in ys {
            for px in xs.clone() {
                let dx = f64::from(px) - center.x;
                let dy = f64::from(py) - center.y;
                if (dx * dx + dy * dy).sqrt() <= radius {
                    self.pixels[(py * self.width + px) as usize] = Color::TRANSPARENT;
                }
            }
        }
        Ok(())
    }

    fn erase_rect(&mut self, top_left: Point, width: f64, height: f64) -> Result<()> {
        let Some((xs, ys)) = self.clip(
            top_left.x,
            top_left.y,
            top_left.x + width,
            top_left.y + height,
        ) else {
            return Ok(());
        };

        for py in ys {
            for px in xs.clone() {
                self.pixels[(py * self.width + px) as usize] = Color::TRANSPARENT;
            }
        }
        Ok(())
    }

    fn read_alpha_coverage(&self) -> Result<usize> {
        Ok(self.pixels.iter().filter(|p| p.is_opaque_enough()).count())
    }

    fn supports_pixel_inspection(&self) -> bool {
        true
    }

    fn restore(&mut self) -> Result<()> {
        match self.fill.clone() {
            Fill::Solid(color) => self.pixels.fill(color),
            Fill::Image(img) => self.paint_image(&img),
            Fill::None => self.pixels.fill(Color::TRANSPARENT),
        }
        Ok(())
    }
}
