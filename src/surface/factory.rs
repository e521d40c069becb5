//! Surface preparation and capability probing

use std::path::PathBuf;

use crate::errors::Result;
use crate::surface::{Color, ImageSource, Pixmap, ScratchSurface};

/// Parsed `background` option: `#`-prefixed strings are solid fills,
/// anything else is an image reference
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(Color),
    Image(ImageSource),
}

impl Background {
    /// Parse the raw option string. Invalid hex colors fail fast.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.starts_with('#') {
            Color::from_hex_str(raw).map(Background::Solid)
        } else {
            Ok(Background::Image(ImageSource::Path(PathBuf::from(raw))))
        }
    }
}

/// A surface ready for scratching, with whatever coverage metadata the
/// fill produced
pub struct PreparedSurface {
    pub surface: Box<dyn ScratchSurface>,
    /// Row-major eligibility mask; `None` means every cell is eligible
    pub eligibility: Option<Vec<bool>>,
}

/// Build and fill the built-in pixmap surface. Image fills are awaited
/// here, the one suspension point before a session becomes usable, and
/// their transparent regions become excluded cells.
pub async fn prepare(background: &Background, width: u32, height: u32) -> Result<PreparedSurface> {
    let mut pixmap = Pixmap::new(width, height);
    let eligibility = match background {
        Background::Solid(color) => {
            pixmap.fill_solid(*color);
            None
        }
        Background::Image(source) => {
            pixmap.fill_image(source).await?;
            Some(pixmap.alpha_mask())
        }
    };

    Ok(PreparedSurface {
        surface: Box::new(pixmap),
        eligibility,
    })
}

/// Probe how many scratchable pixels the surface starts with.
///
/// `None` means pixel inspection is unavailable (missing capability or
/// a failing read): the condition is logged and the caller continues in
/// degraded mode. It is never surfaced as an error.
pub fn probe_coverage(surface: &dyn ScratchSurface) -> Option<usize> {
    if !surface.supports_pixel_inspection() {
        tracing::warn!("surface has no pixel inspection; degrading to click-to-reveal");
        return None;
    }
    match surface.read_alpha_coverage() {
        Ok(count) => Some(count),
        Err(err) => {
            tracing::warn!("pixel inspection failed ({err}); degrading to click-to-reveal");
            None
        }
    }
}
