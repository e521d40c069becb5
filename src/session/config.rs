//! Session configuration with defaults matching the classic scratch-card
//! option surface

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ScratchError};
use crate::stroke::BrushShape;
use crate::surface::Background;

/// How the completion test weighs revealed cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Every eligible cell counts the same; revealed when
    /// `simple_ratio() >= threshold`
    #[default]
    Uniform,
    /// Center cells count more than corners; revealed when
    /// `weighted_ratio() > threshold`
    CenterWeighted,
}

/// Session options.
///
/// All fields have defaults, so `ScratchConfig::default()` and partial
/// JSON both work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    /// `#`-prefixed hex color for a solid fill, anything else is an
    /// image path
    pub background: String,

    /// Surface width; falls back to the bound target's width
    pub width: Option<u32>,

    /// Surface height; falls back to the bound target's height (the
    /// classic `auto`)
    pub height: Option<u32>,

    /// Erase-disc radius in pixels
    pub brush_radius: f64,

    /// Disc or square dabs
    pub brush_shape: BrushShape,

    /// Reveal fraction (0-1] that completes the card; when unset, a
    /// per-mode default applies
    pub completion_threshold: Option<f64>,

    /// Uniform or center-weighted completion test
    pub threshold_mode: ThresholdMode,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            background: "#666".to_string(),
            width: None,
            height: None,
            brush_radius: 10.0,
            brush_shape: BrushShape::default(),
            completion_threshold: None,
            threshold_mode: ThresholdMode::default(),
        }
    }
}

impl ScratchConfig {
    /// Effective completion threshold. The uniform default matches the
    /// classic 65% card; the weighted default is far lower because edge
    /// weights fall to zero, capping the attainable weighted ratio well
    /// below 1.
    pub fn threshold(&self) -> f64 {
        self.completion_threshold
            .unwrap_or(match self.threshold_mode {
                ThresholdMode::Uniform => 0.65,
                ThresholdMode::CenterWeighted => 0.11,
            })
    }

    /// Resolve the surface extent against the bound target's measured
    /// size. Explicit options win; zero-area surfaces are rejected.
    pub fn resolve_extent(&self, target_width: u32, target_height: u32) -> Result<(u32, u32)> {
        let width = self.width.unwrap_or(target_width);
        let height = self.height.unwrap_or(target_height);
        if width == 0 || height == 0 {
            return Err(ScratchError::Configuration(format!(
                "target surface has zero dimensions ({width}x{height})"
            )));
        }
        Ok((width, height))
    }

    /// Validate everything that can fail fast, before any surface work
    /// or listener attachment.
    pub fn validate(&self) -> Result<()> {
        if !self.brush_radius.is_finite() || self.brush_radius <= 0.0 {
            return Err(ScratchError::Configuration(format!(
                "brush_radius must be positive, got {}",
                self.brush_radius
            )));
        }
        let threshold = self.threshold();
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            return Err(ScratchError::Configuration(format!(
                "completion_threshold must be in (0, 1], got {threshold}"
            )));
        }
        Background::parse(&self.background)?;
        Ok(())
    }
}
