//! Erase brush: shape and disc-cell enumeration

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Footprint of a single erase dab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushShape {
    /// Filled disc, cells within the radius of the center
    #[default]
    Circle,
    /// Axis-aligned square, both axis distances within the radius
    Square,
}

/// Erase brush with a radius in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub radius: f64,
    pub shape: BrushShape,
}

impl Brush {
    #[inline]
    pub const fn new(radius: f64, shape: BrushShape) -> Self {
        Self { radius, shape }
    }

    /// Enumerate the integer grid cells the brush covers when dabbed at
    /// `center`. Order is unspecified; callers treat the result as a set.
    pub fn disc(&self, center: Point) -> Vec<(i32, i32)> {
        let r = self.radius;
        let min_x = (center.x - r).floor() as i32;
        let max_x = (center.x + r).ceil() as i32;
        let min_y = (center.y - r).floor() as i32;
        let max_y = (center.y + r).ceil() as i32;

        let mut cells = Vec::with_capacity(((max_x - min_x + 1) * (max_y - min_y + 1)) as usize);
        for j in min_y..=max_y {
            for i in min_x..=max_x {
                let dx = f64::from(i) - center.x;
                let dy = f64::from(j) - center.y;
                let inside = match self.shape {
                    BrushShape::Circle => (dx * dx + dy * dy).sqrt() <= r,
                    BrushShape::Square => dx.abs() <= r && dy.abs() <= r,
                };
                if inside {
                    cells.push((i, j));
                }
            }
        }
        cells
    }
}
