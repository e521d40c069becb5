//! Segment interpolation and dab application

use crate::coverage::CoverageGrid;
use crate::geometry::Point;
use crate::stroke::{Brush, BrushShape};
use crate::surface::ScratchSurface;

/// Interpolate a pointer-move segment into dab centers.
///
/// With no previous position this is the first touch of a gesture and
/// yields a single dab at `to`. Otherwise centers are placed every
/// `radius / 2` along the segment direction, both endpoints included,
/// so consecutive discs always overlap regardless of slope.
pub fn rasterize_segment(from: Option<Point>, to: Point, radius: f64) -> Vec<Point> {
    let Some(from) = from else {
        return vec![to];
    };

    let length = from.distance(&to);
    let step = radius / 2.0;
    if length == 0.0 || step <= 0.0 {
        return vec![to];
    }

    let dx = (to.x - from.x) / length;
    let dy = (to.y - from.y) / length;

    let mut centers = Vec::with_capacity((length / step) as usize + 2);
    let mut travelled = 0.0;
    while travelled < length {
        centers.push(Point::new(from.x + dx * travelled, from.y + dy * travelled));
        travelled += step;
    }
    centers.push(to);
    centers
}

/// Apply dab centers against the surface and the coverage grid.
///
/// The surface erase and the grid update for one center are paired: a
/// center whose erase is refused is skipped entirely and the stroke
/// continues, so a ratio read never sees one side without the other.
/// Returns the number of dabs applied.
pub fn apply_stroke(
    centers: &[Point],
    brush: Brush,
    grid: &mut CoverageGrid,
    surface: &mut dyn ScratchSurface,
) -> usize {
    let mut applied = 0;
    for &center in centers {
        let erased = match brush.shape {
            BrushShape::Circle => surface.erase_disc(center, brush.radius),
            BrushShape::Square => surface.erase_rect(
                Point::new(center.x - brush.radius, center.y - brush.radius),
                brush.radius * 2.0,
                brush.radius * 2.0,
            ),
        };
        if let Err(err) = erased {
            tracing::warn!(
                "skipping dab at ({:.1}, {:.1}): {}",
                center.x,
                center.y,
                err
            );
            continue;
        }
        grid.mark_uncovered(brush.disc(center));
        applied += 1;
    }
    applied
}
