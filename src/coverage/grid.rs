//! Coverage grid with incremental reveal counters

/// State of a single coverage cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Still hidden by the mask
    Covered,
    /// Revealed by an erase stroke
    Uncovered,
    /// Outside the valid raster (e.g. transparent image regions);
    /// never counted in either ratio
    Excluded,
}

/// Per-cell reveal state over a rectangular domain.
///
/// A cell, once uncovered, never reverts to covered except through
/// [`CoverageGrid::reset`]. Each session owns exactly one grid.
#[derive(Debug, Clone)]
pub struct CoverageGrid {
    width: u32,
    height: u32,
    /// Cell states, row-major
    cells: Vec<CellState>,
    /// Number of uncovered cells
    uncovered: usize,
    /// Number of non-excluded cells
    total_eligible: usize,
    /// Running sum of center-falloff weights over uncovered cells
    weighted_sum: f64,
    /// Per-column weight table, `wx(i) = max(0, 1 - 2*|i - W/2|/W)^1.5`
    wx: Vec<f64>,
    /// Per-row weight table, symmetric to `wx`
    wy: Vec<f64>,
}

fn weight_table(extent: u32) -> Vec<f64> {
    let n = f64::from(extent);
    (0..extent)
        .map(|i| {
            let centered = 1.0 - 2.0 * (f64::from(i) - n / 2.0).abs() / n;
            centered.max(0.0).powf(1.5)
        })
        .collect()
}

impl CoverageGrid {
    /// Create a grid with every cell covered, except cells the
    /// eligibility mask (row-major, `true` = eligible) marks excluded.
    pub fn new(width: u32, height: u32, eligibility: Option<&[bool]>) -> Self {
        let size = (width as usize) * (height as usize);
        let cells: Vec<CellState> = match eligibility {
            Some(mask) => (0..size)
                .map(|i| {
                    if mask.get(i).copied().unwrap_or(true) {
                        CellState::Covered
                    } else {
                        CellState::Excluded
                    }
                })
                .collect(),
            None => vec![CellState::Covered; size],
        };
        let total_eligible = cells.iter().filter(|c| **c != CellState::Excluded).count();

        Self {
            width,
            height,
            cells,
            uncovered: 0,
            total_eligible,
            weighted_sum: 0.0,
            wx: weight_table(width),
            wy: weight_table(height),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells uncovered so far
    #[inline]
    pub fn uncovered_count(&self) -> usize {
        self.uncovered
    }

    /// Number of cells participating in ratio denominators
    #[inline]
    pub fn total_eligible(&self) -> usize {
        self.total_eligible
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// State of the cell at (x, y); `None` when out of bounds
    pub fn state_at(&self, x: i32, y: i32) -> Option<CellState> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Whether the cell at (x, y) is still covered. Out-of-bounds cells
    /// report `false` so strokes never try to uncover outside the domain.
    pub fn is_covered(&self, x: i32, y: i32) -> bool {
        matches!(self.state_at(x, y), Some(CellState::Covered))
    }

    /// Transition the given cells from covered to uncovered. Cells that
    /// are out of bounds, excluded or already uncovered are ignored, so
    /// repeated marking is idempotent. Returns how many cells changed.
    pub fn mark_uncovered<I>(&mut self, cells: I) -> usize
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut changed = 0;
        for (x, y) in cells {
            let Some(i) = self.index(x, y) else {
                continue;
            };
            if self.cells[i] != CellState::Covered {
                continue;
            }
            self.cells[i] = CellState::Uncovered;
            self.uncovered += 1;
            self.weighted_sum += self.wx[x as usize] * self.wy[y as usize];
            changed += 1;
        }
        changed
    }

    /// Uncovered cells over eligible cells, 0 when the domain is empty
    pub fn simple_ratio(&self) -> f64 {
        if self.total_eligible == 0 {
            return 0.0;
        }
        self.uncovered as f64 / self.total_eligible as f64
    }

    /// Center-weighted reveal ratio: each uncovered cell contributes
    /// `wx(i) * wy(j)`, valuing center-of-card reveals over corners.
    pub fn weighted_ratio(&self) -> f64 {
        if self.total_eligible == 0 {
            return 0.0;
        }
        self.weighted_sum / self.total_eligible as f64
    }

    /// Uncover every remaining covered cell (Clear semantics)
    pub fn reveal_all(&mut self) {
        let width = self.width as usize;
        for i in 0..self.cells.len() {
            if self.cells[i] == CellState::Covered {
                self.cells[i] = CellState::Uncovered;
                self.uncovered += 1;
                self.weighted_sum += self.wx[i % width] * self.wy[i / width];
            }
        }
    }

    /// Restore every eligible cell to covered and zero the counters
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            if *cell == CellState::Uncovered {
                *cell = CellState::Covered;
            }
        }
        self.uncovered = 0;
        self.weighted_sum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recompute all three counters from raw cell state with the stated
    /// weight formula.
    fn rescan(grid: &CoverageGrid) -> (usize, usize, f64) {
        let (w, h) = (grid.width(), grid.height());
        let mut uncovered = 0;
        let mut eligible = 0;
        let mut weighted = 0.0;
        for j in 0..h as i32 {
            for i in 0..w as i32 {
                match grid.state_at(i, j) {
                    Some(CellState::Uncovered) => {
                        uncovered += 1;
                        eligible += 1;
                        let px = (1.0 - 2.0 * (f64::from(i) - f64::from(w) / 2.0).abs()
                            / f64::from(w))
                        .max(0.0)
                        .powf(1.5);
                        let py = (1.0 - 2.0 * (f64::from(j) - f64::from(h) / 2.0).abs()
                            / f64::from(h))
                        .max(0.0)
                        .powf(1.5);
                        weighted += px * py;
                    }
                    Some(CellState::Covered) => eligible += 1,
                    _ => {}
                }
            }
        }
        (uncovered, eligible, weighted)
    }

    #[test]
    fn test_new_grid_all_covered() {
        let grid = CoverageGrid::new(8, 4, None);
        assert_eq!(grid.total_eligible(), 32);
        assert_eq!(grid.uncovered_count(), 0);
        assert!(grid.is_covered(0, 0));
        assert!(grid.is_covered(7, 3));
        assert_eq!(grid.simple_ratio(), 0.0);
    }

    #[test]
    fn test_out_of_bounds_reports_revealed() {
        let grid = CoverageGrid::new(4, 4, None);
        assert!(!grid.is_covered(-1, 0));
        assert!(!grid.is_covered(0, -1));
        assert!(!grid.is_covered(4, 0));
        assert!(!grid.is_covered(0, 4));
    }

    #[test]
    fn test_mark_uncovered_is_idempotent() {
        let mut grid = CoverageGrid::new(4, 4, None);
        assert_eq!(grid.mark_uncovered([(1, 1), (2, 2)]), 2);
        assert_eq!(grid.mark_uncovered([(1, 1), (2, 2), (9, 9), (-3, 0)]), 0);
        assert_eq!(grid.uncovered_count(), 2);
    }

    #[test]
    fn test_excluded_cells_never_count() {
        // exclude the first row of a 4x2 grid
        let mask = [false, false, false, false, true, true, true, true];
        let mut grid = CoverageGrid::new(4, 2, Some(&mask));
        assert_eq!(grid.total_eligible(), 4);
        assert_eq!(grid.mark_uncovered([(0, 0), (1, 0)]), 0);
        assert_eq!(grid.simple_ratio(), 0.0);
        assert_eq!(grid.mark_uncovered([(0, 1), (1, 1)]), 2);
        assert!((grid.simple_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_uncover_is_exactly_one() {
        let mut grid = CoverageGrid::new(10, 10, None);
        grid.mark_uncovered((0..10).flat_map(|x| (0..10).map(move |y| (x, y))));
        assert_eq!(grid.simple_ratio(), 1.0);
    }

    #[test]
    fn test_reveal_all_matches_full_uncover() {
        let mut grid = CoverageGrid::new(7, 5, None);
        grid.mark_uncovered([(3, 2)]);
        grid.reveal_all();
        assert_eq!(grid.simple_ratio(), 1.0);
        let (uncovered, eligible, weighted) = rescan(&grid);
        assert_eq!(uncovered, grid.uncovered_count());
        assert_eq!(eligible, grid.total_eligible());
        assert!((weighted / eligible as f64 - grid.weighted_ratio()).abs() < 1e-9);
    }

    #[test]
    fn test_reset_restores_covered_state() {
        let mask = [true, false, true, true];
        let mut grid = CoverageGrid::new(2, 2, Some(&mask));
        grid.mark_uncovered([(0, 0), (0, 1)]);
        grid.reset();
        assert_eq!(grid.uncovered_count(), 0);
        assert_eq!(grid.simple_ratio(), 0.0);
        assert_eq!(grid.weighted_ratio(), 0.0);
        assert!(grid.is_covered(0, 0));
        // exclusions survive a reset
        assert_eq!(grid.state_at(1, 0), Some(CellState::Excluded));
        assert_eq!(grid.total_eligible(), 3);
    }

    #[test]
    fn test_center_outweighs_corner() {
        let mut center = CoverageGrid::new(11, 11, None);
        let mut corner = center.clone();
        center.mark_uncovered([(5, 5)]);
        corner.mark_uncovered([(0, 0)]);
        assert!(center.weighted_ratio() > corner.weighted_ratio());
        // the very corner has zero weight
        assert_eq!(corner.weighted_ratio(), 0.0);
    }

    #[test]
    fn test_counters_match_rescan_after_random_marks() {
        use rand::Rng;

        let mut rng = rand::rng();
        let mut grid = CoverageGrid::new(20, 15, None);
        for _ in 0..200 {
            let x = rng.random_range(-2..22);
            let y = rng.random_range(-2..17);
            grid.mark_uncovered([(x, y)]);
        }
        let (uncovered, eligible, weighted) = rescan(&grid);
        assert_eq!(uncovered, grid.uncovered_count());
        assert_eq!(eligible, grid.total_eligible());
        assert!((weighted / eligible as f64 - grid.weighted_ratio()).abs() < 1e-9);
    }

    #[test]
    fn test_simple_ratio_monotonic() {
        use rand::Rng;

        let mut rng = rand::rng();
        let mut grid = CoverageGrid::new(16, 16, None);
        let mut last = 0.0;
        for _ in 0..100 {
            let x = rng.random_range(0..16);
            let y = rng.random_range(0..16);
            grid.mark_uncovered([(x, y)]);
            let ratio = grid.simple_ratio();
            assert!(ratio >= last);
            last = ratio;
        }
    }

    #[test]
    fn test_empty_domain_ratio_is_zero() {
        let mask = [false, false];
        let grid = CoverageGrid::new(2, 1, Some(&mask));
        assert_eq!(grid.simple_ratio(), 0.0);
        assert_eq!(grid.weighted_ratio(), 0.0);
    }
}
