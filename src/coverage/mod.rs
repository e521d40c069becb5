//! Per-cell reveal state over the scratchable domain
//!
//! The grid maps 1:1 to surface pixels when pixel inspection is
//! available. Counters are maintained incrementally so ratio queries are
//! O(1); only `reset` walks the whole domain.

mod grid;

pub use grid::{CellState, CoverageGrid};
