//! # Scratch Reveal
//!
//! A coverage-tracking reveal-by-erasure engine: a masking layer sits
//! atop hidden content and a continuous pointer gesture progressively
//! erases it. The crate tracks per-pixel reveal state, rasterizes
//! smooth strokes from sparse pointer samples, decides completion with
//! a uniform or center-weighted metric, and exposes the
//! enabled/disabled/complete session state machine with lifecycle
//! notifications. Rendering is left to the host behind the
//! [`surface::ScratchSurface`] capability.

pub mod coverage;
pub mod errors;
pub mod geometry;
pub mod session;
pub mod stroke;
pub mod surface;

pub use coverage::{CellState, CoverageGrid};
pub use errors::{Result, ScratchError};
pub use geometry::Point;
pub use session::{
    await_all, Completion, InputContext, Operation, OperationOutput, PointerKind, PointerSample,
    ScratchConfig, ScratchSession, SessionHooks, SessionState, ThresholdMode,
};
pub use stroke::{Brush, BrushShape};
pub use surface::{Background, Color, ImageSource, Pixmap, PlainOverlay, ScratchSurface};
