//! Reveal session: the state machine that owns a coverage grid and a
//! raster surface pair, wires pointer samples into strokes, and decides
//! when the card counts as revealed.

mod config;
mod events;
mod input;
mod ops;
#[allow(clippy::module_inception)]
mod session;

pub use config::{ScratchConfig, ThresholdMode};
pub use events::SessionHooks;
pub use input::InputContext;
pub use ops::{Operation, OperationOutput};
pub use session::{
    await_all, Completion, PointerKind, PointerSample, ScratchSession, SessionState,
};
