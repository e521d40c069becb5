//! Shared pointer-pressed state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide "pointer is currently down" flag.
///
/// Pointer press/release are global host signals, so one context is
/// created by the host's global listener and a clone handed to every
/// session. Single writer (the listener), many readers (the sessions);
/// sessions use it to ignore hover-only movement.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pressed: Arc<AtomicBool>,
}

impl InputContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer-down (mouse down / touch start)
    pub fn pointer_down(&self) {
        self.pressed.store(true, Ordering::Relaxed);
    }

    /// Record a pointer-up or pointer-leave
    pub fn pointer_up(&self) {
        self.pressed.store(false, Ordering::Relaxed);
    }

    /// Whether the pointer is currently pressed
    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::Relaxed)
    }
}
