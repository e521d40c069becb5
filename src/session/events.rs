//! Lifecycle notification hooks
//!
//! Fire-and-forget callbacks mirroring the classic event set: `enable`,
//! `disable`, `scratch`, `complete(ratio)`, `reset`. No return values
//! are expected and the session never waits on them.

type Hook = Box<dyn FnMut() + Send>;
type RatioHook = Box<dyn FnMut(f64) + Send>;

/// The five lifecycle callbacks a host can attach to a session
#[derive(Default)]
pub struct SessionHooks {
    on_enable: Option<Hook>,
    on_disable: Option<Hook>,
    on_scratch: Option<Hook>,
    on_complete: Option<RatioHook>,
    on_reset: Option<Hook>,
}

impl SessionHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called whenever the session (re-)enters Enabled
    pub fn on_enable(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_enable = Some(Box::new(hook));
        self
    }

    /// Called when pointer handling is detached
    pub fn on_disable(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_disable = Some(Box::new(hook));
        self
    }

    /// Called once per applied stroke segment
    pub fn on_scratch(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_scratch = Some(Box::new(hook));
        self
    }

    /// Called once when the session reaches Complete, with the reveal
    /// ratio at that moment
    pub fn on_complete(mut self, hook: impl FnMut(f64) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Called after a reset rebuilt the coverage state
    pub fn on_reset(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_reset = Some(Box::new(hook));
        self
    }

    pub(crate) fn emit_enable(&mut self) {
        if let Some(hook) = &mut self.on_enable {
            hook();
        }
    }

    pub(crate) fn emit_disable(&mut self) {
        if let Some(hook) = &mut self.on_disable {
            hook();
        }
    }

    pub(crate) fn emit_scratch(&mut self) {
        if let Some(hook) = &mut self.on_scratch {
            hook();
        }
    }

    pub(crate) fn emit_complete(&mut self, ratio: f64) {
        if let Some(hook) = &mut self.on_complete {
            hook(ratio);
        }
    }

    pub(crate) fn emit_reset(&mut self) {
        if let Some(hook) = &mut self.on_reset {
            hook();
        }
    }

    /// Drop every hook so nothing fires after teardown
    pub(crate) fn detach(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Debug for SessionHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHooks")
            .field("on_enable", &self.on_enable.is_some())
            .field("on_disable", &self.on_disable.is_some())
            .field("on_scratch", &self.on_scratch.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_reset", &self.on_reset.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_hooks_fire_and_detach() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let mut hooks = SessionHooks::new().on_scratch(move || {
            seen.fetch_add(1, Ordering::Relaxed);
        });

        hooks.emit_scratch();
        hooks.emit_scratch();
        assert_eq!(count.load(Ordering::Relaxed), 2);

        hooks.detach();
        hooks.emit_scratch();
        assert_eq!(count.load(Ordering::Relaxed), 2);
    }
}
