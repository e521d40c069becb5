//! The reveal session state machine

use tokio::sync::watch;

use crate::coverage::CoverageGrid;
use crate::errors::{Result, ScratchError};
use crate::geometry::Point;
use crate::session::{
    InputContext, Operation, OperationOutput, ScratchConfig, SessionHooks, ThresholdMode,
};
use crate::stroke::{apply_stroke, rasterize_segment, Brush};
use crate::surface::{self, probe_coverage, Background, ScratchSurface};

/// Interaction state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Pointer handling detached; coverage state untouched
    Disabled,
    /// Accepting pointer samples
    Enabled,
    /// Revealed; only `reset` leads back to Enabled
    Complete,
}

/// How a pointer sample was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Continuous movement; only scratches while the pointer is pressed
    Move,
    /// Discrete click/tap; always scratches
    Click,
}

/// One pointer event in surface-relative coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pos: Point,
    pub kind: PointerKind,
}

impl PointerSample {
    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            kind: PointerKind::Move,
        }
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            kind: PointerKind::Click,
        }
    }
}

/// Single-resolution future for session completion
#[derive(Debug, Clone)]
pub struct Completion {
    rx: watch::Receiver<bool>,
}

impl Completion {
    /// Resolves once the session reaches Complete; immediately if it
    /// already has. A session dropped mid-life resolves too, since
    /// teardown forces a full reveal.
    pub async fn wait(mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Await every given completion, the multi-card analog of a single
/// [`Completion::wait`]
pub async fn await_all<I>(completions: I)
where
    I: IntoIterator<Item = Completion>,
{
    futures::future::join_all(completions.into_iter().map(Completion::wait)).await;
}

/// A scratch-card session: one coverage grid + raster surface pair and
/// the state machine governing interaction and completion.
pub struct ScratchSession {
    config: ScratchConfig,
    brush: Brush,
    threshold: f64,
    state: SessionState,
    surface: Box<dyn ScratchSurface>,
    /// `None` when pixel inspection is unavailable (degraded mode)
    grid: Option<CoverageGrid>,
    /// Baseline count of scratchable pixels reported by the surface
    scratchable_px: usize,
    /// Last gesture position; seeds the next segment
    last_pos: Option<Point>,
    input: InputContext,
    hooks: SessionHooks,
    completed_tx: watch::Sender<bool>,
    completed_rx: watch::Receiver<bool>,
    destroyed: bool,
}

impl ScratchSession {
    /// Build the built-in surface from the configured background, wait
    /// for the fill to be ready and enter Enabled. This is the only
    /// suspension point in a session's life.
    pub async fn bind(
        config: ScratchConfig,
        hooks: SessionHooks,
        input: InputContext,
        target_width: u32,
        target_height: u32,
    ) -> Result<Self> {
        config.validate()?;
        let (width, height) = config.resolve_extent(target_width, target_height)?;
        let background = Background::parse(&config.background)?;
        let prepared = surface::prepare(&background, width, height).await?;
        Self::bind_with_surface(config, hooks, input, prepared.surface, prepared.eligibility)
    }

    /// Bind to an already-filled host surface. Degraded click-to-reveal
    /// mode is entered when the surface cannot report pixel coverage.
    pub fn bind_with_surface(
        config: ScratchConfig,
        hooks: SessionHooks,
        input: InputContext,
        surface: Box<dyn ScratchSurface>,
        eligibility: Option<Vec<bool>>,
    ) -> Result<Self> {
        config.validate()?;
        if surface.width() == 0 || surface.height() == 0 {
            return Err(ScratchError::Configuration(format!(
                "target surface has zero dimensions ({}x{})",
                surface.width(),
                surface.height()
            )));
        }

        let coverage = probe_coverage(surface.as_ref());
        let grid = coverage.map(|_| {
            CoverageGrid::new(surface.width(), surface.height(), eligibility.as_deref())
        });
        let (completed_tx, completed_rx) = watch::channel(false);

        let mut session = Self {
            brush: Brush::new(config.brush_radius, config.brush_shape),
            threshold: config.threshold(),
            config,
            state: SessionState::Disabled,
            surface,
            grid,
            scratchable_px: coverage.unwrap_or(0),
            last_pos: None,
            input,
            hooks,
            completed_tx,
            completed_rx,
            destroyed: false,
        };
        tracing::info!(
            "session bound: {}x{}, {} scratchable px, degraded={}",
            session.surface.width(),
            session.surface.height(),
            session.scratchable_px,
            session.grid.is_none(),
        );
        session.enable()?;
        Ok(session)
    }

    /// Current interaction state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session runs without per-pixel coverage
    pub fn is_degraded(&self) -> bool {
        self.grid.is_none()
    }

    /// Baseline count of scratchable pixels (0 in degraded mode)
    pub fn scratchable_px(&self) -> usize {
        self.scratchable_px
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            return Err(ScratchError::SessionDestroyed);
        }
        Ok(())
    }

    fn has_completed(&self) -> bool {
        *self.completed_rx.borrow()
    }

    /// Whether the configured completion test passes on the current
    /// grid state. Uniform compares inclusively, center-weighted
    /// strictly.
    fn threshold_met(&self) -> bool {
        match &self.grid {
            None => false,
            Some(grid) => match self.config.threshold_mode {
                ThresholdMode::Uniform => grid.simple_ratio() >= self.threshold,
                ThresholdMode::CenterWeighted => grid.weighted_ratio() > self.threshold,
            },
        }
    }

    /// Whether the card counts as revealed
    pub fn is_revealed(&self) -> bool {
        self.has_completed() || self.threshold_met()
    }

    /// Uncovered-over-eligible reveal fraction; binary in degraded mode
    pub fn ratio(&self) -> f64 {
        match &self.grid {
            Some(grid) => grid.simple_ratio(),
            None => {
                if self.has_completed() {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Feed one pointer sample into the session.
    ///
    /// Move samples are ignored unless the shared input context reports
    /// the pointer pressed; clicks always scratch. Completion is
    /// evaluated once per segment, after all its dabs are applied.
    pub fn on_pointer(&mut self, sample: PointerSample) -> Result<()> {
        self.ensure_alive()?;
        if self.state != SessionState::Enabled {
            return Ok(());
        }

        if self.grid.is_none() {
            // degraded mode: a single click reveals everything
            if sample.kind == PointerKind::Click {
                self.clear(1.0);
            }
            return Ok(());
        }

        if sample.kind == PointerKind::Move && !self.input.is_pressed() {
            return Ok(());
        }

        let centers = rasterize_segment(self.last_pos, sample.pos, self.brush.radius);
        if let Some(grid) = &mut self.grid {
            let applied = apply_stroke(&centers, self.brush, grid, self.surface.as_mut());
            tracing::debug!("segment applied {applied}/{} dabs", centers.len());
        }

        // mouse-up precedes click, so a click never seeds the next segment
        if sample.kind == PointerKind::Move {
            self.last_pos = Some(sample.pos);
        }

        self.hooks.emit_scratch();

        if self.threshold_met() {
            let ratio = self.ratio();
            self.clear(ratio);
        }
        Ok(())
    }

    /// Host notification for pointer-up/leave: ends the current gesture
    pub fn pointer_released(&mut self) {
        self.last_pos = None;
    }

    /// Clear semantics: fully reveal the card and transition to
    /// Complete. `event_ratio` is what the completion notification
    /// reports, measured by the caller before the forced reveal.
    fn clear(&mut self, event_ratio: f64) {
        if let Some(grid) = &mut self.grid {
            grid.reveal_all();
        }
        let width = f64::from(self.surface.width());
        let height = f64::from(self.surface.height());
        if let Err(err) = self.surface.erase_rect(Point::new(0.0, 0.0), width, height) {
            tracing::warn!("failed to clear surface on completion: {err}");
        }
        self.state = SessionState::Complete;
        self.last_pos = None;
        let _ = self.completed_tx.send(true);
        tracing::info!("session complete at ratio {event_ratio:.3}");
        self.hooks.emit_complete(event_ratio);
    }

    /// Re-attach pointer handling. When the card is already revealed
    /// this re-enters Complete instead of accepting further input.
    pub fn enable(&mut self) -> Result<()> {
        self.ensure_alive()?;
        if self.has_completed() {
            self.state = SessionState::Complete;
        } else if self.threshold_met() {
            let ratio = self.ratio();
            self.clear(ratio);
        } else {
            self.state = SessionState::Enabled;
        }
        self.hooks.emit_enable();
        Ok(())
    }

    /// Detach pointer handling without touching coverage state. Safe
    /// mid-gesture: the in-flight stroke is simply abandoned.
    pub fn disable(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.state = SessionState::Disabled;
        self.last_pos = None;
        self.hooks.emit_disable();
        Ok(())
    }

    /// Rebuild coverage state, repaint the initial fill and re-enter
    /// Enabled. The only legal path out of Complete; re-arms the
    /// completion future.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_alive()?;
        if let Some(grid) = &mut self.grid {
            grid.reset();
        }
        self.surface.restore()?;
        if self.grid.is_some() {
            if let Ok(count) = self.surface.read_alpha_coverage() {
                self.scratchable_px = count;
            }
        }
        self.last_pos = None;
        let _ = self.completed_tx.send(false);
        self.state = SessionState::Enabled;
        self.hooks.emit_reset();
        Ok(())
    }

    /// Force Clear semantics and detach everything. The instance
    /// refuses further operations; no events fire after the teardown
    /// sequence. Safe mid-gesture.
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_alive()?;
        if !self.has_completed() {
            self.clear(1.0);
        }
        self.state = SessionState::Complete;
        self.destroyed = true;
        self.last_pos = None;
        self.hooks.detach();
        tracing::info!("session destroyed");
        Ok(())
    }

    /// Completion-await primitive: resolves once the session reaches
    /// Complete, immediately if it already has
    pub fn completion(&self) -> Completion {
        Completion {
            rx: self.completed_rx.clone(),
        }
    }

    /// Dispatch a named operation from the closed operation set
    pub fn invoke(&mut self, op: Operation) -> Result<OperationOutput> {
        match op {
            Operation::Enable => self.enable().map(|()| OperationOutput::Done),
            Operation::Disable => self.disable().map(|()| OperationOutput::Done),
            Operation::Reset => self.reset().map(|()| OperationOutput::Done),
            Operation::Destroy => self.destroy().map(|()| OperationOutput::Done),
            Operation::Ratio => Ok(OperationOutput::Ratio(self.ratio())),
        }
    }
}

impl std::fmt::Debug for ScratchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchSession")
            .field("state", &self.state)
            .field("degraded", &self.grid.is_none())
            .field("ratio", &self.ratio())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Color, Pixmap, PlainOverlay};

    fn solid_surface(width: u32, height: u32) -> Box<dyn ScratchSurface> {
        let mut pixmap = Pixmap::new(width, height);
        pixmap.fill_solid(Color::from_hex_str("#666").unwrap());
        Box::new(pixmap)
    }

    fn test_config(threshold: f64) -> ScratchConfig {
        ScratchConfig {
            completion_threshold: Some(threshold),
            ..Default::default()
        }
    }

    fn narrow_brush_config(threshold: f64) -> ScratchConfig {
        ScratchConfig {
            completion_threshold: Some(threshold),
            brush_radius: 2.0,
            ..Default::default()
        }
    }

    fn bound_session(threshold: f64) -> ScratchSession {
        ScratchSession::bind_with_surface(
            test_config(threshold),
            SessionHooks::new(),
            InputContext::new(),
            solid_surface(10, 10),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_session_starts_enabled() {
        let session = bound_session(0.5);
        assert_eq!(session.state(), SessionState::Enabled);
        assert!(!session.is_degraded());
        assert_eq!(session.scratchable_px(), 100);
        assert_eq!(session.ratio(), 0.0);
    }

    #[test]
    fn test_uniform_threshold_is_inclusive() {
        let mut session = bound_session(0.5);

        // 49 of 100 cells: not revealed
        let grid = session.grid.as_mut().unwrap();
        grid.mark_uncovered((0..49).map(|i| (i % 10, i / 10)));
        assert!(!session.is_revealed());

        // the 50th cell meets the threshold exactly
        let grid = session.grid.as_mut().unwrap();
        grid.mark_uncovered([(9, 4)]);
        assert!(session.is_revealed());
    }

    #[test]
    fn test_weighted_threshold_is_strict() {
        // the dead-center cell of a 10x10 grid has weight exactly 1,
        // so one uncovered center cell gives a weighted ratio of 1/100
        let mut session = ScratchSession::bind_with_surface(
            ScratchConfig {
                completion_threshold: Some(1.0 / 100.0),
                threshold_mode: ThresholdMode::CenterWeighted,
                ..Default::default()
            },
            SessionHooks::new(),
            InputContext::new(),
            solid_surface(10, 10),
            None,
        )
        .unwrap();

        let grid = session.grid.as_mut().unwrap();
        grid.mark_uncovered([(5, 5)]);
        // exactly at the threshold: strict comparison, not revealed
        assert!(!session.is_revealed());

        let grid = session.grid.as_mut().unwrap();
        grid.mark_uncovered([(5, 4)]);
        assert!(session.is_revealed());
    }

    #[test]
    fn test_hover_moves_are_ignored() {
        let input = InputContext::new();
        let mut session = ScratchSession::bind_with_surface(
            test_config(0.5),
            SessionHooks::new(),
            input.clone(),
            solid_surface(10, 10),
            None,
        )
        .unwrap();

        session.on_pointer(PointerSample::moved(5.0, 5.0)).unwrap();
        assert_eq!(session.ratio(), 0.0);

        input.pointer_down();
        session.on_pointer(PointerSample::moved(5.0, 5.0)).unwrap();
        assert!(session.ratio() > 0.0);
    }

    #[test]
    fn test_click_scratches_without_pointer_down() {
        let mut session = ScratchSession::bind_with_surface(
            narrow_brush_config(0.99),
            SessionHooks::new(),
            InputContext::new(),
            solid_surface(10, 10),
            None,
        )
        .unwrap();
        session.on_pointer(PointerSample::click(5.0, 5.0)).unwrap();
        assert!(session.ratio() > 0.0);
        assert_eq!(session.state(), SessionState::Enabled);
        // clicks never seed a segment
        assert!(session.last_pos.is_none());
    }

    #[test]
    fn test_drag_completes_session() {
        let input = InputContext::new();
        let mut session = ScratchSession::bind_with_surface(
            ScratchConfig {
                completion_threshold: Some(0.3),
                brush_radius: 8.0,
                ..Default::default()
            },
            SessionHooks::new(),
            input.clone(),
            solid_surface(20, 20),
            None,
        )
        .unwrap();

        input.pointer_down();
        session.on_pointer(PointerSample::moved(0.0, 10.0)).unwrap();
        session.on_pointer(PointerSample::moved(20.0, 10.0)).unwrap();

        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.ratio(), 1.0);
        // further input is ignored
        session.on_pointer(PointerSample::moved(5.0, 5.0)).unwrap();
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[test]
    fn test_disable_preserves_coverage() {
        let input = InputContext::new();
        let mut session = ScratchSession::bind_with_surface(
            narrow_brush_config(0.99),
            SessionHooks::new(),
            input.clone(),
            solid_surface(10, 10),
            None,
        )
        .unwrap();

        input.pointer_down();
        session.on_pointer(PointerSample::moved(5.0, 5.0)).unwrap();
        let ratio = session.ratio();
        assert!(ratio > 0.0);

        session.disable().unwrap();
        assert_eq!(session.state(), SessionState::Disabled);
        assert_eq!(session.ratio(), ratio);

        // samples are inert while disabled
        session.on_pointer(PointerSample::moved(9.0, 9.0)).unwrap();
        assert_eq!(session.ratio(), ratio);

        session.enable().unwrap();
        assert_eq!(session.state(), SessionState::Enabled);
    }

    #[test]
    fn test_enable_after_complete_stays_complete() {
        let mut session = bound_session(0.5);
        let grid = session.grid.as_mut().unwrap();
        grid.mark_uncovered((0..50).map(|i| (i % 10, i / 10)));
        session.on_pointer(PointerSample::click(0.0, 0.0)).unwrap();
        assert_eq!(session.state(), SessionState::Complete);

        session.disable().unwrap();
        session.enable().unwrap();
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[test]
    fn test_reset_rearms_session() {
        let mut session = bound_session(0.01);
        session.on_pointer(PointerSample::click(5.0, 5.0)).unwrap();
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.ratio(), 1.0);

        session.reset().unwrap();
        assert_eq!(session.state(), SessionState::Enabled);
        assert_eq!(session.ratio(), 0.0);
        assert!(!session.is_revealed());
        assert_eq!(session.scratchable_px(), 100);

        // scratching works again
        session.on_pointer(PointerSample::click(5.0, 5.0)).unwrap();
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[test]
    fn test_destroy_forces_full_reveal() {
        let input = InputContext::new();
        let mut session = ScratchSession::bind_with_surface(
            narrow_brush_config(0.99),
            SessionHooks::new(),
            input.clone(),
            solid_surface(10, 10),
            None,
        )
        .unwrap();

        input.pointer_down();
        session.on_pointer(PointerSample::moved(2.0, 2.0)).unwrap();
        assert!(session.ratio() < 1.0);
        session.destroy().unwrap();

        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.ratio(), 1.0);
        assert!(matches!(
            session.enable(),
            Err(ScratchError::SessionDestroyed)
        ));
        assert!(matches!(
            session.on_pointer(PointerSample::click(1.0, 1.0)),
            Err(ScratchError::SessionDestroyed)
        ));
        // ratio stays readable after teardown
        assert!(matches!(
            session.invoke(Operation::Ratio),
            Ok(OperationOutput::Ratio(r)) if (r - 1.0).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn test_degraded_mode_click_reveals() {
        let mut session = ScratchSession::bind_with_surface(
            ScratchConfig::default(),
            SessionHooks::new(),
            InputContext::new(),
            Box::new(PlainOverlay::new(100, 50)),
            None,
        )
        .unwrap();

        assert!(session.is_degraded());
        assert_eq!(session.ratio(), 0.0);

        // moves are inert in degraded mode, even while pressed
        session.on_pointer(PointerSample::moved(10.0, 10.0)).unwrap();
        assert_eq!(session.state(), SessionState::Enabled);

        session.on_pointer(PointerSample::click(10.0, 10.0)).unwrap();
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.ratio(), 1.0);
    }

    #[test]
    fn test_unknown_operation_name_is_typed_error() {
        let err = "vanish".parse::<Operation>().unwrap_err();
        assert!(matches!(err, ScratchError::UnsupportedOperation(_)));
    }
}
