//! Magnetic snapping with lock/unlock hysteresis and damping.

use super::guides::{self, GuideLine, SnapEvaluation};
use super::session::DragSession;
use super::targets::{SnapResult, SnapTarget, snap_to_targets};
use crate::config::{ConfigResult, SnapConfig};
use crate::schedule::{Instant, TaskToken};
use crate::shapes::{Shape, SnapAxis};
use kurbo::{Point, Size};

/// Canvas extent used for guide lines until the host reports its real size.
pub const DEFAULT_CANVAS_SIZE: Size = Size::new(1920.0, 1080.0);

/// Snaps a dragged shape to the edges of the other shapes.
///
/// The engine holds the state of one drag at a time: the last position it
/// returned, the lock, the current guide lines and their fade timer. Time is
/// never read internally; callers pass `now` and drive the fade through
/// [`SnapEngine::poll`].
#[derive(Debug, Clone)]
pub struct SnapEngine {
    config: SnapConfig,
    canvas_size: Size,
    session: DragSession,
    disposed: bool,
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self::from_valid(SnapConfig::default())
    }
}

impl SnapEngine {
    /// Create an engine, rejecting an inconsistent configuration.
    pub fn new(config: SnapConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: SnapConfig) -> Self {
        Self {
            config,
            canvas_size: DEFAULT_CANVAS_SIZE,
            session: DragSession::default(),
            disposed: false,
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Set the extent guide lines span.
    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Evaluate `moving` at its current position against `shapes`.
    ///
    /// `shapes` may contain `moving` itself; it is skipped by id.
    pub fn evaluate(&self, shapes: &[Shape], moving: &Shape) -> SnapEvaluation {
        guides::evaluate(&self.config, self.canvas_size, shapes, moving)
    }

    /// Resolve the position of `moving` for the raw pointer-driven position `raw`.
    pub fn resolve_position(&mut self, raw: Point, shapes: &[Shape], moving: &Shape) -> Point {
        let evaluation = self.evaluate(shapes, &moving.with_position(raw));

        if let Some(locked) = self.session.lock {
            let last = self.session.last_position.unwrap_or(raw);
            self.session.displacement += raw - last;
            if self.session.displacement.hypot() > self.config.unlock_threshold {
                log::debug!(
                    "Snap lock released at ({:.1}, {:.1}) after {:.1} units",
                    raw.x,
                    raw.y,
                    self.session.displacement.hypot()
                );
                self.session.release_lock();
            } else {
                self.session.last_position = Some(raw);
                return locked + (raw - locked) * (1.0 - self.config.locked_damping);
            }
        }

        if !evaluation.snapped {
            self.session.last_position = Some(raw);
            self.session.strength = 0.0;
            self.session.snapped = false;
            return raw;
        }

        let strength = evaluation.strength;
        let mut candidate = raw;
        if let Some(c) = evaluation.nearest_active(SnapAxis::Vertical) {
            candidate.x += c.delta * self.pull_factor(c.distance, strength);
        }
        if let Some(c) = evaluation.nearest_active(SnapAxis::Horizontal) {
            candidate.y += c.delta * self.pull_factor(c.distance, strength);
        }

        // Lock only onto an alignment the raw position has nearly reached.
        let aligned = evaluation.position;
        let engage = self.session.lock.is_none()
            && strength > self.config.lock_strength
            && (aligned - raw).hypot() < self.config.lock_max_offset;
        if engage {
            log::debug!(
                "Snap lock engaged at ({:.1}, {:.1}), strength {:.2}",
                aligned.x,
                aligned.y,
                strength
            );
            self.session.engage_lock(aligned);
        }

        let damping = if engage {
            self.config.locked_damping
        } else {
            self.config.free_damping
        };
        let result = match self.session.last_position {
            Some(last) => Point::new(
                self.damp(last.x, candidate.x, raw.x, damping),
                self.damp(last.y, candidate.y, raw.y, damping),
            ),
            None => candidate,
        };

        self.session.last_position = Some(result);
        self.session.strength = strength;
        self.session.snapped = true;
        result
    }

    /// Blend factor toward a guide `distance` away.
    fn pull_factor(&self, distance: f64, strength: f64) -> f64 {
        let factor = if distance < self.config.magnetic_threshold {
            self.config.strength_blend + strength * self.config.strong_pull_gain
        } else {
            self.config.strength_blend * (1.0 - distance / self.config.snap_threshold)
        };
        factor.clamp(0.0, 1.0)
    }

    /// Move from `last` toward `target` on one axis; tiny movements move half as far.
    fn damp(&self, last: f64, target: f64, raw: f64, damping: f64) -> f64 {
        let factor = if (raw - last).abs() < self.config.micro_movement {
            damping * 0.5
        } else {
            damping
        };
        last + (target - last) * factor
    }

    /// Preview where `moving` would go at `raw`, without touching the drag state.
    pub fn apply_magnetic_preview(&self, raw: Point, shapes: &[Shape], moving: &Shape) -> Point {
        let evaluation = self.evaluate(shapes, &moving.with_position(raw));
        let mut preview = raw;
        if let Some(c) = evaluation.nearest_visible(SnapAxis::Vertical) {
            preview.x += c.delta * self.preview_pull(c.distance);
        }
        if let Some(c) = evaluation.nearest_visible(SnapAxis::Horizontal) {
            preview.y += c.delta * self.preview_pull(c.distance);
        }

        let damping = self.config.free_damping;
        match self.session.last_position {
            Some(last) => Point::new(
                self.damp(last.x, preview.x, raw.x, damping),
                self.damp(last.y, preview.y, raw.y, damping),
            ),
            None => preview,
        }
    }

    fn preview_pull(&self, distance: f64) -> f64 {
        let config = &self.config;
        if distance < config.magnetic_threshold {
            config.preview_strong_pull * (1.0 - distance / config.magnetic_threshold)
        } else if distance < config.visual_threshold {
            config.preview_weak_pull * (1.0 - distance / config.visual_threshold)
        } else {
            0.0
        }
    }

    /// Active guide lines for `moving` at its current position.
    ///
    /// The lines are kept for rendering. While snapped, the fade-out is
    /// (re)scheduled `fade_delay` after `now`.
    pub fn visible_guide_lines(
        &mut self,
        shapes: &[Shape],
        moving: &Shape,
        now: Instant,
    ) -> Vec<GuideLine> {
        let evaluation = self.evaluate(shapes, moving);
        self.session.guides = evaluation.guide_lines();
        if evaluation.snapped && !self.disposed {
            self.session.fade.schedule(now + self.config.fade_delay());
        }
        self.session.guides.clone()
    }

    /// Run the guide fade-out if it is due. Returns true if lines were cleared.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.disposed || !self.session.fade.fire_if_due(now) {
            return false;
        }
        self.fade_guides()
    }

    /// Run the guide fade-out for a host-armed timer. Stale tokens are ignored.
    pub fn fire_fade(&mut self, token: TaskToken) -> bool {
        if self.disposed || !self.session.fade.fire(token) {
            return false;
        }
        self.fade_guides()
    }

    fn fade_guides(&mut self) -> bool {
        if self.session.snapped {
            log::trace!("Guide fade skipped, still snapped");
            return false;
        }
        if self.session.guides.is_empty() {
            return false;
        }
        log::debug!("Fading {} guide lines", self.session.guides.len());
        self.session.guides.clear();
        true
    }

    /// When the pending guide fade is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.fade.deadline()
    }

    /// Token of the pending guide fade.
    pub fn pending_fade(&self) -> Option<TaskToken> {
        self.session.fade.token()
    }

    /// Guide lines currently shown.
    pub fn guide_lines(&self) -> &[GuideLine] {
        &self.session.guides
    }

    pub fn is_locked(&self) -> bool {
        self.session.lock.is_some()
    }

    pub fn locked_position(&self) -> Option<Point> {
        self.session.lock
    }

    pub fn is_snapped(&self) -> bool {
        self.session.snapped
    }

    pub fn strength(&self) -> f64 {
        self.session.strength
    }

    /// Snap a free point (such as a creation corner) to other shapes' snap points.
    pub fn snap_to_targets(&self, point: Point, targets: &[SnapTarget]) -> SnapResult {
        snap_to_targets(point, targets, self.config.target_snap_radius)
    }

    /// Begin a drag: clear any lock left over from a previous one.
    pub fn start_drag(&mut self) {
        self.session.release_lock();
    }

    /// End a drag: clear all session state and cancel the pending fade.
    pub fn end_drag(&mut self) {
        self.session.reset();
    }

    /// Tear the engine down. Nothing is scheduled or fired afterwards.
    pub fn dispose(&mut self) {
        if !self.disposed {
            log::debug!("Snap engine disposed");
        }
        self.session.reset();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
