//! Per-drag snap state.

use super::GuideLine;
use crate::schedule::DeferredTask;
use kurbo::{Point, Vec2};

/// Mutable state the engine carries across the calls of one drag.
#[derive(Debug, Clone, Default)]
pub(crate) struct DragSession {
    /// Last position handed back to the caller.
    pub last_position: Option<Point>,
    /// Position the shape is locked to, if any.
    pub lock: Option<Point>,
    /// Raw movement accumulated since the lock engaged.
    pub displacement: Vec2,
    pub strength: f64,
    pub snapped: bool,
    /// Guide lines currently shown.
    pub guides: Vec<GuideLine>,
    pub fade: DeferredTask,
}

impl DragSession {
    pub fn engage_lock(&mut self, at: Point) {
        self.lock = Some(at);
        self.displacement = Vec2::ZERO;
    }

    pub fn release_lock(&mut self) {
        self.lock = None;
        self.displacement = Vec2::ZERO;
    }

    /// Forget everything, cancelling a pending fade.
    pub fn reset(&mut self) {
        // The fade task keeps its generation so tokens handed out earlier stay stale.
        let mut fade = std::mem::take(&mut self.fade);
        fade.cancel();
        *self = Self {
            fade,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Instant;

    #[test]
    fn test_reset_keeps_old_tokens_stale() {
        let mut session = DragSession::default();
        let token = session.fade.schedule(Instant::now());
        session.engage_lock(Point::new(1.0, 2.0));
        session.reset();

        assert!(session.lock.is_none());
        assert!(!session.fade.is_pending());
        session.fade.schedule(Instant::now());
        assert!(!session.fade.is_current(token));
    }

    #[test]
    fn test_release_clears_displacement() {
        let mut session = DragSession::default();
        session.engage_lock(Point::new(1.0, 2.0));
        session.displacement = Vec2::new(3.0, 4.0);
        session.release_lock();
        assert!(session.lock.is_none());
        assert_eq!(session.displacement, Vec2::ZERO);
    }
}
