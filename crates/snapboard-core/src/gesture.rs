//! Gesture disambiguation.
//!
//! A pointer-down is classified before any movement happens: a press on
//! the selected shape's resize handle is a resize, a press on a shape is a
//! drag, a press on empty canvas creates a shape. The gesture stays pending
//! until the first movement confirms it; after that, updates and the end
//! are routed to the matching [`GestureHandler`] methods.

use crate::config::{ConfigResult, GestureConfig};
use crate::hit_test;
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;

/// The disambiguated user intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureKind {
    #[default]
    None,
    Tap,
    Drag,
    Resize,
    Create,
}

/// Whether a recorded gesture has been confirmed by movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    #[default]
    Pending,
    Active,
}

/// The gesture in progress. Replaced as a whole on every transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureRecord {
    pub kind: GestureKind,
    pub phase: GesturePhase,
    /// Pointer-down position.
    pub start: Point,
    /// Shape being dragged or resized, as it was at pointer-down.
    pub target: Option<Shape>,
}

impl GestureRecord {
    fn pending(kind: GestureKind, start: Point, target: Option<Shape>) -> Self {
        Self {
            kind,
            phase: GesturePhase::Pending,
            start,
            target,
        }
    }

    fn activated(self) -> Self {
        Self {
            phase: GesturePhase::Active,
            ..self
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == GesturePhase::Active
    }

    pub fn target_id(&self) -> Option<ShapeId> {
        self.target.as_ref().map(Shape::id)
    }
}

/// Receives gesture callbacks. Every method defaults to doing nothing.
pub trait GestureHandler {
    fn on_tap(&mut self, _position: Point) {}

    fn on_drag_start(&mut self, _position: Point, _target: &Shape) {}
    fn on_drag_update(&mut self, _position: Point) {}
    fn on_drag_end(&mut self, _position: Point) {}

    fn on_resize_start(&mut self, _position: Point, _target: &Shape) {}
    fn on_resize_update(&mut self, _position: Point) {}
    fn on_resize_end(&mut self, _position: Point) {}

    fn on_create_start(&mut self, _position: Point) {}
    fn on_create_update(&mut self, _position: Point) {}
    fn on_create_end(&mut self, _position: Point) {}

    /// Resize-handle predicate used when classifying a pointer-down.
    fn hits_resize_handle(&self, shape: &Shape, point: Point, handle_size: f64) -> bool {
        hit_test::hits_resize_handle(shape, point, handle_size)
    }
}

/// A handler that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl GestureHandler for NoopHandler {}

/// A gesture callback, as queued by [`GestureRecorder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Tap(Point),
    DragStart { position: Point, target: ShapeId },
    DragUpdate(Point),
    DragEnd(Point),
    ResizeStart { position: Point, target: ShapeId },
    ResizeUpdate(Point),
    ResizeEnd(Point),
    CreateStart(Point),
    CreateUpdate(Point),
    CreateEnd(Point),
}

/// A handler that queues every callback for the host to apply later.
#[derive(Debug, Clone, Default)]
pub struct GestureRecorder {
    events: Vec<GestureEvent>,
}

impl GestureRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GestureEvent] {
        &self.events
    }

    /// Take all queued events.
    pub fn drain(&mut self) -> Vec<GestureEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GestureHandler for GestureRecorder {
    fn on_tap(&mut self, position: Point) {
        self.events.push(GestureEvent::Tap(position));
    }

    fn on_drag_start(&mut self, position: Point, target: &Shape) {
        self.events.push(GestureEvent::DragStart {
            position,
            target: target.id(),
        });
    }

    fn on_drag_update(&mut self, position: Point) {
        self.events.push(GestureEvent::DragUpdate(position));
    }

    fn on_drag_end(&mut self, position: Point) {
        self.events.push(GestureEvent::DragEnd(position));
    }

    fn on_resize_start(&mut self, position: Point, target: &Shape) {
        self.events.push(GestureEvent::ResizeStart {
            position,
            target: target.id(),
        });
    }

    fn on_resize_update(&mut self, position: Point) {
        self.events.push(GestureEvent::ResizeUpdate(position));
    }

    fn on_resize_end(&mut self, position: Point) {
        self.events.push(GestureEvent::ResizeEnd(position));
    }

    fn on_create_start(&mut self, position: Point) {
        self.events.push(GestureEvent::CreateStart(position));
    }

    fn on_create_update(&mut self, position: Point) {
        self.events.push(GestureEvent::CreateUpdate(position));
    }

    fn on_create_end(&mut self, position: Point) {
        self.events.push(GestureEvent::CreateEnd(position));
    }
}

/// State machine turning pointer signals into tap/drag/resize/create gestures.
#[derive(Debug, Clone)]
pub struct GestureCoordinator<H = NoopHandler> {
    config: GestureConfig,
    record: GestureRecord,
    handler: H,
}

impl<H: GestureHandler + Default> Default for GestureCoordinator<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<H: GestureHandler> GestureCoordinator<H> {
    /// Create a coordinator with the default hit-test configuration.
    pub fn new(handler: H) -> Self {
        Self {
            config: GestureConfig::default(),
            record: GestureRecord::default(),
            handler,
        }
    }

    pub fn with_config(handler: H, config: GestureConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            record: GestureRecord::default(),
            handler,
        })
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace every callback at once. Returns the previous handler.
    pub fn set_handler(&mut self, handler: H) -> H {
        std::mem::replace(&mut self.handler, handler)
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn record(&self) -> &GestureRecord {
        &self.record
    }

    pub fn is_active(&self) -> bool {
        self.record.is_active()
    }

    /// Classify a pointer-down. `shapes` are in draw order (last is topmost).
    ///
    /// Ignored while a gesture is active; returns the kind now recorded.
    pub fn pointer_down(
        &mut self,
        position: Point,
        shapes: &[Shape],
        selected: Option<ShapeId>,
    ) -> GestureKind {
        if self.record.is_active() {
            log::trace!("Pointer down ignored, {:?} gesture active", self.record.kind);
            return self.record.kind;
        }

        let handle_size = self.config.resize_handle_size;
        let resize_target = selected
            .and_then(|id| shapes.iter().find(|shape| shape.id() == id))
            .filter(|shape| self.handler.hits_resize_handle(shape, position, handle_size));

        self.record = if let Some(shape) = resize_target {
            GestureRecord::pending(GestureKind::Resize, position, Some(shape.clone()))
        } else if let Some(shape) =
            hit_test::topmost_hit(shapes, position, self.config.line_hit_tolerance)
        {
            GestureRecord::pending(GestureKind::Drag, position, Some(shape.clone()))
        } else {
            GestureRecord::pending(GestureKind::Create, position, None)
        };

        log::debug!(
            "Pointer down at ({:.1}, {:.1}): {:?} pending",
            position.x,
            position.y,
            self.record.kind
        );
        self.record.kind
    }

    /// First movement after pointer-down: confirm the pending gesture.
    pub fn drag_start(&mut self) {
        if self.record.kind == GestureKind::None || self.record.is_active() {
            return;
        }

        self.record = std::mem::take(&mut self.record).activated();
        let GestureRecord {
            kind,
            start,
            target,
            ..
        } = &self.record;
        log::debug!("{:?} gesture active", kind);

        match (kind, target) {
            (GestureKind::Drag, Some(shape)) => self.handler.on_drag_start(*start, shape),
            (GestureKind::Resize, Some(shape)) => self.handler.on_resize_start(*start, shape),
            (GestureKind::Create, _) => self.handler.on_create_start(*start),
            _ => {}
        }
    }

    pub fn drag_update(&mut self, position: Point) {
        if !self.record.is_active() {
            return;
        }
        match self.record.kind {
            GestureKind::Drag => self.handler.on_drag_update(position),
            GestureKind::Resize => self.handler.on_resize_update(position),
            GestureKind::Create => self.handler.on_create_update(position),
            GestureKind::None | GestureKind::Tap => {}
        }
    }

    /// Finish the active gesture. The record is reset afterwards in every case.
    pub fn drag_end(&mut self, position: Point) {
        if !self.record.is_active() {
            return;
        }
        match self.record.kind {
            GestureKind::Drag => self.handler.on_drag_end(position),
            GestureKind::Resize => self.handler.on_resize_end(position),
            GestureKind::Create => self.handler.on_create_end(position),
            GestureKind::None | GestureKind::Tap => {}
        }
        log::debug!("{:?} gesture ended", self.record.kind);
        self.reset();
    }

    /// Pointer released without movement.
    ///
    /// Reports a tap at the pointer-down position unless a resize was
    /// pending, then resets. Ignored while a gesture is active.
    pub fn tap(&mut self) {
        if self.record.is_active() {
            return;
        }
        if self.record.kind != GestureKind::Resize {
            let start = self.record.start;
            self.record = GestureRecord::pending(GestureKind::Tap, start, None);
            log::debug!("Tap at ({:.1}, {:.1})", start.x, start.y);
            self.handler.on_tap(start);
        }
        self.reset();
    }

    pub fn reset(&mut self) {
        self.record = GestureRecord::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Vec<Shape> {
        vec![
            Shape::rectangle(Point::new(0.0, 0.0), 100.0, 100.0),
            Shape::rectangle(Point::new(50.0, 50.0), 100.0, 100.0),
        ]
    }

    fn coordinator() -> GestureCoordinator<GestureRecorder> {
        GestureCoordinator::default()
    }

    #[test]
    fn test_tap_on_shape() {
        let shapes = board();
        let mut gestures = coordinator();
        let down = Point::new(20.0, 20.0);

        assert_eq!(gestures.pointer_down(down, &shapes, None), GestureKind::Drag);
        gestures.tap();

        assert_eq!(gestures.handler().events(), &[GestureEvent::Tap(down)]);
        assert_eq!(gestures.record(), &GestureRecord::default());
    }

    #[test]
    fn test_drag_lifecycle() {
        let shapes = board();
        let mut gestures = coordinator();
        let down = Point::new(20.0, 20.0);

        gestures.pointer_down(down, &shapes, None);
        assert!(!gestures.is_active());
        assert_eq!(gestures.record().target_id(), Some(shapes[0].id()));

        gestures.drag_start();
        assert!(gestures.is_active());
        gestures.drag_update(Point::new(30.0, 25.0));
        gestures.drag_end(Point::new(40.0, 30.0));

        assert_eq!(
            gestures.handler_mut().drain(),
            vec![
                GestureEvent::DragStart {
                    position: down,
                    target: shapes[0].id()
                },
                GestureEvent::DragUpdate(Point::new(30.0, 25.0)),
                GestureEvent::DragEnd(Point::new(40.0, 30.0)),
            ]
        );
        assert_eq!(gestures.record().kind, GestureKind::None);
        assert!(!gestures.is_active());
    }

    #[test]
    fn test_topmost_shape_is_dragged() {
        let shapes = board();
        let mut gestures = coordinator();
        gestures.pointer_down(Point::new(75.0, 75.0), &shapes, None);
        assert_eq!(gestures.record().target_id(), Some(shapes[1].id()));
    }

    #[test]
    fn test_resize_has_priority_over_drag() {
        let shapes = board();
        let mut gestures = coordinator();
        // (100, 100) is the first shape's resize corner and inside the second shape
        let down = Point::new(100.0, 100.0);

        assert_eq!(
            gestures.pointer_down(down, &shapes, Some(shapes[0].id())),
            GestureKind::Resize
        );
        assert_eq!(gestures.record().target_id(), Some(shapes[0].id()));

        gestures.reset();
        assert_eq!(gestures.pointer_down(down, &shapes, None), GestureKind::Drag);
    }

    #[test]
    fn test_resize_lifecycle() {
        let shapes = board();
        let mut gestures = coordinator();
        let down = Point::new(148.0, 152.0);

        gestures.pointer_down(down, &shapes, Some(shapes[1].id()));
        gestures.drag_start();
        gestures.drag_update(Point::new(160.0, 170.0));
        gestures.drag_end(Point::new(160.0, 170.0));

        assert_eq!(
            gestures.handler().events(),
            &[
                GestureEvent::ResizeStart {
                    position: down,
                    target: shapes[1].id()
                },
                GestureEvent::ResizeUpdate(Point::new(160.0, 170.0)),
                GestureEvent::ResizeEnd(Point::new(160.0, 170.0)),
            ]
        );
    }

    #[test]
    fn test_create_on_empty_canvas() {
        let shapes = board();
        let mut gestures = coordinator();
        let down = Point::new(300.0, 300.0);

        assert_eq!(gestures.pointer_down(down, &shapes, None), GestureKind::Create);
        assert!(gestures.record().target.is_none());
        gestures.drag_start();
        gestures.drag_update(Point::new(350.0, 320.0));
        gestures.drag_end(Point::new(360.0, 330.0));

        assert_eq!(
            gestures.handler().events(),
            &[
                GestureEvent::CreateStart(down),
                GestureEvent::CreateUpdate(Point::new(350.0, 320.0)),
                GestureEvent::CreateEnd(Point::new(360.0, 330.0)),
            ]
        );
    }

    #[test]
    fn test_tap_on_empty_canvas() {
        let mut gestures = coordinator();
        let down = Point::new(300.0, 300.0);
        gestures.pointer_down(down, &board(), None);
        gestures.tap();
        assert_eq!(gestures.handler().events(), &[GestureEvent::Tap(down)]);
    }

    #[test]
    fn test_tap_after_pending_resize_is_silent() {
        let shapes = board();
        let mut gestures = coordinator();
        gestures.pointer_down(Point::new(100.0, 100.0), &shapes, Some(shapes[0].id()));
        gestures.tap();
        assert!(gestures.handler().events().is_empty());
        assert_eq!(gestures.record().kind, GestureKind::None);
    }

    #[test]
    fn test_no_reentry_while_active() {
        let shapes = board();
        let mut gestures = coordinator();
        gestures.pointer_down(Point::new(20.0, 20.0), &shapes, None);
        gestures.drag_start();

        assert_eq!(
            gestures.pointer_down(Point::new(300.0, 300.0), &shapes, None),
            GestureKind::Drag
        );
        assert_eq!(gestures.record().start, Point::new(20.0, 20.0));

        // Taps are ignored too
        gestures.tap();
        assert!(gestures.is_active());
        assert!(
            !gestures
                .handler()
                .events()
                .iter()
                .any(|e| matches!(e, GestureEvent::Tap(_)))
        );
    }

    #[test]
    fn test_signals_without_gesture_are_ignored() {
        let mut gestures = coordinator();
        gestures.drag_start();
        gestures.drag_update(Point::new(1.0, 1.0));
        gestures.drag_end(Point::new(1.0, 1.0));
        assert!(gestures.handler().events().is_empty());
        assert!(!gestures.is_active());
    }

    #[test]
    fn test_update_before_activation_is_ignored() {
        let mut gestures = coordinator();
        gestures.pointer_down(Point::new(20.0, 20.0), &board(), None);
        gestures.drag_update(Point::new(25.0, 25.0));
        gestures.drag_end(Point::new(25.0, 25.0));
        assert!(gestures.handler().events().is_empty());
        // Still pending
        assert_eq!(gestures.record().kind, GestureKind::Drag);
    }

    #[test]
    fn test_set_handler_replaces_all_callbacks() {
        let mut gestures = coordinator();
        gestures.pointer_down(Point::new(20.0, 20.0), &board(), None);
        gestures.tap();

        let previous = gestures.set_handler(GestureRecorder::new());
        assert_eq!(previous.events().len(), 1);
        assert!(gestures.handler().events().is_empty());
    }

    #[test]
    fn test_noop_handler() {
        let mut gestures: GestureCoordinator = GestureCoordinator::default();
        gestures.pointer_down(Point::new(300.0, 300.0), &board(), None);
        gestures.drag_start();
        gestures.drag_end(Point::new(310.0, 310.0));
        assert!(!gestures.is_active());
    }

    #[derive(Default)]
    struct NoHandles {
        taps: usize,
    }

    impl GestureHandler for NoHandles {
        fn on_tap(&mut self, _position: Point) {
            self.taps += 1;
        }

        fn hits_resize_handle(&self, _shape: &Shape, _point: Point, _size: f64) -> bool {
            false
        }
    }

    #[test]
    fn test_host_resize_predicate() {
        let shapes = board();
        let mut gestures = GestureCoordinator::new(NoHandles::default());
        assert_eq!(
            gestures.pointer_down(Point::new(100.0, 100.0), &shapes, Some(shapes[0].id())),
            GestureKind::Drag
        );
        gestures.tap();
        assert_eq!(gestures.handler().taps, 1);
    }

    #[test]
    fn test_with_config_validates() {
        let config = GestureConfig {
            resize_handle_size: 0.0,
            ..GestureConfig::default()
        };
        assert!(GestureCoordinator::with_config(NoopHandler, config).is_err());
    }
}
