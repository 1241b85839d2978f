//! Canvas document and the interactive canvas that ties gestures to snapping.

use crate::config::{BoardConfig, ConfigResult};
use crate::gesture::{GestureCoordinator, GestureEvent, GestureRecord, GestureRecorder};
use crate::hit_test;
use crate::input::{PointerEvent, PointerSignal, PointerTracker};
use crate::schedule::Instant;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use crate::snap::{GuideLine, SnapEngine, collect_targets};
use crate::tools::ToolKind;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Smallest width or height a resize leaves on a box shape.
const MIN_RESIZE_SIZE: f64 = 1.0;
/// Created shapes smaller than this on both axes are discarded.
const MIN_CREATE_SIZE: f64 = 2.0;

/// All shapes on a canvas, back to front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    shapes: Vec<Shape>,
}

impl CanvasDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of all others.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        Some(self.shapes.remove(index))
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Shapes in draw order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The topmost shape containing `point`.
    pub fn topmost_at(&self, point: Point, line_tolerance: f64) -> Option<&Shape> {
        hit_test::topmost_hit(&self.shapes, point, line_tolerance)
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Geometry captured when a gesture starts.
#[derive(Debug, Clone)]
struct GestureOrigin {
    shape: Shape,
    pointer: Point,
}

/// An interactive canvas: document, selection, gesture recognition and snapping.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub document: CanvasDocument,
    selected: Option<ShapeId>,
    tool: ToolKind,
    snap: SnapEngine,
    gestures: GestureCoordinator<GestureRecorder>,
    pointer: PointerTracker,
    origin: Option<GestureOrigin>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::from_parts(
            CanvasDocument::default(),
            SnapEngine::default(),
            GestureCoordinator::default(),
            BoardConfig::default().gesture.drag_slop,
        )
    }
}

impl Canvas {
    /// Create an empty canvas with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(document: CanvasDocument, config: BoardConfig) -> ConfigResult<Self> {
        let drag_slop = config.gesture.drag_slop;
        let snap = SnapEngine::new(config.snap)?;
        let gestures = GestureCoordinator::with_config(GestureRecorder::new(), config.gesture)?;
        Ok(Self::from_parts(document, snap, gestures, drag_slop))
    }

    fn from_parts(
        document: CanvasDocument,
        snap: SnapEngine,
        gestures: GestureCoordinator<GestureRecorder>,
        drag_slop: f64,
    ) -> Self {
        Self {
            document,
            selected: None,
            tool: ToolKind::default(),
            snap,
            gestures,
            pointer: PointerTracker::new(drag_slop),
            origin: None,
        }
    }

    /// Set the visible extent that guide lines span.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.snap.set_canvas_size(Size::new(width, height));
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn select(&mut self, id: ShapeId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn snap_engine(&self) -> &SnapEngine {
        &self.snap
    }

    /// Guide lines to draw this frame.
    pub fn guide_lines(&self) -> &[GuideLine] {
        self.snap.guide_lines()
    }

    /// The gesture in progress.
    pub fn gesture(&self) -> &GestureRecord {
        self.gestures.record()
    }

    /// Feed one pointer event through gesture recognition and apply the result.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, now: Instant) {
        for signal in self.pointer.handle(event) {
            match signal {
                PointerSignal::Down(position) => {
                    self.gestures
                        .pointer_down(position, self.document.shapes(), self.selected);
                }
                PointerSignal::DragStart(_) => self.gestures.drag_start(),
                PointerSignal::DragUpdate(position) => self.gestures.drag_update(position),
                PointerSignal::DragEnd(position) => self.gestures.drag_end(position),
                PointerSignal::Tap(_) => self.gestures.tap(),
            }
            for gesture in self.gestures.handler_mut().drain() {
                self.apply(gesture, now);
            }
        }
    }

    fn apply(&mut self, gesture: GestureEvent, now: Instant) {
        match gesture {
            GestureEvent::Tap(position) => {
                let line_tolerance = self.gestures.config().line_hit_tolerance;
                self.selected = self
                    .document
                    .topmost_at(position, line_tolerance)
                    .map(Shape::id);
                log::debug!("Selection: {:?}", self.selected);
            }
            GestureEvent::DragStart { position, target } => {
                self.selected = Some(target);
                self.snap.start_drag();
                self.begin(target, position);
            }
            GestureEvent::DragUpdate(position) => self.drag_to(position, now),
            GestureEvent::DragEnd(_) => {
                self.snap.end_drag();
                self.origin = None;
            }
            GestureEvent::ResizeStart { position, target } => self.begin(target, position),
            GestureEvent::ResizeUpdate(position) => self.resize_to(position),
            GestureEvent::ResizeEnd(_) => self.origin = None,
            GestureEvent::CreateStart(position) => {
                let shape = Shape::from_corners(self.tool.shape_kind(), position, position);
                log::debug!("Creating {:?} {}", shape.kind, shape.id());
                self.origin = Some(GestureOrigin {
                    shape: shape.clone(),
                    pointer: position,
                });
                self.document.add_shape(shape);
            }
            GestureEvent::CreateUpdate(position) => self.create_to(position),
            GestureEvent::CreateEnd(_) => self.finish_create(),
        }
    }

    fn begin(&mut self, target: ShapeId, pointer: Point) {
        self.origin = match self.document.get_shape(target) {
            Some(shape) => Some(GestureOrigin {
                shape: shape.clone(),
                pointer,
            }),
            None => {
                log::warn!("Gesture target {target} is not on the canvas");
                None
            }
        };
    }

    fn drag_to(&mut self, pointer: Point, now: Instant) {
        let Some(origin) = &self.origin else {
            return;
        };
        let id = origin.shape.id();
        let raw = origin.shape.position + (pointer - origin.pointer);
        let moving = self
            .document
            .get_shape(id)
            .cloned()
            .unwrap_or_else(|| origin.shape.clone());

        let position = self
            .snap
            .resolve_position(raw, self.document.shapes(), &moving);
        log::trace!("Drag {id} to ({:.1}, {:.1})", position.x, position.y);

        if let Some(shape) = self.document.get_shape_mut(id) {
            shape.position = position;
        }
        self.snap
            .visible_guide_lines(self.document.shapes(), &moving.with_position(position), now);
    }

    fn resize_to(&mut self, pointer: Point) {
        let Some(origin) = &self.origin else {
            return;
        };
        let start = &origin.shape;
        let end = start.end() + (pointer - origin.pointer);
        let (mut width, mut height) = (end.x - start.position.x, end.y - start.position.y);
        if start.kind != ShapeKind::Line {
            width = width.max(MIN_RESIZE_SIZE);
            height = height.max(MIN_RESIZE_SIZE);
        }

        if let Some(shape) = self.document.get_shape_mut(start.id()) {
            shape.width = width;
            shape.height = height;
        }
    }

    fn create_to(&mut self, pointer: Point) {
        let Some(origin) = &self.origin else {
            return;
        };
        let id = origin.shape.id();
        let targets = collect_targets(self.document.shapes(), Some(id));
        let corner = self.snap.snap_to_targets(pointer, &targets).point;

        let mut created = Shape::from_corners(origin.shape.kind, origin.pointer, corner);
        created.id = id;
        if let Some(shape) = self.document.get_shape_mut(id) {
            *shape = created;
        }
    }

    fn finish_create(&mut self) {
        let Some(origin) = self.origin.take() else {
            return;
        };
        let id = origin.shape.id();
        let Some(shape) = self.document.get_shape(id) else {
            return;
        };

        if shape.width.abs() < MIN_CREATE_SIZE && shape.height.abs() < MIN_CREATE_SIZE {
            log::debug!("Discarding degenerate {:?} {id}", shape.kind);
            self.document.remove_shape(id);
        } else {
            log::debug!("Created {:?} {id}", shape.kind);
            self.selected = Some(id);
        }
    }

    /// Advance deferred work. Returns true if guide lines were cleared.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.snap.poll(now)
    }

    /// When [`Canvas::poll`] next has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.snap.next_deadline()
    }

    /// Tear the canvas down. Pending guide fades never fire afterwards.
    pub fn dispose(&mut self) {
        self.snap.dispose();
        self.gestures.reset();
        self.origin = None;
    }
}
