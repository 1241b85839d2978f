//! Shape definitions for the canvas.
//!
//! Shapes are plain data: an id, a top-left position, a size and a kind.
//! Everything the snap engine and hit testing need (bounds, center, edge
//! descriptors, candidate snap points) is derived on demand and never cached.

mod circle;
mod line;
mod rectangle;

use crate::snap::SnapTarget;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    /// A straight segment from `position` to `position + (width, height)`.
    Line,
    /// Placeholder without geometry; never hit, still has bounds.
    None,
}

/// Alignment axis of an edge descriptor.
///
/// A `Horizontal` edge is a horizontal line, so two horizontal edges are
/// compared by their y coordinate. `Vertical` edges are compared by x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapAxis {
    Horizontal,
    Vertical,
}

/// Which edge (or center line) of a shape's bounds an edge descriptor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Top,
    Bottom,
    Left,
    Right,
    CenterHorizontal,
    CenterVertical,
}

impl EdgeKind {
    /// All edge kinds, in the order they are enumerated when matching.
    pub const ALL: [EdgeKind; 6] = [
        EdgeKind::Top,
        EdgeKind::Bottom,
        EdgeKind::Left,
        EdgeKind::Right,
        EdgeKind::CenterHorizontal,
        EdgeKind::CenterVertical,
    ];

    /// The axis this edge aligns on.
    pub fn axis(self) -> SnapAxis {
        match self {
            EdgeKind::Top | EdgeKind::Bottom | EdgeKind::CenterHorizontal => SnapAxis::Horizontal,
            EdgeKind::Left | EdgeKind::Right | EdgeKind::CenterVertical => SnapAxis::Vertical,
        }
    }
}

/// An edge descriptor: a point on the edge, its kind and its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapEdge {
    /// Midpoint of the edge (the center point for center lines).
    pub position: Point,
    pub kind: EdgeKind,
    pub axis: SnapAxis,
}

impl SnapEdge {
    fn new(kind: EdgeKind, position: Point) -> Self {
        Self {
            position,
            kind,
            axis: kind.axis(),
        }
    }

    /// The coordinate compared when aligning: y for horizontal edges, x for vertical ones.
    pub fn coordinate(&self) -> f64 {
        match self.axis {
            SnapAxis::Horizontal => self.position.y,
            SnapAxis::Vertical => self.position.x,
        }
    }
}

/// A shape on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Top-left position (start point for lines).
    pub position: Point,
    /// Width (signed for lines).
    pub width: f64,
    /// Height (signed for lines).
    pub height: f64,
    /// Kind of shape.
    pub kind: ShapeKind,
}

impl Shape {
    /// Create a new shape with a fresh id.
    pub fn new(kind: ShapeKind, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            kind,
        }
    }

    /// Create a rectangle.
    pub fn rectangle(position: Point, width: f64, height: f64) -> Self {
        Self::new(ShapeKind::Rectangle, position, width, height)
    }

    /// Create a circle from its center and radius.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(
            ShapeKind::Circle,
            Point::new(center.x - radius, center.y - radius),
            radius * 2.0,
            radius * 2.0,
        )
    }

    /// Create a line segment.
    pub fn line(start: Point, end: Point) -> Self {
        Self::new(ShapeKind::Line, start, end.x - start.x, end.y - start.y)
    }

    /// Create a shape spanning two points.
    ///
    /// Lines keep their direction (`p1` is the start). Other kinds are
    /// normalized so that `position` is the top-left corner.
    pub fn from_corners(kind: ShapeKind, p1: Point, p2: Point) -> Self {
        match kind {
            ShapeKind::Line => Self::line(p1, p2),
            _ => {
                let min_x = p1.x.min(p2.x);
                let min_y = p1.y.min(p2.y);
                let width = (p2.x - p1.x).abs();
                let height = (p2.y - p1.y).abs();
                Self::new(kind, Point::new(min_x, min_y), width, height)
            }
        }
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// The point opposite to `position` (end point for lines).
    pub fn end(&self) -> Point {
        Point::new(self.position.x + self.width, self.position.y + self.height)
    }

    /// Axis-aligned bounding box (always normalized).
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.position, self.end())
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// The six edge descriptors, in [`EdgeKind::ALL`] order.
    pub fn edges(&self) -> [SnapEdge; 6] {
        let b = self.bounds();
        let c = b.center();
        EdgeKind::ALL.map(|kind| {
            let position = match kind {
                EdgeKind::Top => Point::new(c.x, b.y0),
                EdgeKind::Bottom => Point::new(c.x, b.y1),
                EdgeKind::Left => Point::new(b.x0, c.y),
                EdgeKind::Right => Point::new(b.x1, c.y),
                EdgeKind::CenterHorizontal | EdgeKind::CenterVertical => c,
            };
            SnapEdge::new(kind, position)
        })
    }

    /// Kind-specific candidate snap points.
    pub fn snap_points(&self) -> Vec<SnapTarget> {
        match self.kind {
            ShapeKind::Rectangle => rectangle::snap_targets(self.bounds()),
            ShapeKind::Circle => {
                circle::snap_targets(self.center(), circle::radius(self.width, self.height))
            }
            ShapeKind::Line => line::snap_targets(self.position, self.end()),
            ShapeKind::None => Vec::new(),
        }
    }

    /// Check if a point lies inside the shape.
    ///
    /// `line_tolerance` is only used for lines, which have no interior.
    pub fn contains(&self, point: Point, line_tolerance: f64) -> bool {
        match self.kind {
            ShapeKind::Rectangle => rectangle::contains(self.bounds(), point),
            ShapeKind::Circle => circle::contains(
                self.center(),
                circle::radius(self.width, self.height),
                point,
            ),
            ShapeKind::Line => line::contains(self.position, self.end(), point, line_tolerance),
            ShapeKind::None => false,
        }
    }

    /// A copy of this shape (same id) moved to `position`.
    pub fn with_position(&self, position: Point) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

/// Distance from a point to a line segment (a→b).
///
/// Degenerate segments fall back to the direct distance to `a`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}
