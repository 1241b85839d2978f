//! Point snapping to candidate snap points of other shapes.

use crate::shapes::{Shape, ShapeId};
use kurbo::Point;

/// A point that can be snapped to on a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    /// The snap point location.
    pub point: Point,
    /// Type of snap target for visual feedback.
    pub kind: SnapTargetKind,
}

impl SnapTarget {
    pub fn new(point: Point, kind: SnapTargetKind) -> Self {
        Self { point, kind }
    }
}

/// Type of snap target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTargetKind {
    /// Corner/vertex of a shape.
    Corner,
    /// Midpoint of an edge.
    Midpoint,
    /// Center of a shape.
    Center,
    /// Point on an edge.
    Edge,
}

/// Result of a point snap.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// The target snapped to, if any.
    pub target: Option<SnapTarget>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            target: None,
        }
    }

    /// Check if snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.target.is_some()
    }
}

/// Collect the candidate snap points of every shape except `exclude`.
pub fn collect_targets(shapes: &[Shape], exclude: Option<ShapeId>) -> Vec<SnapTarget> {
    shapes
        .iter()
        .filter(|shape| Some(shape.id()) != exclude)
        .flat_map(Shape::snap_points)
        .collect()
}

/// Snap a point to the nearest target within `radius`.
pub fn snap_to_targets(point: Point, targets: &[SnapTarget], radius: f64) -> SnapResult {
    let mut best_target: Option<&SnapTarget> = None;
    let mut best_dist_sq = radius * radius;

    for target in targets {
        let dist_sq = (point - target.point).hypot2();
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best_target = Some(target);
        }
    }

    match best_target {
        Some(target) => SnapResult {
            point: target.point,
            target: Some(*target),
        },
        None => SnapResult::none(point),
    }
}
