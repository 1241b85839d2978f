//! Rectangle geometry.

use crate::snap::{SnapTarget, SnapTargetKind};
use kurbo::{Point, Rect};

/// Corners and edge midpoints of a rectangle's bounds.
pub(super) fn snap_targets(bounds: Rect) -> Vec<SnapTarget> {
    let mid_x = (bounds.x0 + bounds.x1) / 2.0;
    let mid_y = (bounds.y0 + bounds.y1) / 2.0;
    vec![
        // Corners
        SnapTarget::new(Point::new(bounds.x0, bounds.y0), SnapTargetKind::Corner),
        SnapTarget::new(Point::new(bounds.x1, bounds.y0), SnapTargetKind::Corner),
        SnapTarget::new(Point::new(bounds.x1, bounds.y1), SnapTargetKind::Corner),
        SnapTarget::new(Point::new(bounds.x0, bounds.y1), SnapTargetKind::Corner),
        // Edge midpoints
        SnapTarget::new(Point::new(mid_x, bounds.y0), SnapTargetKind::Midpoint),
        SnapTarget::new(Point::new(bounds.x1, mid_y), SnapTargetKind::Midpoint),
        SnapTarget::new(Point::new(mid_x, bounds.y1), SnapTargetKind::Midpoint),
        SnapTarget::new(Point::new(bounds.x0, mid_y), SnapTargetKind::Midpoint),
    ]
}

/// Bounds containment, edges included.
pub(super) fn contains(bounds: Rect, point: Point) -> bool {
    point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
}
