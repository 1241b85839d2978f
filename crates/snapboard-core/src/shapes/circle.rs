//! Circle geometry.
//!
//! A circle is inscribed in its shape's bounds: the radius is half of the
//! smaller side, so a non-square size still yields a round shape.

use crate::snap::{SnapTarget, SnapTargetKind};
use kurbo::Point;

/// Radius of the circle inscribed in a `width` x `height` box.
pub(super) fn radius(width: f64, height: f64) -> f64 {
    width.abs().min(height.abs()) / 2.0
}

/// Center plus the four cardinal points.
pub(super) fn snap_targets(center: Point, radius: f64) -> Vec<SnapTarget> {
    vec![
        SnapTarget::new(center, SnapTargetKind::Center),
        SnapTarget::new(Point::new(center.x, center.y - radius), SnapTargetKind::Edge),
        SnapTarget::new(Point::new(center.x + radius, center.y), SnapTargetKind::Edge),
        SnapTarget::new(Point::new(center.x, center.y + radius), SnapTargetKind::Edge),
        SnapTarget::new(Point::new(center.x - radius, center.y), SnapTargetKind::Edge),
    ]
}

pub(super) fn contains(center: Point, radius: f64, point: Point) -> bool {
    (point - center).hypot() <= radius
}
