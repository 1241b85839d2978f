//! Line geometry.

use super::point_to_segment_dist;
use crate::snap::{SnapTarget, SnapTargetKind};
use kurbo::Point;

/// Start, end and midpoint.
pub(super) fn snap_targets(start: Point, end: Point) -> Vec<SnapTarget> {
    vec![
        SnapTarget::new(start, SnapTargetKind::Corner),
        SnapTarget::new(end, SnapTargetKind::Corner),
        SnapTarget::new(start.midpoint(end), SnapTargetKind::Midpoint),
    ]
}

/// Hit test against the segment with a perpendicular tolerance.
pub(super) fn contains(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    point_to_segment_dist(point, start, end) <= tolerance
}
