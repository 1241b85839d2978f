//! Edge matching and guide line generation.

use crate::config::SnapConfig;
use crate::shapes::{EdgeKind, Shape, SnapAxis, SnapEdge};
use kurbo::{Point, Size};

/// A transient alignment guide, spanning the whole canvas along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub start: Point,
    pub end: Point,
    pub axis: SnapAxis,
    /// Fades from 1 (close) to 0 (far).
    pub opacity: f64,
    /// Whether the guide is close enough to pull the shape.
    pub active: bool,
}

impl GuideLine {
    /// A guide through `edge`'s coordinate, spanning `extent` on the other axis.
    fn through(edge: &SnapEdge, extent: Size, opacity: f64, active: bool) -> Self {
        let c = edge.coordinate();
        let (start, end) = match edge.axis {
            SnapAxis::Horizontal => (Point::new(0.0, c), Point::new(extent.width, c)),
            SnapAxis::Vertical => (Point::new(c, 0.0), Point::new(c, extent.height)),
        };
        Self {
            start,
            end,
            axis: edge.axis,
            opacity,
            active,
        }
    }

    /// The coordinate the guide marks (y for horizontal guides, x for vertical ones).
    pub fn coordinate(&self) -> f64 {
        match self.axis {
            SnapAxis::Horizontal => self.start.y,
            SnapAxis::Vertical => self.start.x,
        }
    }
}

/// One visible edge match between the moving shape and another shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub guide: GuideLine,
    /// Edge kind shared by both shapes.
    pub edge: EdgeKind,
    /// Perpendicular distance between the two edges.
    pub distance: f64,
    /// Signed correction that moves the moving edge onto the guide.
    pub delta: f64,
}

/// Result of evaluating the moving shape against every other shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapEvaluation {
    /// The moving shape's position with each axis aligned to its nearest active guide.
    pub position: Point,
    /// Every visible match, in shape order then edge order.
    pub candidates: Vec<SnapCandidate>,
    /// Whether at least one guide is active.
    pub snapped: bool,
    /// Highest opacity among active guides.
    pub strength: f64,
}

impl SnapEvaluation {
    /// An evaluation without any match.
    pub fn empty(position: Point) -> Self {
        Self {
            position,
            candidates: Vec::new(),
            snapped: false,
            strength: 0.0,
        }
    }

    /// Active guide lines.
    pub fn guide_lines(&self) -> Vec<GuideLine> {
        self.candidates
            .iter()
            .filter(|c| c.guide.active)
            .map(|c| c.guide)
            .collect()
    }

    /// Nearest active candidate on `axis`. Ties keep the first one found.
    pub fn nearest_active(&self, axis: SnapAxis) -> Option<&SnapCandidate> {
        nearest(self.candidates.iter().filter(|c| c.guide.active), axis)
    }

    /// Nearest visible candidate on `axis`. Ties keep the first one found.
    pub fn nearest_visible(&self, axis: SnapAxis) -> Option<&SnapCandidate> {
        nearest(self.candidates.iter(), axis)
    }
}

fn nearest<'a>(
    candidates: impl Iterator<Item = &'a SnapCandidate>,
    axis: SnapAxis,
) -> Option<&'a SnapCandidate> {
    candidates
        .filter(|c| c.guide.axis == axis)
        .fold(None, |best: Option<&SnapCandidate>, c| match best {
            Some(b) if b.distance <= c.distance => Some(b),
            _ => Some(c),
        })
}

/// Guide opacity for an edge distance: 1 inside the magnetic zone, 0 past
/// the visual threshold, linear in between.
pub fn guide_opacity(distance: f64, config: &SnapConfig) -> f64 {
    let near = config.magnetic_threshold;
    let far = config.visual_threshold;
    if distance < near {
        1.0
    } else if distance > far || far <= near {
        0.0
    } else {
        (1.0 - (distance - near) / (far - near)).clamp(0.0, 1.0)
    }
}

/// Compare every edge of `moving` with the same-kind edge of every other shape.
pub(crate) fn evaluate(
    config: &SnapConfig,
    extent: Size,
    shapes: &[Shape],
    moving: &Shape,
) -> SnapEvaluation {
    let moving_edges = moving.edges();
    let mut candidates = Vec::new();

    for other in shapes.iter().filter(|s| s.id() != moving.id()) {
        // Both arrays are in `EdgeKind::ALL` order, so zipping pairs equal kinds only.
        for (edge, target) in moving_edges.iter().zip(other.edges().iter()) {
            let delta = target.coordinate() - edge.coordinate();
            let distance = delta.abs();
            if distance >= config.visual_threshold {
                continue;
            }
            let opacity = guide_opacity(distance, config);
            let active = distance < config.snap_threshold;
            candidates.push(SnapCandidate {
                guide: GuideLine::through(target, extent, opacity, active),
                edge: edge.kind,
                distance,
                delta,
            });
        }
    }

    let mut evaluation = SnapEvaluation::empty(moving.position);
    evaluation.candidates = candidates;
    evaluation.snapped = evaluation.candidates.iter().any(|c| c.guide.active);
    evaluation.strength = evaluation
        .candidates
        .iter()
        .filter(|c| c.guide.active)
        .map(|c| c.guide.opacity)
        .fold(0.0, f64::max);

    if let Some(c) = evaluation.nearest_active(SnapAxis::Vertical) {
        evaluation.position.x += c.delta;
    }
    if let Some(c) = evaluation.nearest_active(SnapAxis::Horizontal) {
        evaluation.position.y += c.delta;
    }

    log::trace!(
        "snap evaluation: {} candidates, snapped={}, strength={:.2}",
        evaluation.candidates.len(),
        evaluation.snapped,
        evaluation.strength
    );
    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENT: Size = Size::new(800.0, 600.0);

    fn eval(shapes: &[Shape], moving: &Shape) -> SnapEvaluation {
        evaluate(&SnapConfig::default(), EXTENT, shapes, moving)
    }

    /// A vertical zero-width line whose left, right and center edges all sit at `x`.
    fn post(x: f64) -> Shape {
        Shape::line(Point::new(x, 300.0), Point::new(x, 400.0))
    }

    fn right_edge_candidate(evaluation: &SnapEvaluation) -> Option<&SnapCandidate> {
        evaluation.candidates.iter().find(|c| c.edge == EdgeKind::Right)
    }

    #[test]
    fn test_opacity_bands() {
        let config = SnapConfig::default();
        assert!((guide_opacity(0.0, &config) - 1.0).abs() < 1e-9);
        assert!((guide_opacity(14.9, &config) - 1.0).abs() < 1e-9);
        assert!((guide_opacity(20.0, &config) - 0.75).abs() < 1e-9);
        assert!((guide_opacity(25.0, &config) - 0.5).abs() < 1e-9);
        assert!((guide_opacity(30.0, &config) - 0.25).abs() < 1e-9);
        assert!((guide_opacity(35.1, &config) - 0.0).abs() < 1e-9);
        assert!((guide_opacity(100.0, &config) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_opacity_is_monotone() {
        let config = SnapConfig::default();
        let mut previous = f64::INFINITY;
        for step in 0..500 {
            let opacity = guide_opacity(step as f64 * 0.1, &config);
            assert!(opacity <= previous);
            previous = opacity;
        }
    }

    #[test]
    fn test_active_iff_below_snap_threshold() {
        let a = Shape::rectangle(Point::new(0.0, 0.0), 100.0, 100.0);
        for (x, active) in [(110.0, true), (124.9, true), (125.0, false), (130.0, false)] {
            let evaluation = eval(&[a.clone()], &post(x));
            let candidate = right_edge_candidate(&evaluation).unwrap();
            assert_eq!(candidate.guide.active, active, "x = {x}");
            assert_eq!(evaluation.snapped, active);
        }
        let evaluation = eval(&[a], &post(140.0));
        assert!(right_edge_candidate(&evaluation).is_none());
    }

    #[test]
    fn test_guide_spans_canvas() {
        let a = Shape::rectangle(Point::new(0.0, 0.0), 100.0, 100.0);
        let evaluation = eval(&[a], &post(104.0));
        let guide = right_edge_candidate(&evaluation).unwrap().guide;
        assert_eq!(guide.axis, SnapAxis::Vertical);
        assert_eq!(guide.start, Point::new(100.0, 0.0));
        assert_eq!(guide.end, Point::new(100.0, 600.0));
        assert!((guide.coordinate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_kind_only() {
        // B's left edge sits exactly on A's right edge, but left never meets right.
        let a = Shape::rectangle(Point::new(0.0, 0.0), 100.0, 100.0);
        let b = Shape::rectangle(Point::new(100.0, 500.0), 300.0, 50.0);
        let evaluation = eval(&[a], &b);
        assert!(evaluation.candidates.is_empty());
        assert!(!evaluation.snapped);
    }

    #[test]
    fn test_never_compares_with_itself() {
        let a = Shape::rectangle(Point::new(0.0, 0.0), 100.0, 100.0);
        let evaluation = eval(&[a.clone()], &a);
        assert!(evaluation.candidates.is_empty());
    }

    #[test]
    fn test_empty_shapes() {
        let evaluation = eval(&[], &post(10.0));
        assert_eq!(evaluation, SnapEvaluation::empty(Point::new(10.0, 300.0)));
    }

    #[test]
    fn test_strength_is_max_active_opacity() {
        let a = Shape::rectangle(Point::new(0.0, 0.0), 100.0, 100.0);
        let evaluation = eval(&[a], &post(120.0));
        // Right edges 20 apart: active with opacity 0.75.
        assert!((evaluation.strength - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_adjusted_position_aligns_nearest() {
        let a = Shape::rectangle(Point::new(0.0, 0.0), 100.0, 100.0);
        let b = Shape::rectangle(Point::new(8.0, 190.0), 100.0, 20.0);
        let evaluation = eval(&[a], &b);
        // Left/right/center all 8 apart on x; nothing within reach on y.
        assert!((evaluation.position.x - 0.0).abs() < 1e-9);
        assert!((evaluation.position.y - 190.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let a = Shape::rectangle(Point::new(0.0, 0.0), 100.0, 100.0);
        let c = Shape::rectangle(Point::new(0.0, 400.0), 100.0, 100.0);
        let b = Shape::rectangle(Point::new(5.0, 200.0), 100.0, 100.0);
        let evaluation = eval(&[a, c], &b);
        let nearest = evaluation.nearest_active(SnapAxis::Vertical).unwrap();
        assert_eq!(nearest.edge, EdgeKind::Left);
        assert!(std::ptr::eq(nearest, &evaluation.candidates[0]));
    }
}
