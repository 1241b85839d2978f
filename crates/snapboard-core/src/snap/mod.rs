//! Snapping: edge alignment guides for dragged shapes and point snapping
//! for free points.
//!
//! Edge alignment compares the six edge descriptors of the moving shape
//! (top, bottom, left, right and the two center lines) with the same-kind
//! descriptors of every other shape. Matches within the visual threshold
//! produce guide lines; matches within the snap threshold pull the shape.

mod engine;
mod guides;
mod session;
mod targets;

pub use engine::{DEFAULT_CANVAS_SIZE, SnapEngine};
pub use guides::{GuideLine, SnapCandidate, SnapEvaluation, guide_opacity};
pub use targets::{SnapResult, SnapTarget, SnapTargetKind, collect_targets, snap_to_targets};
