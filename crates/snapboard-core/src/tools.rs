//! Creation tools.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Kind of shape a create gesture draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Rectangle,
    Circle,
    Line,
}

impl ToolKind {
    pub fn shape_kind(self) -> ShapeKind {
        match self {
            ToolKind::Rectangle => ShapeKind::Rectangle,
            ToolKind::Circle => ShapeKind::Circle,
            ToolKind::Line => ShapeKind::Line,
        }
    }
}
