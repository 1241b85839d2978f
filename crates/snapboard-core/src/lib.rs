//! SnapBoard core: shapes, alignment snapping and gesture recognition for an
//! interactive 2D canvas.
//!
//! The two pieces that do the real work are independent:
//!
//! * [`SnapEngine`] aligns a dragged shape with the edges of other shapes,
//!   producing guide lines and a damped, lock-aware position.
//! * [`GestureCoordinator`] decides at pointer-down whether the user is
//!   resizing, dragging, creating or tapping, and routes the rest of the
//!   pointer stream to a [`GestureHandler`].
//!
//! [`Canvas`] wires both to a document and a selection.

pub mod canvas;
pub mod config;
pub mod gesture;
pub mod input;
pub mod schedule;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use canvas::{Canvas, CanvasDocument};
pub use config::{BoardConfig, ConfigError, ConfigResult, GestureConfig, SnapConfig};
pub use gesture::{
    GestureCoordinator, GestureEvent, GestureHandler, GestureKind, GesturePhase, GestureRecord,
    GestureRecorder, NoopHandler,
};
pub use input::{PointerEvent, PointerSignal, PointerTracker};
pub use schedule::{DeferredTask, Instant, TaskToken};
pub use shapes::{EdgeKind, Shape, ShapeId, ShapeKind, SnapAxis, SnapEdge};
pub use snap::{GuideLine, SnapCandidate, SnapEngine, SnapEvaluation, SnapTarget, SnapTargetKind};
pub use tools::ToolKind;
