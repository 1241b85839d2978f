//! Raw pointer events and the tracker that turns them into gesture signals.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => position,
        }
    }
}

/// What a pointer event means for gesture recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSignal {
    /// Pointer pressed.
    Down(Point),
    /// The press moved past the drag slop. Carries the pointer-down position.
    DragStart(Point),
    DragUpdate(Point),
    DragEnd(Point),
    /// Released without moving past the slop. Carries the pointer-down position.
    Tap(Point),
}

/// Tracks one pointer stream.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    drag_slop: f64,
    /// Pointer-down position while pressed.
    press: Option<Point>,
    dragging: bool,
}

impl PointerTracker {
    pub fn new(drag_slop: f64) -> Self {
        Self {
            drag_slop,
            ..Self::default()
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Process one event. A move past the slop yields both `DragStart` and
    /// the first `DragUpdate`.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<PointerSignal> {
        match event {
            PointerEvent::Down { position } => {
                self.press = Some(position);
                self.dragging = false;
                vec![PointerSignal::Down(position)]
            }
            PointerEvent::Move { position } => {
                let Some(start) = self.press else {
                    return Vec::new();
                };
                if self.dragging {
                    vec![PointerSignal::DragUpdate(position)]
                } else if (position - start).hypot() > self.drag_slop {
                    self.dragging = true;
                    vec![
                        PointerSignal::DragStart(start),
                        PointerSignal::DragUpdate(position),
                    ]
                } else {
                    Vec::new()
                }
            }
            PointerEvent::Up { position } => {
                let Some(start) = self.press.take() else {
                    return Vec::new();
                };
                if std::mem::take(&mut self.dragging) {
                    vec![PointerSignal::DragEnd(position)]
                } else {
                    vec![PointerSignal::Tap(start)]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_click_is_tap() {
        let mut tracker = PointerTracker::new(4.0);
        assert_eq!(
            tracker.handle(down(10.0, 10.0)),
            vec![PointerSignal::Down(Point::new(10.0, 10.0))]
        );
        assert!(tracker.handle(mv(12.0, 11.0)).is_empty());
        assert_eq!(
            tracker.handle(up(12.0, 11.0)),
            vec![PointerSignal::Tap(Point::new(10.0, 10.0))]
        );
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_drag_sequence() {
        let mut tracker = PointerTracker::new(4.0);
        tracker.handle(down(10.0, 10.0));
        assert_eq!(
            tracker.handle(mv(20.0, 10.0)),
            vec![
                PointerSignal::DragStart(Point::new(10.0, 10.0)),
                PointerSignal::DragUpdate(Point::new(20.0, 10.0)),
            ]
        );
        assert!(tracker.is_dragging());
        assert_eq!(
            tracker.handle(mv(21.0, 10.0)),
            vec![PointerSignal::DragUpdate(Point::new(21.0, 10.0))]
        );
        assert_eq!(
            tracker.handle(up(22.0, 10.0)),
            vec![PointerSignal::DragEnd(Point::new(22.0, 10.0))]
        );
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_zero_slop_drags_on_any_movement() {
        let mut tracker = PointerTracker::new(0.0);
        tracker.handle(down(0.0, 0.0));
        assert!(tracker.handle(mv(0.0, 0.0)).is_empty());
        assert_eq!(tracker.handle(mv(0.5, 0.0)).len(), 2);
    }

    #[test]
    fn test_events_without_press_are_ignored() {
        let mut tracker = PointerTracker::new(4.0);
        assert!(tracker.handle(mv(50.0, 50.0)).is_empty());
        assert!(tracker.handle(up(50.0, 50.0)).is_empty());
    }

    #[test]
    fn test_event_position() {
        assert_eq!(up(1.0, 2.0).position(), Point::new(1.0, 2.0));
    }
}
