use egui::{Pos2, Vec2};

use crate::error::GestureError;
use crate::geometry::{DragMode, Rectangle, clamp_rect_with_min};

/// Whether the live selection rectangle is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Selecting,
}

/// Which part of the selection the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Body,
    ResizeHandle,
}

impl DragTarget {
    pub fn drag_mode(self) -> DragMode {
        match self {
            DragTarget::Body => DragMode::Move,
            DragTarget::ResizeHandle => DragMode::Resize,
        }
    }
}

/// One start → move* → end pointer sequence.
///
/// Every offset is applied to `baseline`, the rectangle as it was when the
/// pointer went down, never to the previous frame's result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub mode: DragMode,
    pub baseline: Rectangle,
}

impl GestureSession {
    /// Rectangle produced by `offset` (total pointer travel since gesture start).
    pub fn apply(&self, offset: Vec2, container: Vec2, min_extent: f32) -> Rectangle {
        match self.mode {
            DragMode::Move => {
                let proposed = self.baseline.origin().to_vec2() + offset;
                let origin = clamp_rect_with_min(
                    DragMode::Move,
                    proposed,
                    container,
                    self.baseline.size(),
                    min_extent,
                );
                self.baseline.with_origin(origin.to_pos2())
            }
            DragMode::Resize => {
                let proposed = self.baseline.size() + offset;
                let size = clamp_rect_with_min(
                    DragMode::Resize,
                    proposed,
                    container,
                    self.baseline.origin().to_vec2(),
                    min_extent,
                );
                self.baseline.with_size(size)
            }
        }
    }
}

/// Owns the single live selection rectangle and interprets drag gestures on it.
#[derive(Debug, Clone)]
pub struct SelectionController {
    mode: InteractionMode,
    live: Rectangle,
    gesture: Option<GestureSession>,
    default_size: Vec2,
    min_extent: f32,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(Vec2::splat(100.0), crate::geometry::MIN_EXTENT)
    }
}

impl SelectionController {
    /// `min_extent` below one pixel is raised to one.
    pub fn new(default_size: Vec2, min_extent: f32) -> Self {
        let min_extent = min_extent.max(1.0);
        Self {
            mode: InteractionMode::Idle,
            live: Rectangle::from_origin_size(Pos2::ZERO, default_size),
            gesture: None,
            default_size,
            min_extent,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_selecting(&self) -> bool {
        self.mode == InteractionMode::Selecting
    }

    /// The live rectangle. Only meaningful while selecting.
    pub fn live(&self) -> Rectangle {
        self.live
    }

    pub fn gesture(&self) -> Option<&GestureSession> {
        self.gesture.as_ref()
    }

    pub fn is_gesture_in_flight(&self) -> bool {
        self.gesture.is_some()
    }

    /// Shows a fresh selection at the canvas origin with the default size.
    pub fn enter_selection_mode(&mut self) {
        self.gesture = None;
        self.live = Rectangle::from_origin_size(Pos2::ZERO, self.default_size);
        self.mode = InteractionMode::Selecting;
        log::debug!("Selection mode entered with {:?}", self.live);
    }

    /// Hides the selection, discarding whatever was not committed.
    pub fn exit_selection_mode(&mut self) {
        self.gesture = None;
        self.mode = InteractionMode::Idle;
        log::debug!("Selection mode exited");
    }

    /// Re-opens a committed rectangle as the live selection.
    pub fn reseed_from(&mut self, rect: Rectangle) {
        self.gesture = None;
        self.live = rect;
        self.mode = InteractionMode::Selecting;
        log::debug!("Selection reseeded from {:?}", rect);
    }

    /// Starts a gesture. Only one may be in flight at a time.
    pub fn begin_gesture(&mut self, target: DragTarget) -> Result<(), GestureError> {
        if self.mode != InteractionMode::Selecting {
            return Err(GestureError::NotSelecting);
        }
        if self.gesture.is_some() {
            return Err(GestureError::AlreadyInFlight);
        }
        self.gesture = Some(GestureSession {
            mode: target.drag_mode(),
            baseline: self.live,
        });
        Ok(())
    }

    /// Applies the total pointer travel of the current gesture.
    /// Returns the new live rectangle, or `None` when no gesture is in flight.
    pub fn drag_update(&mut self, offset: Vec2, container: Vec2) -> Option<Rectangle> {
        let session = self.gesture?;
        self.live = session.apply(offset, container, self.min_extent);
        Some(self.live)
    }

    /// Ends the current gesture, returning the rectangle it left behind.
    pub fn end_gesture(&mut self) -> Option<Rectangle> {
        self.gesture.take().map(|_| self.live)
    }

    /// Back to the initial state: idle, default rectangle, no gesture.
    pub fn reset(&mut self) {
        *self = Self::new(self.default_size, self.min_extent);
    }
}
