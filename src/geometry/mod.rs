//! Pure geometry: the canonical [`Rectangle`], bounds clamping for drag
//! gestures and point hit-testing helpers.

mod bounds;
pub mod hit_testing;
mod rect;

pub use bounds::{DragMode, MIN_EXTENT, clamp_rect, clamp_rect_with_min};
pub use rect::Rectangle;
