use egui::Vec2;

/// Smallest extent a selection may be resized to, in pixels.
/// Keeps the resize handle grabbable.
pub const MIN_EXTENT: f32 = 10.0;

/// How a raw gesture offset is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// `proposed` is a new origin, `anchor` the current extent.
    Move,
    /// `proposed` is a new extent, `anchor` the fixed origin.
    Resize,
}

/// Clamps a proposed origin or extent so the rectangle stays inside `container`.
///
/// Pure and idempotent. Degenerate containers are never an error: an empty
/// move range leaves that axis as requested, an empty resize range yields the
/// minimum extent.
pub fn clamp_rect(mode: DragMode, proposed: Vec2, container: Vec2, anchor: Vec2) -> Vec2 {
    clamp_rect_with_min(mode, proposed, container, anchor, MIN_EXTENT)
}

/// [`clamp_rect`] with a configurable minimum extent.
pub fn clamp_rect_with_min(
    mode: DragMode,
    proposed: Vec2,
    container: Vec2,
    anchor: Vec2,
    min_extent: f32,
) -> Vec2 {
    match mode {
        DragMode::Move => Vec2::new(
            clamp_position(proposed.x, container.x, anchor.x),
            clamp_position(proposed.y, container.y, anchor.y),
        ),
        DragMode::Resize => Vec2::new(
            clamp_extent(proposed.x, container.x, anchor.x, min_extent),
            clamp_extent(proposed.y, container.y, anchor.y, min_extent),
        ),
    }
}

fn clamp_position(value: f32, container: f32, extent: f32) -> f32 {
    let max = container - extent;
    if max < 0.0 {
        return value;
    }
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

fn clamp_extent(value: f32, container: f32, origin: f32, min_extent: f32) -> f32 {
    let max = container - origin;
    if value.is_nan() || max < min_extent {
        return min_extent;
    }
    value.clamp(min_extent, max)
}
