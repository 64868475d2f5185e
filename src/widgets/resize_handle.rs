use egui::{Color32, CursorIcon, Id, Rect, Response, Sense, Stroke, Ui};

/// Square grab area in the bottom-right corner of the selection.
pub struct ResizeHandle {
    rect: Rect,
}

impl ResizeHandle {
    /// `rect` is in screen coordinates.
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Show the resize handle and return the response
    pub fn show(&self, ui: &mut Ui) -> Response {
        let id = Id::new("selection_resize_handle");

        ui.painter().rect_filled(self.rect, 2.0, Color32::from_rgb(147, 51, 234));
        ui.painter()
            .rect_stroke(self.rect, 2.0, Stroke::new(1.0, Color32::WHITE));

        ui.interact(self.rect, id, Sense::drag())
            .on_hover_cursor(CursorIcon::ResizeNwSe)
    }
}
