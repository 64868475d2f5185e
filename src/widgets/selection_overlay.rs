use egui::{Color32, CursorIcon, Id, Pos2, Rect, Sense, Stroke, Ui};

use crate::editor::Editor;
use crate::geometry::Rectangle;
use crate::geometry::hit_testing::{RESIZE_HANDLE_SIZE, is_point_on_resize_handle, resize_handle_rect};
use crate::selection::DragTarget;
use crate::widgets::ResizeHandle;

/// Draws the live selection over the canvas and feeds pointer drags into the editor.
pub struct SelectionOverlay {
    /// Screen position of canvas pixel (0, 0)
    canvas_origin: Pos2,
    /// Screen points per canvas pixel
    scale: f32,
}

impl SelectionOverlay {
    pub fn new(canvas_origin: Pos2, scale: f32) -> Self {
        Self {
            canvas_origin,
            scale: scale.max(f32::EPSILON),
        }
    }

    pub fn to_screen(&self, rect: &Rectangle) -> Rect {
        let canvas = rect.to_egui();
        Rect::from_min_max(self.to_screen_pos(canvas.min), self.to_screen_pos(canvas.max))
    }

    pub fn to_screen_pos(&self, pos: Pos2) -> Pos2 {
        self.canvas_origin + pos.to_vec2() * self.scale
    }

    pub fn to_canvas(&self, pos: Pos2) -> Pos2 {
        ((pos - self.canvas_origin) / self.scale).to_pos2()
    }

    /// Whether a press at `screen_pos` lands on the live selection. Such presses
    /// belong to the overlay and must not reach the canvas below it.
    pub fn covers(&self, editor: &Editor, screen_pos: Pos2) -> bool {
        editor
            .live_selection()
            .is_some_and(|live| live.contains(self.to_canvas(screen_pos)))
    }

    pub fn show(&self, ui: &mut Ui, editor: &mut Editor) {
        let Some(live) = editor.live_selection() else {
            return;
        };
        let screen = self.to_screen(&live);
        let handle_size = RESIZE_HANDLE_SIZE / self.scale;

        ui.painter()
            .rect_filled(screen, 0.0, Color32::from_rgba_unmultiplied(147, 51, 234, 40));
        ui.painter()
            .rect_stroke(screen, 0.0, Stroke::new(2.0, Color32::from_rgb(147, 51, 234)));

        let body = ui
            .interact(screen, Id::new("selection_body"), Sense::drag())
            .on_hover_cursor(CursorIcon::Grab);
        let handle = ResizeHandle::new(self.to_screen(&resize_handle_rect(&live, handle_size))).show(ui);

        if body.drag_started() || handle.drag_started() {
            let target = match ui.input(|i| i.pointer.press_origin()) {
                Some(press) if is_point_on_resize_handle(self.to_canvas(press), &live, handle_size) => {
                    DragTarget::ResizeHandle
                }
                _ => DragTarget::Body,
            };
            if let Err(err) = editor.begin_gesture(target) {
                log::debug!("Drag ignored: {}", err);
            }
        }

        if body.dragged() || handle.dragged() {
            let travel = ui.input(|i| match (i.pointer.press_origin(), i.pointer.interact_pos()) {
                (Some(origin), Some(current)) => Some(current - origin),
                _ => None,
            });
            if let Some(travel) = travel {
                editor.drag_update(travel / self.scale);
            }
        }

        if body.drag_stopped() || handle.drag_stopped() {
            editor.end_gesture();
        }
    }
}
