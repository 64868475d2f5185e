use egui::{Color32, Pos2, Rect, Sense};

use crate::RedactApp;
use crate::widgets::SelectionOverlay;

pub fn canvas_panel(app: &mut RedactApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if !app.editor().has_image() {
            ui.centered_and_justified(|ui| {
                ui.label("Drop an image here or use \"Open image…\"");
            });
            return;
        }

        let canvas_size = app.editor().canvas_size();
        let available = ui.available_size();
        // Shrink large images to fit, never enlarge small ones.
        let scale = (available.x / canvas_size.x)
            .min(available.y / canvas_size.y)
            .min(1.0);

        let texture = app.canvas_texture(ctx);
        let (response, painter) = ui.allocate_painter(canvas_size * scale, Sense::click());
        let rect = response.rect;
        painter.image(
            texture,
            rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );

        let overlay = SelectionOverlay::new(rect.min, scale);
        if response.clicked() {
            match response.interact_pointer_pos() {
                Some(pos) if !overlay.covers(app.editor(), pos) => {
                    app.editor_mut().click(overlay.to_canvas(pos));
                }
                _ => {}
            }
        }
        overlay.show(ui, app.editor_mut());
    });
}
