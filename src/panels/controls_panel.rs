use crate::RedactApp;

pub fn controls_panel(app: &mut RedactApp, ctx: &egui::Context) {
    egui::SidePanel::right("controls_panel")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Controls");
            ui.separator();

            if app.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Decoding image…");
                });
            }

            if app.editor().has_image() {
                editing_controls(app, ui);
                ui.separator();
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                if ui
                    .add_enabled(!app.is_loading(), egui::Button::new("Open image…"))
                    .clicked()
                {
                    app.open_image_dialog();
                }
                if app.editor().has_image() && ui.button("Download").clicked() {
                    app.download();
                }
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}

fn editing_controls(app: &mut RedactApp, ui: &mut egui::Ui) {
    let has_selected = app.editor().selected_shape().is_some();
    let has_masks = !app.editor().registry().is_empty();

    if ui
        .add_enabled(has_selected, egui::Button::new("Show Selected Area"))
        .clicked()
    {
        app.editor_mut().undo_selected();
    }
    if ui.add_enabled(has_masks, egui::Button::new("Show All")).clicked() {
        app.editor_mut().undo_all();
    }

    if app.editor().is_selecting() {
        ui.horizontal(|ui| {
            if ui.button("Hide").clicked() {
                app.editor_mut().commit_selection();
            }
            if ui.button("Ignore").clicked() {
                app.editor_mut().exit_selection_mode();
            }
        });
    } else if ui.button("Select Area").clicked() {
        app.editor_mut().enter_selection_mode();
    }

    ui.label(format!("Hidden regions: {}", app.editor().registry().len()));
    if let Some(live) = app.editor().live_selection() {
        ui.label(format!(
            "Selection: {:.0}, {:.0} ({:.0}×{:.0})",
            live.x(),
            live.y(),
            live.width(),
            live.height()
        ));
    }
}
