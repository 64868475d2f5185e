use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::error::{ExportError, LoadError};
use crate::file_handler::FileHandler;
use crate::loader::{self, PendingDecode};
use crate::panels::{canvas_panel, controls_panel};
use crate::texture_manager::CanvasTexture;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct RedactApp {
    config: EditorConfig,
    #[serde(skip)]
    editor: Editor,
    #[serde(skip)]
    canvas: CanvasTexture,
    #[serde(skip)]
    file_handler: FileHandler,
    #[serde(skip)]
    pending_decode: Option<PendingDecode>,
    #[serde(skip)]
    status: Option<String>,
}

impl Default for RedactApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl RedactApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut config = cc
            .storage
            .and_then(|storage| eframe::get_value::<Self>(storage, eframe::APP_KEY))
            .map(|app| app.config)
            .unwrap_or_default();

        match EditorConfig::from_env() {
            Some(Ok(from_file)) => config = from_file,
            Some(Err(err)) => log::error!("Ignoring editor config: {}", err),
            None => {}
        }

        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            editor: Editor::new(config.clone()),
            config,
            canvas: CanvasTexture::default(),
            file_handler: FileHandler::new(),
            pending_decode: None,
            status: None,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        self.canvas.texture_id(ctx, self.editor.surface())
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_decode.is_some()
    }

    /// Hands `bytes` to a worker thread; the result is applied on a later frame.
    pub fn start_decode(&mut self, name: &str, bytes: Vec<u8>) {
        log::info!("Decoding {} ({} bytes)", name, bytes.len());
        self.editor.begin_decode();
        self.pending_decode = Some(loader::spawn_decode(bytes));
        self.status = Some(format!("Loading {name}…"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_image_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
            .pick_file()
        else {
            return;
        };
        match std::fs::read(&path) {
            Ok(bytes) => self.start_decode(&path.display().to_string(), bytes),
            Err(err) => self.report_load_error(LoadError::Io(err)),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn download(&mut self) {
        let format = self.config.export_format;
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(self.config.download_name.as_str())
            .add_filter("Image", &[format.extension()])
            .save_file()
        else {
            return;
        };

        let result = self
            .editor
            .export(format)
            .and_then(|bytes| std::fs::write(&path, bytes).map_err(ExportError::from));
        match result {
            Ok(()) => {
                log::info!("Exported image to {}", path.display());
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.status = Some(err.to_string());
            }
        }
    }

    fn poll_decode(&mut self) {
        let Some(result) = self.pending_decode.as_mut().and_then(PendingDecode::poll_ready) else {
            return;
        };
        self.pending_decode = None;
        match self.editor.finish_decode(result) {
            Ok(()) => self.status = None,
            Err(err) => self.report_load_error(err),
        }
    }

    fn report_load_error(&mut self, err: LoadError) {
        log::error!("Image load failed: {}", err);
        self.status = Some(format!("Image load failed: {err}"));
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, escape) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::Z),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if undo {
            self.editor.undo_last();
        }
        if escape {
            self.editor.exit_selection_mode();
        }
    }
}

impl eframe::App for RedactApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_decode();
        if self.is_loading() {
            ctx.request_repaint();
        }

        if self.file_handler.check_for_dropped_files(ctx) {
            if let Some((name, bytes)) = self.file_handler.take_dropped_image() {
                self.start_decode(&name, bytes);
            }
        }

        self.handle_shortcuts(ctx);

        controls_panel(self, ctx);
        canvas_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
    }
}
