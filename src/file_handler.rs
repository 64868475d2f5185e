use eframe::egui;

/// Collects image files dropped onto the window.
#[derive(Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up newly dropped files from the UI context.
    /// Returns true if any were dropped this frame.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let mut new_dropped_files = false;

        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
                new_dropped_files = true;
            }
        });

        new_dropped_files
    }

    /// Returns the name and bytes of the first dropped image, discarding the rest.
    /// Only one image is edited at a time.
    pub fn take_dropped_image(&mut self) -> Option<(String, Vec<u8>)> {
        let files = std::mem::take(&mut self.dropped_files);
        if files.len() > 1 {
            log::warn!("{} files dropped, only the first image is opened", files.len());
        }

        for file in files {
            let file_name = display_name(&file);
            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }
            if let Some(bytes) = read_bytes(&file, &file_name) {
                return Some((file_name, bytes));
            }
        }
        None
    }

    /// Darkens the window while files are hovered over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop to open:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = file
        .path
        .as_ref()
        .and_then(|path| path.extension())
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .or_else(|| file.name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()));
    matches!(
        name.as_deref(),
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
    )
}

fn read_bytes(file: &egui::DroppedFile, file_name: &str) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.to_vec());
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::error!("Failed to read image file: {}: {}", path.display(), err);
                None
            }
        };
    }

    log::warn!("Dropped file has no accessible data: {}", file_name);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn dropped(name: &str, mime: &str, bytes: Option<&[u8]>) -> egui::DroppedFile {
        egui::DroppedFile {
            name: name.to_owned(),
            mime: mime.to_owned(),
            bytes: bytes.map(Arc::from),
            ..Default::default()
        }
    }

    #[test]
    fn recognizes_images_by_mime_or_extension() {
        assert!(is_image_file(&dropped("photo", "image/png", None)));
        assert!(is_image_file(&dropped("photo.JPG", "", None)));
        assert!(!is_image_file(&dropped("notes.txt", "", None)));
        assert!(!is_image_file(&dropped("notes.png", "text/plain", None)));
    }

    #[test]
    fn takes_first_readable_image() {
        let mut handler = FileHandler::new();
        handler.dropped_files = vec![
            dropped("notes.txt", "text/plain", Some(b"hi")),
            dropped("a.png", "image/png", Some(b"png-bytes")),
            dropped("b.png", "image/png", Some(b"other")),
        ];

        let (name, bytes) = handler.take_dropped_image().unwrap();
        assert_eq!(name, "a.png");
        assert_eq!(bytes, b"png-bytes");
        assert!(handler.take_dropped_image().is_none());
    }
}
