//! The redaction editor: composes selection, registry and mask engine and
//! exposes the operations the UI invokes.
//!
//! # Lifecycle
//!
//! ```text
//!   upload ──► Idle ──enter_selection_mode──► Selecting ──exit──► Idle
//!               │                               ▲   │
//!               └────── click on masked region ─┘   └─ commit_selection (stays Selecting)
//! ```
//!
//! Every edit operation is a no-op until an image is loaded. Only decoding and
//! exporting report errors.

use egui::{Pos2, Vec2};
use image::RgbaImage;

use crate::config::{EditorConfig, ExportFormat};
use crate::error::{ExportError, GestureError, LoadError};
use crate::geometry::Rectangle;
use crate::loader::{self, OriginalImage};
use crate::mask::MaskEngine;
use crate::registry::{MaskedRegion, ShapeId, ShapeRegistry};
use crate::selection::{DragTarget, InteractionMode, SelectionController};
use crate::surface::{PixelSurface, RasterSurface};

pub struct Editor<S: PixelSurface = RasterSurface> {
    config: EditorConfig,
    surface: S,
    original: Option<OriginalImage>,
    registry: ShapeRegistry,
    selected: Option<ShapeId>,
    selection: SelectionController,
    mask: MaskEngine,
    decode_pending: bool,
}

impl Default for Editor<RasterSurface> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor<RasterSurface> {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_surface(config, RasterSurface::default())
    }
}

impl<S: PixelSurface> Editor<S> {
    pub fn with_surface(config: EditorConfig, surface: S) -> Self {
        Self {
            selection: SelectionController::new(config.default_selection, config.min_extent),
            mask: MaskEngine::from_config(&config),
            config,
            surface,
            original: None,
            registry: ShapeRegistry::new(),
            selected: None,
            decode_pending: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn original(&self) -> Option<&OriginalImage> {
        self.original.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn selected_shape(&self) -> Option<&MaskedRegion> {
        self.selected.and_then(|id| self.registry.get(id))
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn mode(&self) -> InteractionMode {
        self.selection.mode()
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_selecting()
    }

    /// The live selection rectangle, if one is shown.
    pub fn live_selection(&self) -> Option<Rectangle> {
        self.selection.is_selecting().then(|| self.selection.live())
    }

    pub fn is_decode_pending(&self) -> bool {
        self.decode_pending
    }

    /// Canvas size in pixels, zero before the first upload.
    pub fn canvas_size(&self) -> Vec2 {
        let (width, height) = self.surface.dimensions();
        Vec2::new(width as f32, height as f32)
    }

    /// Installs a freshly decoded image and resets every piece of editing state.
    pub fn upload(&mut self, image: OriginalImage) {
        let (width, height) = (image.width(), image.height());
        log::info!("Loading image {}x{}", width, height);

        self.surface.set_dimensions(width, height);
        let full = Rectangle::full_canvas(width, height);
        self.surface.draw_image_region(image.pixels(), full, full);

        self.original = Some(image);
        self.registry.clear_all();
        self.selected = None;
        self.selection.reset();
        self.decode_pending = false;
    }

    /// Decodes `bytes` on the calling thread and uploads the result.
    /// On failure the current image and masks are left untouched.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        let image = loader::decode(bytes)?;
        self.upload(image);
        Ok(())
    }

    /// Wraps an already decoded bitmap.
    pub fn load_rgba(&mut self, pixels: RgbaImage) -> Result<(), LoadError> {
        let image = OriginalImage::new(pixels)?;
        self.upload(image);
        Ok(())
    }

    /// Marks a background decode as outstanding. Gesture input is refused
    /// until [`Editor::finish_decode`] is called.
    pub fn begin_decode(&mut self) {
        self.selection.end_gesture();
        self.decode_pending = true;
    }

    /// Applies the outcome of a background decode.
    pub fn finish_decode(&mut self, result: Result<OriginalImage, LoadError>) -> Result<(), LoadError> {
        self.decode_pending = false;
        let image = result?;
        self.upload(image);
        Ok(())
    }

    pub fn enter_selection_mode(&mut self) {
        if !self.has_image() {
            log::warn!("enter_selection_mode: no image loaded");
            return;
        }
        self.selection.enter_selection_mode();
        self.selected = None;
    }

    pub fn exit_selection_mode(&mut self) {
        self.selection.exit_selection_mode();
    }

    /// Hit-tests a click on the canvas and re-opens the region under it.
    pub fn click(&mut self, point: Pos2) -> Option<ShapeId> {
        if !self.has_image() || self.selection.is_gesture_in_flight() {
            return None;
        }
        let region = *self.registry.hit_test(point)?;
        log::debug!("Click at {:?} selected region {}", point, region.id);
        self.selection.reseed_from(region.rect);
        self.selected = Some(region.id);
        Some(region.id)
    }

    pub fn begin_gesture(&mut self, target: DragTarget) -> Result<(), GestureError> {
        if self.decode_pending {
            return Err(GestureError::DecodePending);
        }
        self.selection.begin_gesture(target)
    }

    /// `offset` is the total pointer travel since the gesture began.
    pub fn drag_update(&mut self, offset: Vec2) -> Option<Rectangle> {
        let container = self.canvas_size();
        self.selection.drag_update(offset, container)
    }

    pub fn end_gesture(&mut self) -> Option<Rectangle> {
        self.selection.end_gesture()
    }

    /// Blacks out the live selection and records it.
    ///
    /// Re-hiding a re-opened region whose geometry was not changed keeps its
    /// identity, so it is not recorded twice.
    pub fn commit_selection(&mut self) -> Option<ShapeId> {
        if !self.has_image() || !self.selection.is_selecting() {
            log::warn!("commit_selection: nothing to commit");
            return None;
        }
        self.selection.end_gesture();
        let rect = self.selection.live();

        let region = match self.selected_shape() {
            Some(selected) if selected.rect == rect => *selected,
            _ => MaskedRegion::new(rect),
        };

        self.mask.apply_mask(Some(&mut self.surface), &rect);
        if self.registry.commit(region) {
            log::info!("Masked region {} at {:?}", region.id, rect);
        }
        self.selected = Some(region.id);
        Some(region.id)
    }

    /// Restores the re-opened region and forgets it.
    pub fn undo_selected(&mut self) -> Option<MaskedRegion> {
        let id = self.selected.take()?;
        self.restore_region(id)
    }

    /// Restores the most recently committed region.
    pub fn undo_last(&mut self) -> Option<MaskedRegion> {
        let id = self.registry.last()?.id;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.restore_region(id)
    }

    /// Restores every region.
    pub fn undo_all(&mut self) -> Vec<MaskedRegion> {
        self.selected = None;
        if self.registry.is_empty() {
            return Vec::new();
        }
        let removed = self
            .mask
            .restore_all(Some(&mut self.surface), self.original.as_ref(), &mut self.registry);
        log::info!("Restored {} region(s)", removed.len());
        removed
    }

    /// Encodes the surface. Only committed masks are included.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        if !self.has_image() {
            return Err(ExportError::NoImageLoaded);
        }
        self.surface.serialize_to_blob(format)
    }

    fn restore_region(&mut self, id: ShapeId) -> Option<MaskedRegion> {
        let region = self.registry.remove(id)?;
        self.mask
            .restore(Some(&mut self.surface), self.original.as_ref(), &region.rect);

        // The padded redraw uncovers any overlap with regions that are still registered.
        let redrawn = region.rect.expand(self.config.restore_padding);
        let overlapping: Vec<Rectangle> = self
            .registry
            .iter()
            .map(|other| other.rect)
            .filter(|rect| rect.intersects(&redrawn))
            .collect();
        for rect in &overlapping {
            self.mask.apply_mask(Some(&mut self.surface), rect);
        }
        log::info!(
            "Restored region {} ({} overlapping region(s) re-masked)",
            region.id,
            overlapping.len()
        );
        Some(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn editor_with_image(width: u32, height: u32) -> Editor {
        let mut editor: Editor = Editor::default();
        editor
            .load_rgba(RgbaImage::from_pixel(width, height, Rgba([250, 250, 250, 255])))
            .unwrap();
        editor
    }

    #[test]
    fn edits_before_upload_are_noops() {
        let mut editor: Editor = Editor::default();
        editor.enter_selection_mode();
        assert!(!editor.is_selecting());
        assert_eq!(editor.commit_selection(), None);
        assert_eq!(editor.undo_selected(), None);
        assert!(editor.undo_all().is_empty());
        assert_eq!(editor.click(Pos2::new(1.0, 1.0)), None);
        assert!(matches!(editor.export(ExportFormat::Png), Err(ExportError::NoImageLoaded)));
    }

    #[test]
    fn recommitting_reopened_region_keeps_single_entry() {
        let mut editor = editor_with_image(200, 200);
        editor.enter_selection_mode();
        let id = editor.commit_selection().unwrap();

        assert_eq!(editor.click(Pos2::new(50.0, 50.0)), Some(id));
        assert_eq!(editor.commit_selection(), Some(id));
        assert_eq!(editor.registry().len(), 1);
    }

    #[test]
    fn moved_reopened_region_is_a_new_entry() {
        let mut editor = editor_with_image(300, 300);
        editor.enter_selection_mode();
        let first = editor.commit_selection().unwrap();

        editor.click(Pos2::new(50.0, 50.0));
        editor.begin_gesture(DragTarget::Body).unwrap();
        editor.drag_update(Vec2::new(120.0, 0.0));
        let second = editor.commit_selection().unwrap();

        assert_ne!(first, second);
        assert_eq!(editor.registry().len(), 2);
    }

    #[test]
    fn pending_decode_blocks_gestures() {
        let mut editor = editor_with_image(100, 100);
        editor.enter_selection_mode();
        editor.begin_decode();
        assert_eq!(editor.begin_gesture(DragTarget::Body), Err(GestureError::DecodePending));

        let failed = editor.finish_decode(Err(LoadError::Cancelled));
        assert!(failed.is_err());
        assert!(editor.begin_gesture(DragTarget::Body).is_ok());
    }

    #[test]
    fn undo_last_follows_history_order() {
        let mut editor = editor_with_image(400, 400);
        editor.enter_selection_mode();
        let first = editor.commit_selection().unwrap();
        editor.enter_selection_mode();
        editor.begin_gesture(DragTarget::Body).unwrap();
        editor.drag_update(Vec2::new(200.0, 200.0));
        let second = editor.commit_selection().unwrap();

        assert_eq!(editor.undo_last().map(|r| r.id), Some(second));
        assert_eq!(editor.undo_last().map(|r| r.id), Some(first));
        assert_eq!(editor.undo_last(), None);
    }
}
