use image::Rgba;

use crate::config::EditorConfig;
use crate::geometry::Rectangle;
use crate::loader::OriginalImage;
use crate::registry::{MaskedRegion, ShapeRegistry};
use crate::surface::PixelSurface;

/// Paints regions out and puts original pixels back.
///
/// Every operation is a no-op when the surface or the original image is absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskEngine {
    color: Rgba<u8>,
    padding: f32,
}

impl Default for MaskEngine {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl MaskEngine {
    pub fn new(color: Rgba<u8>, padding: f32) -> Self {
        Self { color, padding }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(Rgba(config.mask_color), config.restore_padding)
    }

    pub fn apply_mask<S: PixelSurface + ?Sized>(&self, surface: Option<&mut S>, rect: &Rectangle) {
        let Some(surface) = surface else {
            log::warn!("No surface to mask, ignoring");
            return;
        };
        surface.fill_rect(*rect, self.color);
    }

    /// Clears `rect` and redraws the original image over it, `padding` pixels
    /// wider on every side so no fringe of the fill survives.
    pub fn restore<S: PixelSurface + ?Sized>(
        &self,
        surface: Option<&mut S>,
        original: Option<&OriginalImage>,
        rect: &Rectangle,
    ) {
        let (Some(surface), Some(original)) = (surface, original) else {
            log::warn!("Nothing to restore from, ignoring");
            return;
        };
        surface.clear_rect(*rect);
        let padded = rect.expand(self.padding);
        surface.draw_image_region(original.pixels(), padded, padded);
    }

    /// Restores the whole canvas and empties `registry`, returning what it held.
    pub fn restore_all<S: PixelSurface + ?Sized>(
        &self,
        surface: Option<&mut S>,
        original: Option<&OriginalImage>,
        registry: &mut ShapeRegistry,
    ) -> Vec<MaskedRegion> {
        let (Some(surface), Some(original)) = (surface, original) else {
            log::warn!("Nothing to restore from, ignoring");
            return Vec::new();
        };
        let (width, height) = surface.dimensions();
        self.restore(Some(surface), Some(original), &Rectangle::full_canvas(width, height));
        registry.clear_all()
    }
}
