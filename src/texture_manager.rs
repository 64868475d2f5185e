use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::surface::RasterSurface;

/// GPU copy of the canvas surface, re-uploaded only when the surface changed.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    /// Surface version the texture was generated from
    version: Option<u64>,
}

impl std::fmt::Debug for CanvasTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasTexture")
            .field("version", &self.version)
            .field("has_texture", &self.handle.is_some())
            .finish()
    }
}

impl CanvasTexture {
    pub fn texture_id(&mut self, ctx: &Context, surface: &RasterSurface) -> TextureId {
        let current = surface.version();
        if let Some(handle) = &mut self.handle {
            if self.version != Some(current) {
                handle.set(surface.to_color_image(), TextureOptions::NEAREST);
                self.version = Some(current);
            }
            return handle.id();
        }

        let handle = ctx.load_texture("canvas", surface.to_color_image(), TextureOptions::NEAREST);
        let id = handle.id();
        self.handle = Some(handle);
        self.version = Some(current);
        id
    }

    /// Version of the surface currently on the GPU.
    pub fn uploaded_version(&self) -> Option<u64> {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use crate::surface::PixelSurface;
    use image::Rgba;

    #[test]
    fn reuploads_only_after_surface_changes() {
        let ctx = Context::default();
        let mut surface = RasterSurface::new(8, 8);
        let mut texture = CanvasTexture::default();

        let first = texture.texture_id(&ctx, &surface);
        assert_eq!(texture.uploaded_version(), Some(surface.version()));
        assert_eq!(texture.texture_id(&ctx, &surface), first);

        surface.fill_rect(Rectangle::from_corners(0.0, 0.0, 4.0, 4.0), Rgba([0, 0, 0, 255]));
        assert_eq!(texture.texture_id(&ctx, &surface), first);
        assert_eq!(texture.uploaded_version(), Some(surface.version()));
    }
}
