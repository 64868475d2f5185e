use std::io::Cursor;
use std::ops::Range;

use image::{DynamicImage, Rgba, RgbaImage};

use crate::config::ExportFormat;
use crate::error::ExportError;
use crate::geometry::Rectangle;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Pixel buffer the editor draws on. The editor never owns pixel memory
/// directly; it only issues these commands.
pub trait PixelSurface {
    fn dimensions(&self) -> (u32, u32);

    /// Resizes the surface, discarding its contents.
    fn set_dimensions(&mut self, width: u32, height: u32);

    /// Copies `src_rect` of `src` into `dst_rect`, scaling nearest-neighbour
    /// when the sizes differ. Both rectangles are clipped to their images.
    fn draw_image_region(&mut self, src: &RgbaImage, src_rect: Rectangle, dst_rect: Rectangle);

    fn fill_rect(&mut self, rect: Rectangle, color: Rgba<u8>);

    /// Resets `rect` to fully transparent pixels.
    fn clear_rect(&mut self, rect: Rectangle);

    fn serialize_to_blob(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError>;
}

/// In-memory RGBA surface.
#[derive(Debug, Clone, Default)]
pub struct RasterSurface {
    pixels: RgbaImage,
    version: u64,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            version: 0,
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Bumped on every mutation, so consumers can tell when to re-upload.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        let size = [self.pixels.width() as usize, self.pixels.height() as usize];
        egui::ColorImage::from_rgba_unmultiplied(size, self.pixels.as_raw())
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn paint(&mut self, rect: Rectangle, color: Rgba<u8>) {
        let (width, height) = self.pixels.dimensions();
        for y in pixel_span(rect.y1, rect.y2, height) {
            for x in pixel_span(rect.x1, rect.x2, width) {
                self.pixels.put_pixel(x, y, color);
            }
        }
        self.touch();
    }
}

impl PixelSurface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
        self.touch();
    }

    fn draw_image_region(&mut self, src: &RgbaImage, src_rect: Rectangle, dst_rect: Rectangle) {
        if dst_rect.width() <= 0.0 || dst_rect.height() <= 0.0 {
            return;
        }
        let scale_x = src_rect.width() / dst_rect.width();
        let scale_y = src_rect.height() / dst_rect.height();
        let (width, height) = self.pixels.dimensions();
        let (src_width, src_height) = src.dimensions();

        for y in pixel_span(dst_rect.y1, dst_rect.y2, height) {
            let sy = (src_rect.y1 + (y as f32 + 0.5 - dst_rect.y1) * scale_y).floor();
            if sy < 0.0 || sy >= src_height as f32 || sy >= src_rect.y2 {
                continue;
            }
            for x in pixel_span(dst_rect.x1, dst_rect.x2, width) {
                let sx = (src_rect.x1 + (x as f32 + 0.5 - dst_rect.x1) * scale_x).floor();
                if sx < 0.0 || sx >= src_width as f32 || sx >= src_rect.x2 {
                    continue;
                }
                self.pixels.put_pixel(x, y, *src.get_pixel(sx as u32, sy as u32));
            }
        }
        self.touch();
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Rgba<u8>) {
        self.paint(rect, color);
    }

    fn clear_rect(&mut self, rect: Rectangle) {
        self.paint(rect, TRANSPARENT);
    }

    fn serialize_to_blob(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Cursor::new(Vec::new());
        let image = DynamicImage::ImageRgba8(self.pixels.clone());
        match format {
            // JPEG carries no alpha channel.
            ExportFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
                .write_to(&mut bytes, format.image_format())?,
            _ => image.write_to(&mut bytes, format.image_format())?,
        }
        Ok(bytes.into_inner())
    }
}

/// Pixel indices covered by `[start, end)`, clipped to `[0, limit)`.
fn pixel_span(start: f32, end: f32, limit: u32) -> Range<u32> {
    let limit = limit as f32;
    let lo = start.floor().max(0.0).min(limit) as u32;
    let hi = end.ceil().max(0.0).min(limit) as u32;
    lo..hi.max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    #[test]
    fn pixel_span_clips_to_surface() {
        assert_eq!(pixel_span(-2.0, 5.5, 10), 0..6);
        assert_eq!(pixel_span(8.2, 20.0, 10), 8..10);
        assert_eq!(pixel_span(12.0, 20.0, 10), 10..10);
    }

    #[test]
    fn fill_and_clear_touch_only_the_rectangle() {
        let mut surface = RasterSurface::new(20, 20);
        surface.fill_rect(Rectangle::from_corners(5.0, 5.0, 10.0, 10.0), Rgba([0, 0, 0, 255]));
        assert_eq!(surface.pixels().get_pixel(5, 5), &Rgba([0, 0, 0, 255]));
        assert_eq!(surface.pixels().get_pixel(9, 9), &Rgba([0, 0, 0, 255]));
        assert_eq!(surface.pixels().get_pixel(10, 10), &TRANSPARENT);

        surface.clear_rect(Rectangle::from_corners(0.0, 0.0, 20.0, 20.0));
        assert!(surface.pixels().pixels().all(|p| *p == TRANSPARENT));
    }

    #[test]
    fn same_size_region_copies_pixels_in_place() {
        let src = gradient(32, 32);
        let mut surface = RasterSurface::new(32, 32);
        let region = Rectangle::from_corners(-2.0, -2.0, 12.0, 12.0);
        surface.draw_image_region(&src, region, region);

        assert_eq!(surface.pixels().get_pixel(0, 0), src.get_pixel(0, 0));
        assert_eq!(surface.pixels().get_pixel(11, 7), src.get_pixel(11, 7));
        assert_eq!(surface.pixels().get_pixel(12, 12), &TRANSPARENT);
    }

    #[test]
    fn mutations_bump_version() {
        let mut surface = RasterSurface::new(4, 4);
        let before = surface.version();
        surface.fill_rect(Rectangle::from_corners(0.0, 0.0, 1.0, 1.0), Rgba([1, 2, 3, 255]));
        assert!(surface.version() > before);
    }

    #[test]
    fn png_export_decodes_back_to_the_same_size() {
        let mut surface = RasterSurface::new(16, 9);
        surface.fill_rect(Rectangle::from_corners(0.0, 0.0, 16.0, 9.0), Rgba([200, 10, 10, 255]));
        let blob = surface.serialize_to_blob(ExportFormat::Png).unwrap();
        let decoded = image::load_from_memory(&blob).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 9));
    }
}
