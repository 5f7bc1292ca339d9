//! CPU pixel canvas backed by `image::RgbaImage`.

use std::path::Path;

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

/// Rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// An RGBA8 image that text and fills are drawn onto.
///
/// Starts fully transparent. Writes outside the pixel grid are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0, 0, self.width() as i32, self.height() as i32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if x < 0 || y < 0 {
            return None;
        }
        self.pixels.get_pixel_checked(x as u32, y as u32).copied()
    }

    /// Overwrites every pixel with `color`.
    pub fn fill(&mut self, color: Rgba<u8>) {
        for px in self.pixels.pixels_mut() {
            *px = color;
        }
    }

    /// Source-over blend of `color` scaled by `coverage` (0.0..=1.0).
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let Some(dst) = self.pixels.get_pixel_mut_checked(x as u32, y as u32) else {
            return;
        };
        let src_a = color[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let mut out = [0u8; 4];
        for i in 0..3 {
            let c = (color[i] as f32 * src_a + dst[i] as f32 * dst_a * (1.0 - src_a)) / out_a;
            out[i] = c.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        *dst = Rgba(out);
    }

    /// Blends a solid rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: Bounds, color: Rgba<u8>) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width() as i32);
        let y1 = rect.bottom().min(self.height() as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color, 1.0);
            }
        }
    }

    /// Composites `other` with its top-left corner at (`x`, `y`).
    pub fn draw_canvas(&mut self, other: &Canvas, x: i32, y: i32) {
        for (sx, sy, px) in other.pixels.enumerate_pixels() {
            self.blend_pixel(x + sx as i32, y + sy as i32, *px, 1.0);
        }
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.pixels
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_transparent() {
        let c = Canvas::new(3, 2);
        assert_eq!(c.get(2, 1), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(c.get(3, 0), None);
        assert_eq!(c.get(-1, 0), None);
    }

    #[test]
    fn opaque_blend_replaces() {
        let mut c = Canvas::new(1, 1);
        c.fill(Rgba([0, 0, 255, 255]));
        c.blend_pixel(0, 0, Rgba([255, 0, 0, 255]), 1.0);
        assert_eq!(c.get(0, 0), Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn half_coverage_mixes() {
        let mut c = Canvas::new(1, 1);
        c.fill(Rgba([0, 0, 0, 255]));
        c.blend_pixel(0, 0, Rgba([255, 255, 255, 255]), 0.5);
        let px = c.get(0, 0).unwrap();
        assert_eq!(px[3], 255);
        assert!((127..=128).contains(&px[0]));
    }

    #[test]
    fn transparent_color_leaves_pixel() {
        let mut c = Canvas::new(1, 1);
        c.fill(Rgba([1, 2, 3, 255]));
        c.blend_pixel(0, 0, Rgba([255, 0, 0, 0]), 1.0);
        assert_eq!(c.get(0, 0), Some(Rgba([1, 2, 3, 255])));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut c = Canvas::new(4, 4);
        c.fill_rect(Bounds::new(-2, 2, 4, 10), Rgba([9, 9, 9, 255]));
        assert_eq!(c.get(1, 3), Some(Rgba([9, 9, 9, 255])));
        assert_eq!(c.get(2, 3), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(c.get(0, 1), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn draw_canvas_offsets() {
        let mut dst = Canvas::new(4, 4);
        let mut src = Canvas::new(2, 2);
        src.fill(Rgba([0, 255, 0, 255]));
        dst.draw_canvas(&src, 3, 3);
        assert_eq!(dst.get(3, 3), Some(Rgba([0, 255, 0, 255])));
        assert_eq!(dst.get(2, 2), Some(Rgba([0, 0, 0, 0])));
    }
}
