use crate::canvas::{Bounds, Canvas};

/// A canvas placed inside a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub image: Canvas,
    pub rect: Bounds,
    pub position: (i32, i32),
}

impl Sprite {
    pub fn new(image: Canvas, rect: Bounds) -> Self {
        Self {
            image,
            rect,
            position: (0, 0),
        }
    }

    /// Places the sprite at a fraction of the rectangle size. Ratios are
    /// clamped to `0.0..=1.0`.
    pub fn update_position_by_ratio(&mut self, x: f64, y: f64) {
        let rx = x.clamp(0.0, 1.0);
        let ry = y.clamp(0.0, 1.0);
        let w = self.rect.width.max(0) as f64;
        let h = self.rect.height.max(0) as f64;
        self.position = ((w * rx) as i32, (h * ry) as i32);
    }

    /// Resizes the rectangle to the image, keeping its top-left corner.
    pub fn fit_rect_to_image(&mut self) {
        self.rect.width = self.image.width() as i32;
        self.rect.height = self.image.height() as i32;
    }

    pub fn draw(&self, target: &mut Canvas) {
        target.draw_canvas(&self.image, self.position.0, self.position.1);
    }
}
