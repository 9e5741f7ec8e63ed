use std::sync::Arc;

use image::{DynamicImage, GenericImageView};

/// Canvas-local pointer position in pixels. May lie outside the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Hit test with both edges inclusive, so points on a shared border match either rect.
    pub fn contains(&self, point: Point) -> bool {
        let (x, y) = (i64::from(point.x), i64::from(point.y));
        x >= i64::from(self.x)
            && x <= i64::from(self.right())
            && y >= i64::from(self.y)
            && y <= i64::from(self.bottom())
    }
}

/// Natural pixel dimensions of a decoded image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A decoded photo that can be placed on a tile.
///
/// The core never touches pixels; it only needs the natural size to compute slices.
pub trait Photo {
    fn dimensions(&self) -> (u32, u32);

    fn size(&self) -> ImageSize {
        let (width, height) = self.dimensions();
        ImageSize { width, height }
    }
}

impl Photo for ImageSize {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Photo for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }
}

impl<T: Photo + ?Sized> Photo for Arc<T> {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let rect = PixelRect::new(100, 100, 50, 20);
        assert!(rect.contains(Point::new(100, 100)));
        assert!(rect.contains(Point::new(150, 120)));
        assert!(!rect.contains(Point::new(151, 120)));
        assert!(!rect.contains(Point::new(99, 110)));
        assert!(!rect.contains(Point::new(-1, -1)));
    }

    #[test]
    fn dynamic_image_reports_natural_size() {
        let image = DynamicImage::new_rgb8(31, 17);
        assert_eq!(Photo::size(&image), ImageSize::new(31, 17));
        assert_eq!(Arc::new(image).size(), ImageSize::new(31, 17));
    }
}
