use crate::geometry::{ImageSize, PixelRect};

use super::Slice;

/// Largest crop of `image` with the aspect ratio of `dest`, centered in the image.
///
/// The crop is a whole multiple of the tile size on the driving axis whenever the image
/// is at least that large, so photos are never scaled up past their native pixels
/// unless the image is smaller than the tile itself.
pub fn fit(dest: PixelRect, image: ImageSize) -> Slice {
    let (width, height) = if dest.width >= dest.height {
        let (w, h) = width_first(dest, image);
        if h > image.height {
            height_first(dest, image)
        } else {
            (w, h)
        }
    } else {
        let (w, h) = height_first(dest, image);
        if w > image.width {
            width_first(dest, image)
        } else {
            (w, h)
        }
    };

    let x = image.width.saturating_sub(width) / 2;
    let y = image.height.saturating_sub(height) / 2;

    Slice { source: PixelRect::new(x, y, width, height), dest }
}

fn width_first(dest: PixelRect, image: ImageSize) -> (u32, u32) {
    if dest.width == 0 {
        return (0, 0);
    }
    let mult = image.width / dest.width;
    let width = if mult == 0 { image.width } else { dest.width * mult };
    (width, scale(width, dest.height, dest.width))
}

fn height_first(dest: PixelRect, image: ImageSize) -> (u32, u32) {
    if dest.height == 0 {
        return (0, 0);
    }
    let mult = image.height / dest.height;
    let height = if mult == 0 { image.height } else { dest.height * mult };
    (scale(height, dest.width, dest.height), height)
}

/// `floor(value * num / den)` without intermediate overflow.
pub(super) fn scale(value: u32, num: u32, den: u32) -> u32 {
    if den == 0 {
        return 0;
    }
    (u64::from(value) * u64::from(num) / u64::from(den)).min(u64::from(u32::MAX)) as u32
}
