//! Mapping of a photo onto a tile: default crop, panning and zooming.

mod fit;
mod zoom;

pub use fit::fit;
pub use zoom::{zoom, ScaleDirection, ZOOM_STEP};

use crate::geometry::{ImageSize, PixelRect, Point};

/// Crop window into a photo's native pixels and the tile rect it is drawn into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    pub source: PixelRect,
    pub dest: PixelRect,
}

impl Slice {
    /// Capture the drag offset for a pan gesture starting at `pointer`.
    pub fn anchor(&self, pointer: Point) -> Anchor {
        Anchor {
            x: i64::from(self.source.x) + i64::from(pointer.x),
            y: i64::from(self.source.y) + i64::from(pointer.y),
        }
    }
}

/// Slice origin plus the pointer position at the start of a pan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    x: i64,
    y: i64,
}

/// Move the slice origin so it follows the pointer, keeping the slice inside the image.
pub fn pan(slice: Slice, image: ImageSize, anchor: Anchor, pointer: Point) -> Slice {
    let x = clamp_origin(anchor.x - i64::from(pointer.x), image.width, slice.source.width);
    let y = clamp_origin(anchor.y - i64::from(pointer.y), image.height, slice.source.height);

    Slice { source: PixelRect { x, y, ..slice.source }, ..slice }
}

/// Clamp an origin coordinate to `[0, |image - slice|]`.
pub(crate) fn clamp_origin(value: i64, image: u32, slice: u32) -> u32 {
    let max = image.abs_diff(slice);
    value.clamp(0, i64::from(max)) as u32
}
