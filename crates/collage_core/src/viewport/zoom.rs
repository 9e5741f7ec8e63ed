use log::trace;

use crate::geometry::{ImageSize, PixelRect};

use super::fit::scale;
use super::{clamp_origin, Slice};

/// Pixels added to or removed from the dominant axis per zoom step.
pub const ZOOM_STEP: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleDirection {
    /// Enlarge the slice, showing more of the photo.
    Grow,
    /// Reduce the slice, showing less of the photo at a larger scale.
    Shrink,
}

impl ScaleDirection {
    /// Direction for a mouse wheel delta; scrolling down (negative delta) grows.
    pub fn from_wheel_delta(delta: f32) -> Self {
        if delta < 0.0 {
            ScaleDirection::Grow
        } else {
            ScaleDirection::Shrink
        }
    }
}

/// Resize the slice by one step along the destination's dominant axis.
///
/// The slice keeps the destination aspect ratio, never drops below the destination size
/// and never exceeds the image. Returns `None` when the step would not change anything.
pub fn zoom(slice: Slice, image: ImageSize, direction: ScaleDirection) -> Option<Slice> {
    let Slice { source, dest } = slice;
    let width_dominant = dest.width > dest.height;

    let at_native =
        if width_dominant { source.width >= image.width } else { source.height >= image.height };
    if direction == ScaleDirection::Grow && at_native {
        trace!("slice already at native size, skipping zoom");
        return None;
    }

    let step = |value: u32| match direction {
        ScaleDirection::Grow => value.saturating_add(ZOOM_STEP),
        ScaleDirection::Shrink => value.saturating_sub(ZOOM_STEP),
    };

    let (width, height) = if width_dominant {
        let width = step(source.width).max(dest.width).min(image.width);
        let height = scale(width, dest.height, dest.width);
        if height > image.height {
            (scale(image.height, dest.width, dest.height), image.height)
        } else {
            (width, height)
        }
    } else {
        let height = step(source.height).max(dest.height).min(image.height);
        let width = scale(height, dest.width, dest.height);
        if width > image.width {
            (image.width, scale(image.width, dest.height, dest.width))
        } else {
            (width, height)
        }
    };

    let x = clamp_origin(i64::from(source.x), image.width, width);
    let y = clamp_origin(i64::from(source.y), image.height, height);
    let zoomed = Slice { source: PixelRect { x, y, width, height }, dest };

    (zoomed != slice).then_some(zoomed)
}
