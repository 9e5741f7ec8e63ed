use collage_core::viewport::{fit, pan, zoom, ScaleDirection};
use collage_core::{ImageSize, PixelRect, Point};
use proptest::prelude::*;

fn shape_factor() -> impl Strategy<Value = (u32, u32)> {
    prop_oneof![Just((2, 2)), Just((1, 2)), Just((1, 1)), Just((2, 1))]
}

fn dest() -> impl Strategy<Value = PixelRect> {
    (shape_factor(), 1u32..300, 0u32..6, 0u32..6)
        .prop_map(|((w, h), cell, x, y)| PixelRect::new(x * cell, y * cell, w * cell, h * cell))
}

fn image() -> impl Strategy<Value = ImageSize> {
    (1u32..5000, 1u32..5000).prop_map(|(width, height)| ImageSize::new(width, height))
}

fn inside(source: PixelRect, image: ImageSize) -> bool {
    source.right() <= image.width && source.bottom() <= image.height
}

proptest! {
    #[test]
    fn fit_stays_inside_and_keeps_aspect(dest in dest(), image in image()) {
        let slice = fit(dest, image);
        let source = slice.source;

        prop_assert_eq!(slice.dest, dest);
        prop_assert!(inside(source, image), "{:?} outside {:?}", source, image);

        // Same aspect up to one pixel of integer rounding on the derived axis.
        let lhs = u64::from(source.width) * u64::from(dest.height);
        let rhs = u64::from(source.height) * u64::from(dest.width);
        let tolerance = u64::from(dest.width.max(dest.height));
        prop_assert!(lhs.abs_diff(rhs) <= tolerance, "{:?} vs {:?}", source, dest);

        prop_assert_eq!(fit(dest, image), slice);
    }

    #[test]
    fn pan_keeps_origin_in_bounds(
        dest in dest(),
        image in image(),
        start in (-2000i32..2000, -2000i32..2000),
        moves in prop::collection::vec((-10_000i32..10_000, -10_000i32..10_000), 1..10),
    ) {
        let mut slice = fit(dest, image);
        let anchor = slice.anchor(Point::new(start.0, start.1));

        for (x, y) in moves {
            let next = pan(slice, image, anchor, Point::new(x, y));
            prop_assert!(next.source.x <= image.width.abs_diff(next.source.width));
            prop_assert!(next.source.y <= image.height.abs_diff(next.source.height));
            prop_assert_eq!(
                (next.source.width, next.source.height),
                (slice.source.width, slice.source.height)
            );
            slice = next;
        }
    }

    #[test]
    fn zoom_converges_in_both_directions(dest in dest(), image in image()) {
        let start = fit(dest, image);
        let width_dominant = dest.width > dest.height;

        let mut grown = start;
        let mut steps = 0;
        while let Some(next) = zoom(grown, image, ScaleDirection::Grow) {
            prop_assert!(inside(next.source, image));
            grown = next;
            steps += 1;
            prop_assert!(steps < 2000, "grow did not converge");
        }
        let dominant = if width_dominant { grown.source.width } else { grown.source.height };
        let native = if width_dominant { image.width } else { image.height };
        prop_assert!(
            dominant == native
                || grown.source.width == image.width
                || grown.source.height == image.height,
            "grow stopped early at {:?} for {:?}", grown.source, image
        );

        let mut shrunk = grown;
        steps = 0;
        while let Some(next) = zoom(shrunk, image, ScaleDirection::Shrink) {
            prop_assert!(inside(next.source, image));
            shrunk = next;
            steps += 1;
            prop_assert!(steps < 2000, "shrink did not converge");
        }
        if image.width >= dest.width && image.height >= dest.height {
            prop_assert_eq!((shrunk.source.width, shrunk.source.height), (dest.width, dest.height));
        }
    }
}

#[test]
fn wide_tile_on_square_photo() {
    let slice = fit(PixelRect::new(0, 0, 200, 100), ImageSize::new(400, 400));
    assert_eq!(slice.source, PixelRect::new(0, 100, 400, 200));
}
