use std::borrow::Borrow;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbImage, RgbaImage};

use crate::geometry::PixelRect;
use crate::session::{Blit, DrawCommand, Frame};
use crate::CollageError;

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub background: Rgba<u8>,
    /// Outline color of empty tile borders.
    pub grid: Rgba<u8>,
    pub highlight: Rgba<u8>,
    pub filter: FilterType,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Rgba([0xff, 0xff, 0xff, 0xff]),
            grid: Rgba([0xee, 0xee, 0xee, 0xff]),
            highlight: Rgba([0xfa, 0xfa, 0xfa, 0xff]),
            filter: FilterType::CatmullRom,
        }
    }
}

/// Execute a frame's draw commands onto a new canvas.
pub fn render<P>(frame: &Frame<'_, P>, options: &RenderOptions) -> RgbaImage
where
    P: Borrow<DynamicImage>,
{
    let mut canvas = RgbaImage::from_pixel(frame.width, frame.height, options.background);

    for command in &frame.commands {
        match command {
            DrawCommand::Clear { width, height } => {
                fill(&mut canvas, PixelRect::new(0, 0, *width, *height), options.background);
            },
            DrawCommand::StrokeTile(rect) => stroke(&mut canvas, *rect, options.grid),
            DrawCommand::Blit(blit) => draw_blit(&mut canvas, blit, options.filter),
            DrawCommand::Highlight(rect) => fill(&mut canvas, *rect, options.highlight),
        }
    }

    canvas
}

fn draw_blit<P>(canvas: &mut RgbaImage, blit: &Blit<'_, P>, filter: FilterType)
where
    P: Borrow<DynamicImage>,
{
    let photo: &DynamicImage = blit.photo.borrow();
    let (width, height) = photo.dimensions();
    let source = blit.source;
    if source.width == 0
        || source.height == 0
        || source.right() > width
        || source.bottom() > height
        || blit.dest.width == 0
        || blit.dest.height == 0
    {
        return;
    }

    let crop = photo.crop_imm(source.x, source.y, source.width, source.height);
    let scaled = crop.resize_exact(blit.dest.width, blit.dest.height, filter).into_rgba8();
    imageops::replace(canvas, &scaled, i64::from(blit.dest.x), i64::from(blit.dest.y));
}

fn fill(canvas: &mut RgbaImage, rect: PixelRect, color: Rgba<u8>) {
    let right = rect.right().min(canvas.width());
    let bottom = rect.bottom().min(canvas.height());
    for y in rect.y..bottom {
        for x in rect.x..right {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// One pixel outline along the inside of `rect`.
fn stroke(canvas: &mut RgbaImage, rect: PixelRect, color: Rgba<u8>) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    let last_x = rect.right() - 1;
    let last_y = rect.bottom() - 1;
    fill(canvas, PixelRect::new(rect.x, rect.y, rect.width, 1), color);
    fill(canvas, PixelRect::new(rect.x, last_y, rect.width, 1), color);
    fill(canvas, PixelRect::new(rect.x, rect.y, 1, rect.height), color);
    fill(canvas, PixelRect::new(last_x, rect.y, 1, rect.height), color);
}

/// Encode the finished canvas as JPEG.
pub fn save_jpeg(image: &RgbaImage, path: &Path, quality: u8) -> Result<(), CollageError> {
    let file = File::create(path)?;
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality.clamp(1, 100));
    let rgb: RgbImage = image.convert();
    encoder.encode_image(&rgb)?;
    Ok(())
}
