mod board;
mod canvas;
mod geometry;
pub mod raster;
mod session;
pub mod viewport;

pub use board::{grid::CellPos, shape::TileShape, Board, Layout, Tile};
pub use canvas::{CanvasPreset, CanvasSpec};
pub use geometry::{ImageSize, Photo, PixelRect, Point};
pub use raster::RenderOptions;
pub use session::{Blit, Collage, DrawCommand, Frame, TileId};
pub use viewport::{Anchor, ScaleDirection, Slice};

#[derive(Debug, thiserror::Error)]
pub enum CollageError {
    #[error("invalid grid {width}x{height} with {cell} px cells")]
    InvalidGrid { width: u32, height: u32, cell: u32 },
    #[error("canvas {width}x{height} cannot hold a single {tile} px tile")]
    CanvasTooSmall { width: u32, height: u32, tile: u32 },
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
