use crate::board::Board;
use crate::CollageError;

/// Canvas size presets offered to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CanvasPreset {
    Small,
    #[default]
    Large,
    Wide,
}

impl CanvasPreset {
    pub fn spec(self) -> CanvasSpec {
        match self {
            CanvasPreset::Small => CanvasSpec { width: 600, height: 600, base_tile: 100 },
            CanvasPreset::Large => CanvasSpec { width: 768, height: 768, base_tile: 128 },
            CanvasPreset::Wide => CanvasSpec { width: 1536, height: 768, base_tile: 128 },
        }
    }
}

/// Pixel size of the canvas and the size of one grid cell at multiplier 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub base_tile: u32,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        CanvasPreset::default().spec()
    }
}

impl CanvasSpec {
    /// Cell size for a tile multiplier. A multiplier of zero is treated as one.
    pub fn tile_px(&self, multiplier: u32) -> u32 {
        self.base_tile.saturating_mul(multiplier.max(1))
    }

    /// Largest grid of `tile_px(multiplier)` cells that fits on the canvas.
    pub fn board(&self, multiplier: u32) -> Result<Board, CollageError> {
        let tile = self.tile_px(multiplier);
        if tile == 0 {
            return Err(CollageError::InvalidGrid { width: 0, height: 0, cell: 0 });
        }

        let columns = self.width / tile;
        let rows = self.height / tile;
        if columns == 0 || rows == 0 {
            return Err(CollageError::CanvasTooSmall {
                width: self.width,
                height: self.height,
                tile,
            });
        }

        Board::new(columns, rows, tile)
    }
}
