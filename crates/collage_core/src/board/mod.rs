//! Random tile packing of a cell grid.
//!
//! The board partitions a `width` x `height` grid of square cells into tiles of four
//! shapes. Cells are filled row-major: at every free cell the generator looks at which
//! neighbours are still free and picks one of the shapes that fits, at random.

pub mod grid;
pub mod shape;

use log::debug;
use rand::Rng;

use crate::geometry::{PixelRect, Point};
use crate::CollageError;

use grid::{CellGrid, CellPos};
use shape::TileShape;

/// A placed tile. Its identity is its index in the owning [`Layout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub rect: PixelRect,
    pub cell: CellPos,
    pub shape: TileShape,
}

/// Validated grid dimensions and cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    cell_px: u32,
}

impl Board {
    pub fn new(width: u32, height: u32, cell_px: u32) -> Result<Self, CollageError> {
        let invalid = || CollageError::InvalidGrid { width, height, cell: cell_px };
        if width == 0 || height == 0 || cell_px == 0 {
            return Err(invalid());
        }
        width.checked_mul(cell_px).ok_or_else(invalid)?;
        height.checked_mul(cell_px).ok_or_else(invalid)?;

        Ok(Self { width, height, cell_px })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_px(&self) -> u32 {
        self.cell_px
    }

    /// Fill the grid with randomly shaped tiles.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Layout {
        let mut grid = CellGrid::new(self.width, self.height);
        let mut tiles = Vec::new();

        while !grid.is_filled() {
            let shape = pick_shape(&grid, rng);
            let cell = grid.cursor();
            tiles.push(Tile {
                rect: PixelRect::new(
                    self.cell_px * cell.x,
                    self.cell_px * cell.y,
                    self.cell_px * shape.width_cells(),
                    self.cell_px * shape.height_cells(),
                ),
                cell,
                shape,
            });
            grid.place(shape);
        }

        debug!(
            "generated {} tiles for {}x{} grid ({} px cells)",
            tiles.len(),
            self.width,
            self.height,
            self.cell_px
        );

        Layout { board: *self, tiles }
    }
}

fn pick_shape<R: Rng + ?Sized>(grid: &CellGrid, rng: &mut R) -> TileShape {
    match (grid.can_expand_right(), grid.can_expand_down()) {
        (true, true) => TileShape::ALL[rng.gen_range(0..TileShape::ALL.len())],
        (true, false) => TileShape::ONE_TALL[rng.gen_range(0..TileShape::ONE_TALL.len())],
        (false, true) => TileShape::ONE_WIDE[rng.gen_range(0..TileShape::ONE_WIDE.len())],
        (false, false) => TileShape::Small,
    }
}

/// Ordered tiles produced by one run of [`Board::generate`].
#[derive(Clone, Debug)]
pub struct Layout {
    board: Board,
    tiles: Vec<Tile>,
}

impl Layout {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Pixel extent covered by the grid.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.board.width * self.board.cell_px, self.board.height * self.board.cell_px)
    }

    /// Index of the first tile containing `point`.
    pub fn tile_at(&self, point: Point) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.rect.contains(point))
    }

    /// Text diagram of the packing, one character per cell.
    ///
    /// Tiles are labelled `a`..`z`, `A`..`Z`, `0`..`9` in order, cycling when there are
    /// more tiles than labels.
    pub fn render_ascii(&self) -> String {
        const LABELS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

        let width = self.board.width as usize;
        let height = self.board.height as usize;
        let mut cells = vec!['.'; width * height];

        for (index, tile) in self.tiles.iter().enumerate() {
            let label = LABELS[index % LABELS.len()] as char;
            for dy in 0..tile.shape.height_cells() {
                for dx in 0..tile.shape.width_cells() {
                    let x = (tile.cell.x + dx) as usize;
                    let y = (tile.cell.y + dy) as usize;
                    cells[y * width + x] = label;
                }
            }
        }

        let mut out = String::with_capacity((width + 1) * height);
        for row in cells.chunks(width) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn coverage(layout: &Layout) -> Vec<u32> {
        let board = layout.board();
        let mut counts = vec![0; (board.width() * board.height()) as usize];
        for tile in layout.tiles() {
            for dy in 0..tile.shape.height_cells() {
                for dx in 0..tile.shape.width_cells() {
                    let idx = (tile.cell.y + dy) * board.width() + tile.cell.x + dx;
                    counts[idx as usize] += 1;
                }
            }
        }
        counts
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert!(matches!(Board::new(0, 4, 10), Err(CollageError::InvalidGrid { .. })));
        assert!(matches!(Board::new(4, 0, 10), Err(CollageError::InvalidGrid { .. })));
        assert!(matches!(Board::new(4, 4, 0), Err(CollageError::InvalidGrid { .. })));
        assert!(matches!(Board::new(u32::MAX, 1, 2), Err(CollageError::InvalidGrid { .. })));
    }

    #[test]
    fn two_by_two_always_covers_every_cell() {
        let board = Board::new(2, 2, 100).unwrap();
        for seed in 0..200 {
            let layout = board.generate(&mut StdRng::seed_from_u64(seed));
            assert!(coverage(&layout).iter().all(|&count| count == 1), "seed {seed}");
            let area: u64 = layout.tiles().iter().map(|tile| tile.rect.area()).sum();
            assert_eq!(area, 4 * 100 * 100);
            let cells: u32 = layout.tiles().iter().map(|tile| tile.shape.cell_count()).sum();
            assert_eq!(cells, 4);
        }
    }

    #[test]
    fn single_row_only_uses_one_tall_shapes() {
        let board = Board::new(7, 1, 10).unwrap();
        for seed in 0..50 {
            let layout = board.generate(&mut StdRng::seed_from_u64(seed));
            assert!(layout.tiles().iter().all(|tile| tile.shape.height_cells() == 1));
            assert!(coverage(&layout).iter().all(|&count| count == 1));
        }
    }

    #[test]
    fn single_column_only_uses_one_wide_shapes() {
        let board = Board::new(1, 7, 10).unwrap();
        for seed in 0..50 {
            let layout = board.generate(&mut StdRng::seed_from_u64(seed));
            assert!(layout.tiles().iter().all(|tile| tile.shape.width_cells() == 1));
            assert!(coverage(&layout).iter().all(|&count| count == 1));
        }
    }

    #[test]
    fn one_cell_board_yields_one_small_tile() {
        let layout = Board::new(1, 1, 64).unwrap().generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(layout.tiles(), &[Tile {
            rect: PixelRect::new(0, 0, 64, 64),
            cell: CellPos { x: 0, y: 0 },
            shape: TileShape::Small,
        }]);
    }

    #[test]
    fn tiles_are_emitted_in_row_major_anchor_order() {
        let layout = Board::new(6, 6, 128).unwrap().generate(&mut StdRng::seed_from_u64(7));
        let anchors: Vec<_> = layout.tiles().iter().map(|tile| (tile.cell.y, tile.cell.x)).collect();
        let mut sorted = anchors.clone();
        sorted.sort();
        assert_eq!(anchors, sorted);
    }

    #[test]
    fn tile_at_prefers_earlier_tile_on_shared_edge() {
        let layout = Board::new(2, 1, 50).unwrap().generate(&mut StdRng::seed_from_u64(3));
        assert_eq!(layout.tile_at(Point::new(0, 0)), Some(0));
        assert_eq!(layout.tile_at(Point::new(50, 25)), Some(0));
        assert_eq!(layout.tile_at(Point::new(101, 25)), None);
        assert_eq!(layout.tile_at(Point::new(-3, 25)), None);
    }

    #[test]
    fn ascii_diagram_labels_every_cell() {
        let layout = Board::new(5, 3, 10).unwrap().generate(&mut StdRng::seed_from_u64(11));
        let diagram = layout.render_ascii();
        let rows: Vec<&str> = diagram.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.chars().count() == 5));
        assert!(!diagram.contains('.'));
        assert!(rows[0].starts_with('a'));
    }
}
