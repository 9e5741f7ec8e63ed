use super::shape::TileShape;

/// Position of a cell in the packing grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellPos {
    pub x: u32,
    pub y: u32,
}

/// Occupancy map of a `width` x `height` cell grid plus the row-major fill cursor.
#[derive(Clone, Debug)]
pub struct CellGrid {
    width: u32,
    height: u32,
    occupied: Vec<bool>,
    cursor: CellPos,
}

impl CellGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self { width, height, occupied: vec![false; len], cursor: CellPos::default() }
    }

    pub fn cursor(&self) -> CellPos {
        self.cursor
    }

    /// Cursor has run past the last row.
    pub fn is_filled(&self) -> bool {
        self.cursor.y >= self.height
    }

    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.occupied[self.index(x, y)]
    }

    pub fn can_expand_right(&self) -> bool {
        let CellPos { x, y } = self.cursor;
        x + 1 < self.width && !self.is_occupied(x + 1, y)
    }

    pub fn can_expand_down(&self) -> bool {
        let CellPos { x, y } = self.cursor;
        y + 1 < self.height && !self.is_occupied(x, y + 1)
    }

    /// Occupies the footprint of `shape` anchored at the cursor, then moves the cursor to
    /// the next free cell.
    pub fn place(&mut self, shape: TileShape) {
        let CellPos { x, y } = self.cursor;
        for dy in 0..shape.height_cells() {
            for dx in 0..shape.width_cells() {
                let idx = self.index(x + dx, y + dy);
                debug_assert!(!self.occupied[idx], "cell ({}, {}) placed twice", x + dx, y + dy);
                self.occupied[idx] = true;
            }
        }
        self.advance(shape);
    }

    fn advance(&mut self, shape: TileShape) {
        let mut x = self.cursor.x + shape.width_cells();
        let mut y = self.cursor.y;

        if x == self.width {
            x -= 1;
        }

        while y < self.height && self.is_occupied(x, y) {
            x += 1;
            if x == self.width {
                x = 0;
                y += 1;
            }
        }

        self.cursor = CellPos { x, y };
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_respects_grid_bounds() {
        let grid = CellGrid::new(1, 1);
        assert!(!grid.can_expand_right());
        assert!(!grid.can_expand_down());

        let grid = CellGrid::new(2, 1);
        assert!(grid.can_expand_right());
        assert!(!grid.can_expand_down());
    }

    #[test]
    fn cursor_skips_cells_covered_by_tall_tiles() {
        let mut grid = CellGrid::new(3, 2);
        grid.place(TileShape::Tall);
        assert_eq!(grid.cursor(), CellPos { x: 1, y: 0 });
        grid.place(TileShape::Wide);
        // Row 0 is full, (0, 1) is covered by the tall tile.
        assert_eq!(grid.cursor(), CellPos { x: 1, y: 1 });
        assert!(!grid.can_expand_down());
        assert!(grid.can_expand_right());
    }

    #[test]
    fn wide_tile_at_row_end_clamps_cursor() {
        let mut grid = CellGrid::new(2, 2);
        grid.place(TileShape::Wide);
        assert_eq!(grid.cursor(), CellPos { x: 0, y: 1 });
        grid.place(TileShape::Wide);
        assert!(grid.is_filled());
    }
}
