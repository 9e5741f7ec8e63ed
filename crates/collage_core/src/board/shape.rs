/// Footprint of a tile measured in grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileShape {
    /// Two cells wide, two cells high.
    Big,
    /// One cell wide, two cells high.
    Tall,
    /// A single cell.
    Small,
    /// Two cells wide, one cell high.
    Wide,
}

impl TileShape {
    pub const ALL: [TileShape; 4] = [TileShape::Big, TileShape::Tall, TileShape::Small, TileShape::Wide];

    /// Shapes with a height factor of one, usable when only the right neighbour is free.
    pub const ONE_TALL: [TileShape; 2] = [TileShape::Small, TileShape::Wide];

    /// Shapes with a width factor of one, usable when only the cell below is free.
    pub const ONE_WIDE: [TileShape; 2] = [TileShape::Tall, TileShape::Small];

    pub const fn width_cells(self) -> u32 {
        match self {
            TileShape::Big | TileShape::Wide => 2,
            TileShape::Tall | TileShape::Small => 1,
        }
    }

    pub const fn height_cells(self) -> u32 {
        match self {
            TileShape::Big | TileShape::Tall => 2,
            TileShape::Wide | TileShape::Small => 1,
        }
    }

    pub const fn cell_count(self) -> u32 {
        self.width_cells() * self.height_cells()
    }

    /// Shape whose footprint is `width` x `height` cells, if any.
    pub fn from_cells(width: u32, height: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.width_cells() == width && shape.height_cells() == height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restricted_sets_match_their_factor() {
        assert!(TileShape::ONE_TALL.iter().all(|shape| shape.height_cells() == 1));
        assert!(TileShape::ONE_WIDE.iter().all(|shape| shape.width_cells() == 1));
    }

    #[test]
    fn from_cells_covers_every_shape() {
        for shape in TileShape::ALL {
            assert_eq!(TileShape::from_cells(shape.width_cells(), shape.height_cells()), Some(shape));
        }
        assert_eq!(TileShape::from_cells(3, 1), None);
    }
}
