use smallvec::SmallVec;

use crate::units::{ColumnsCount, RowsCount};

/// A cell position on a rectangular maze grid.
///
/// Row 0 is the top row, column 0 the left most column.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub row: usize,
    pub column: usize,
}

impl CellCoordinate {
    pub fn new(row: usize, column: usize) -> CellCoordinate {
        CellCoordinate { row, column }
    }

    /// Convert a row major index back into a coordinate on a grid with `columns` cells per row.
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> CellCoordinate {
        let row = index / columns.0;
        let column = index - (row * columns.0);
        CellCoordinate { row, column }
    }

    /// The row major index of this coordinate, or `None` if it lies outside the grid.
    pub fn row_major_index(&self, rows: RowsCount, columns: ColumnsCount) -> Option<usize> {
        if self.is_within(rows, columns) {
            Some(self.row * columns.0 + self.column)
        } else {
            None
        }
    }

    pub fn is_within(&self, rows: RowsCount, columns: ColumnsCount) -> bool {
        self.row < rows.0 && self.column < columns.0
    }

    /// The adjacent coordinate in `direction`, if it is on the grid.
    pub fn offset(&self,
                  direction: GridDirection,
                  rows: RowsCount,
                  columns: ColumnsCount)
                  -> Option<CellCoordinate> {
        let (row, column) = (self.row, self.column);
        let neighbour = match direction {
            GridDirection::North => row.checked_sub(1).map(|r| CellCoordinate::new(r, column)),
            GridDirection::South => Some(CellCoordinate::new(row + 1, column)),
            GridDirection::East => Some(CellCoordinate::new(row, column + 1)),
            GridDirection::West => column.checked_sub(1).map(|c| CellCoordinate::new(row, c)),
        };
        neighbour.filter(|coord| coord.is_within(rows, columns))
    }
}

impl From<(usize, usize)> for CellCoordinate {
    fn from(row_column_pair: (usize, usize)) -> CellCoordinate {
        CellCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[CellCoordinate; 4]>;

/// North is up (row - 1), South down (row + 1), East right (column + 1) and West left (column - 1).
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum GridDirection {
    North,
    South,
    East,
    West,
}

impl GridDirection {
    /// Up, down, right, left.
    pub const ALL: [GridDirection; 4] = [GridDirection::North,
                                         GridDirection::South,
                                         GridDirection::East,
                                         GridDirection::West];

    pub fn opposite(self) -> GridDirection {
        match self {
            GridDirection::North => GridDirection::South,
            GridDirection::South => GridDirection::North,
            GridDirection::East => GridDirection::West,
            GridDirection::West => GridDirection::East,
        }
    }
}
