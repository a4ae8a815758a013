use std::slice;

use crate::coordinates::{CellCoordinate, GridDirection};
use crate::units::{ColumnsCount, RowsCount};

/// Which of the two wall grids of a maze a wall lives in.
///
/// `Vertical` walls separate horizontally adjacent cells (a wall you see standing up between
/// a cell and its eastern neighbour), `Horizontal` walls separate vertically adjacent cells.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum WallOrientation {
    Vertical,
    Horizontal,
}

/// Location of one internal wall: the grid it belongs to and its (row, column) in that grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct WallSlot {
    pub orientation: WallOrientation,
    pub row: usize,
    pub column: usize,
}

impl WallSlot {
    /// The wall crossed when stepping from `coord` in `direction`.
    ///
    /// Returns `None` when the step would leave a grid of `rows` x `columns` cells, there is no
    /// internal wall on the outer boundary.
    pub fn between(coord: CellCoordinate,
                   direction: GridDirection,
                   rows: RowsCount,
                   columns: ColumnsCount)
                   -> Option<WallSlot> {

        let _ = coord.offset(direction, rows, columns)?;

        let CellCoordinate { row, column } = coord;
        let slot = match direction {
            GridDirection::East => WallSlot::vertical(row, column),
            GridDirection::West => WallSlot::vertical(row, column - 1),
            GridDirection::North => WallSlot::horizontal(row - 1, column),
            GridDirection::South => WallSlot::horizontal(row, column),
        };
        Some(slot)
    }

    fn vertical(row: usize, column: usize) -> WallSlot {
        WallSlot { orientation: WallOrientation::Vertical, row, column }
    }

    fn horizontal(row: usize, column: usize) -> WallSlot {
        WallSlot { orientation: WallOrientation::Horizontal, row, column }
    }

    /// The two cells this wall separates, top/left cell first.
    pub fn flanking_cells(&self) -> (CellCoordinate, CellCoordinate) {
        let near = CellCoordinate::new(self.row, self.column);
        let far = match self.orientation {
            WallOrientation::Vertical => CellCoordinate::new(self.row, self.column + 1),
            WallOrientation::Horizontal => CellCoordinate::new(self.row + 1, self.column),
        };
        (near, far)
    }
}

/// A grid of wall openings. `true` at (row, column) means the wall there has been knocked down
/// and the two cells either side of it are joined by a passage.
///
/// Every row is its own allocation, and the shape is stored separately from the rows so that
/// degenerate grids such as 1 x 0 (one row of no walls) and 0 x 1 still report their shape.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct WallGrid {
    openings: Vec<Vec<bool>>,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl WallGrid {
    /// A grid with every wall closed.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> WallGrid {
        let openings = (0..rows.0).map(|_| vec![false; columns.0]).collect();
        WallGrid { openings, rows, columns }
    }

    /// Vertical walls for a maze of `rows` x `columns` cells: rows x (columns - 1).
    pub fn vertical_for(rows: RowsCount, columns: ColumnsCount) -> WallGrid {
        WallGrid::new(rows, ColumnsCount(columns.0.saturating_sub(1)))
    }

    /// Horizontal walls for a maze of `rows` x `columns` cells: (rows - 1) x columns.
    pub fn horizontal_for(rows: RowsCount, columns: ColumnsCount) -> WallGrid {
        WallGrid::new(RowsCount(rows.0.saturating_sub(1)), columns)
    }

    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    pub fn shape(&self) -> (RowsCount, ColumnsCount) {
        (self.rows, self.columns)
    }

    /// Is the wall at (row, column) open? `None` if there is no such wall.
    pub fn is_open(&self, row: usize, column: usize) -> Option<bool> {
        self.openings.get(row).and_then(|r| r.get(column)).cloned()
    }

    /// Knock down the wall at (row, column). Returns false if there is no such wall.
    pub(crate) fn open(&mut self, row: usize, column: usize) -> bool {
        match self.openings.get_mut(row).and_then(|r| r.get_mut(column)) {
            Some(wall) => {
                *wall = true;
                true
            }
            None => false,
        }
    }

    pub fn open_count(&self) -> usize {
        self.openings
            .iter()
            .map(|row| row.iter().filter(|open| **open).count())
            .sum()
    }

    pub fn closed_count(&self) -> usize {
        self.rows.0 * self.columns.0 - self.open_count()
    }

    pub fn iter_rows(&self) -> slice::Iter<Vec<bool>> {
        self.openings.iter()
    }

    /// Every (row, column, is_open) entry in row major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.openings
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, open)| (r, c, *open)))
    }

    pub fn as_rows(&self) -> &[Vec<bool>] {
        &self.openings
    }

    pub fn into_rows(self) -> Vec<Vec<bool>> {
        self.openings
    }
}
