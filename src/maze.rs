use std::fmt;

use itertools::iproduct;

use crate::coordinates::{CellCoordinate, CoordinateSmallVec, GridDirection};
use crate::units::{ColumnsCount, RowsCount};
use crate::walls::{WallGrid, WallOrientation, WallSlot};

/// A generated maze: the grid dimensions plus the vertical and horizontal wall opening grids.
///
/// A `Maze` is immutable once built. Take the wall grids out with `into_walls` if ownership is
/// needed, e.g. to hand them to a rendering layer.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Maze {
    rows: RowsCount,
    columns: ColumnsCount,
    vertical_walls: WallGrid,
    horizontal_walls: WallGrid,
}

impl Maze {
    /// Assemble a maze from wall grids whose shapes already match `rows` x `columns`.
    pub(crate) fn from_parts(rows: RowsCount,
                             columns: ColumnsCount,
                             vertical_walls: WallGrid,
                             horizontal_walls: WallGrid)
                             -> Maze {
        debug_assert_eq!(vertical_walls.shape(),
                         WallGrid::vertical_for(rows, columns).shape());
        debug_assert_eq!(horizontal_walls.shape(),
                         WallGrid::horizontal_for(rows, columns).shape());
        Maze { rows, columns, vertical_walls, horizontal_walls }
    }

    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Number of cells.
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    /// rows x (columns - 1) walls between horizontally adjacent cells.
    pub fn vertical_walls(&self) -> &WallGrid {
        &self.vertical_walls
    }

    /// (rows - 1) x columns walls between vertically adjacent cells.
    pub fn horizontal_walls(&self) -> &WallGrid {
        &self.horizontal_walls
    }

    /// (vertical walls, horizontal walls)
    pub fn into_walls(self) -> (WallGrid, WallGrid) {
        (self.vertical_walls, self.horizontal_walls)
    }

    pub fn is_valid_coordinate(&self, coord: CellCoordinate) -> bool {
        coord.is_within(self.rows, self.columns)
    }

    pub fn cell_index(&self, coord: CellCoordinate) -> Option<usize> {
        coord.row_major_index(self.rows, self.columns)
    }

    pub fn neighbour_at_direction(&self,
                                  coord: CellCoordinate,
                                  direction: GridDirection)
                                  -> Option<CellCoordinate> {
        if self.is_valid_coordinate(coord) {
            coord.offset(direction, self.rows, self.columns)
        } else {
            None
        }
    }

    /// Is there a passage from `coord` to its neighbour in `direction`?
    ///
    /// Always false on the outer boundary or for an invalid coordinate.
    pub fn is_neighbour_linked(&self, coord: CellCoordinate, direction: GridDirection) -> bool {
        if !self.is_valid_coordinate(coord) {
            return false;
        }
        WallSlot::between(coord, direction, self.rows, self.columns)
            .and_then(|slot| self.is_slot_open(slot))
            .unwrap_or(false)
    }

    pub fn is_slot_open(&self, slot: WallSlot) -> Option<bool> {
        match slot.orientation {
            WallOrientation::Vertical => self.vertical_walls.is_open(slot.row, slot.column),
            WallOrientation::Horizontal => self.horizontal_walls.is_open(slot.row, slot.column),
        }
    }

    /// Cells joined to `coord` by a passage, `None` if the coordinate is not on the grid.
    pub fn links(&self, coord: CellCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked = GridDirection::ALL
            .iter()
            .filter(|dir| self.is_neighbour_linked(coord, **dir))
            .filter_map(|dir| coord.offset(*dir, self.rows, self.columns))
            .collect();
        Some(linked)
    }

    /// Total open walls across both grids. A perfect maze has `size() - 1`.
    pub fn passages_count(&self) -> usize {
        self.vertical_walls.open_count() + self.horizontal_walls.open_count()
    }

    /// Every cell in row major order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoordinate> {
        iproduct!(0..self.rows.0, 0..self.columns.0).map(CellCoordinate::from)
    }

    /// Each passage once, as the pair of cells it joins (top/left cell first).
    pub fn iter_passages(&self) -> impl Iterator<Item = (CellCoordinate, CellCoordinate)> + '_ {
        let vertical = self.vertical_walls
            .iter()
            .filter(|&(_, _, open)| open)
            .map(|(row, column, _)| (CellCoordinate::new(row, column),
                                     CellCoordinate::new(row, column + 1)));
        let horizontal = self.horizontal_walls
            .iter()
            .filter(|&(_, _, open)| open)
            .map(|(row, column, _)| (CellCoordinate::new(row, column),
                                     CellCoordinate::new(row + 1, column)));
        vertical.chain(horizontal)
    }

    /// Cells with exactly one passage out.
    pub fn dead_ends(&self) -> Vec<CellCoordinate> {
        self.iter()
            .filter(|coord| self.links(*coord).map_or(false, |links| links.len() == 1))
            .collect()
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let rows_count = self.rows.0;
        let columns_count = self.columns.0;
        let cc = CellCoordinate::new;

        // North boundary: every corner along it drops a wall down unless the cell to its
        // left has an open east side.
        let mut output = String::from(WALL_RD);
        for column in 0..columns_count {
            output.push_str(WALL_LR_3);
            let is_last_cell = column == columns_count - 1;
            if is_last_cell {
                output.push_str(WALL_LD);
            } else if self.is_neighbour_linked(cc(0, column), GridDirection::East) {
                output.push_str(WALL_LR);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for row in 0..rows_count {

            let is_last_row = row == rows_count - 1;

            // Each cell uses the southern wall of the cell above it as its own northern wall, so
            // a row only draws the cell bodies, the east sides and the south sides + corners.
            let mut middle_section = String::from(WALL_UD);
            let mut bottom_section = if is_last_row {
                String::from(WALL_RU)
            } else if self.is_neighbour_linked(cc(row, 0), GridDirection::South) {
                String::from(WALL_UD)
            } else {
                String::from(WALL_RUD)
            };

            for column in 0..columns_count {
                let cell = cc(row, column);
                let is_last_column = column == columns_count - 1;
                let east_open = self.is_neighbour_linked(cell, GridDirection::East);
                let south_open = self.is_neighbour_linked(cell, GridDirection::South);

                middle_section.push_str("   ");
                middle_section.push_str(if east_open { " " } else { WALL_UD });

                bottom_section.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let show_left_section = !south_open;
                        let show_up_section = !east_open;
                        let show_right_section =
                            !self.is_neighbour_linked(cc(row, column + 1), GridDirection::South);
                        let show_down_section =
                            !self.is_neighbour_linked(cc(row + 1, column), GridDirection::East);

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            (false, false, false, false) => " ",
                        }
                    }
                };
                bottom_section.push_str(corner);
            }

            output.push_str(&middle_section);
            output.push('\n');
            output.push_str(&bottom_section);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
