use log::{debug, trace, warn};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;

use crate::coordinates::{CellCoordinate, GridDirection};
use crate::errors::{ErrorKind, Result};
use crate::maze::Maze;
use crate::units::{ColumnsCount, RowsCount};
use crate::walls::{WallGrid, WallOrientation, WallSlot};

/// How the depth first traversal keeps track of where to backtrack to.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub enum Traversal {
    /// Frames live in a heap allocated stack, so any grid that fits in memory can be carved.
    #[default]
    ExplicitStack,
    /// Plain recursion. The recursion depth can reach rows * columns, so grids with more than
    /// `MAX_CALL_STACK_CELLS` cells are carved with `ExplicitStack` instead. Produces exactly the
    /// same maze as `ExplicitStack` for the same rng state.
    CallStack,
}

/// Largest grid, in cells, that `Traversal::CallStack` will carve by recursion.
/// Kept well inside the 2MB stack of a spawned thread.
pub const MAX_CALL_STACK_CELLS: usize = 1024;

type Candidates = SmallVec<[GridDirection; 4]>;

/// Apply the recursive backtracker maze generation algorithm, carving a perfect maze of
/// `rows` x `columns` cells.
///
/// Starting from a random cell it does a depth first walk, visiting the neighbours of each cell
/// in a random order. A wall is knocked down only at the moment an unvisited neighbour is
/// discovered, so every cell is reached by exactly one passage and the result is a spanning
/// tree of the grid: `rows * columns - 1` open walls and a single route between any two cells.
/// When every neighbour of a cell is visited or off the grid we simply backtrack.
///
/// The rng decides the start cell (row then column) and shuffles the four candidate
/// neighbours of each visited cell, so a seeded rng gives a reproducible maze.
///
/// Fails with `ErrorKind::InvalidDimension` if `rows` or `columns` is zero.
pub fn recursive_backtracker<R: Rng>(rows: RowsCount,
                                     columns: ColumnsCount,
                                     rng: &mut R)
                                     -> Result<Maze> {
    recursive_backtracker_with_traversal(rows, columns, rng, Traversal::default())
}

pub fn recursive_backtracker_with_traversal<R: Rng>(rows: RowsCount,
                                                    columns: ColumnsCount,
                                                    rng: &mut R,
                                                    traversal: Traversal)
                                                    -> Result<Maze> {
    if rows.0 < 1 || columns.0 < 1 {
        return Err(ErrorKind::InvalidDimension(rows.0, columns.0).into());
    }

    let start = CellCoordinate::new(rng.random_range(0..rows.0), rng.random_range(0..columns.0));
    let traversal = match traversal {
        Traversal::CallStack if rows.0 * columns.0 > MAX_CALL_STACK_CELLS => {
            warn!("{} x {} is over {} cells, carving with an explicit stack instead of recursion",
                  rows.0, columns.0, MAX_CALL_STACK_CELLS);
            Traversal::ExplicitStack
        }
        requested => requested,
    };
    debug!("Carving a {} x {} maze from {:?} using the {:?} traversal",
           rows.0, columns.0, start, traversal);

    let mut carver = Carver::new(rows, columns);
    match traversal {
        Traversal::ExplicitStack => carver.carve_with_stack(start, rng),
        Traversal::CallStack => carver.carve_recursively(start, rng),
    }

    Ok(carver.into_maze())
}

/// Recursive backtracker driven by an `XorShiftRng` seeded from `seed`.
pub fn seeded(rows: RowsCount, columns: ColumnsCount, seed: u64) -> Result<Maze> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    recursive_backtracker(rows, columns, &mut rng)
}

/// Recursive backtracker driven by the thread local rng.
pub fn thread_random(rows: RowsCount, columns: ColumnsCount) -> Result<Maze> {
    let mut rng = rand::rng();
    recursive_backtracker(rows, columns, &mut rng)
}

/// Working state for one generation run. Owned exclusively by that run.
struct Carver {
    rows: RowsCount,
    columns: ColumnsCount,
    visited: Vec<Vec<bool>>,
    vertical_walls: WallGrid,
    horizontal_walls: WallGrid,
}

/// A cell being visited and the shuffled directions still to try from it.
struct Frame {
    cell: CellCoordinate,
    candidates: Candidates,
    next: usize,
}

impl Frame {
    fn next_direction(&mut self) -> Option<GridDirection> {
        let direction = self.candidates.get(self.next).cloned();
        self.next += 1;
        direction
    }
}

impl Carver {
    fn new(rows: RowsCount, columns: ColumnsCount) -> Carver {
        Carver {
            rows,
            columns,
            visited: (0..rows.0).map(|_| vec![false; columns.0]).collect(),
            vertical_walls: WallGrid::vertical_for(rows, columns),
            horizontal_walls: WallGrid::horizontal_for(rows, columns),
        }
    }

    fn is_visited(&self, coord: CellCoordinate) -> bool {
        self.visited[coord.row][coord.column]
    }

    /// Mark `coord` visited and shuffle its candidate directions.
    /// `None` if it had already been visited, in which case the rng is left untouched.
    fn visit<R: Rng>(&mut self, coord: CellCoordinate, rng: &mut R) -> Option<Frame> {
        if self.is_visited(coord) {
            return None;
        }
        self.visited[coord.row][coord.column] = true;

        let mut candidates: Candidates = GridDirection::ALL.iter().cloned().collect();
        candidates.shuffle(rng);
        Some(Frame { cell: coord, candidates, next: 0 })
    }

    /// The unvisited, on grid neighbour of `cell` in `direction`, with the wall between them
    /// knocked down. `None` means there is nothing to carve that way.
    fn carve_towards(&mut self,
                     cell: CellCoordinate,
                     direction: GridDirection)
                     -> Option<CellCoordinate> {
        let neighbour = cell.offset(direction, self.rows, self.columns)?;
        if self.is_visited(neighbour) {
            return None;
        }
        let slot = WallSlot::between(cell, direction, self.rows, self.columns)?;
        let walls = match slot.orientation {
            WallOrientation::Vertical => &mut self.vertical_walls,
            WallOrientation::Horizontal => &mut self.horizontal_walls,
        };
        walls.open(slot.row, slot.column);
        trace!("Opened {:?} passage {:?} -> {:?}", direction, cell, neighbour);
        Some(neighbour)
    }

    fn carve_with_stack<R: Rng>(&mut self, start: CellCoordinate, rng: &mut R) {
        let mut stack: Vec<Frame> = self.visit(start, rng).into_iter().collect();

        while let Some(frame) = stack.last_mut() {
            let cell = frame.cell;
            match frame.next_direction() {
                Some(direction) => {
                    if let Some(neighbour) = self.carve_towards(cell, direction) {
                        if let Some(neighbour_frame) = self.visit(neighbour, rng) {
                            stack.push(neighbour_frame);
                        }
                    }
                }
                None => {
                    let _ = stack.pop();
                }
            }
        }
    }

    fn carve_recursively<R: Rng>(&mut self, cell: CellCoordinate, rng: &mut R) {
        let mut frame = match self.visit(cell, rng) {
            Some(frame) => frame,
            None => return,
        };
        while let Some(direction) = frame.next_direction() {
            if let Some(neighbour) = self.carve_towards(cell, direction) {
                self.carve_recursively(neighbour, rng);
            }
        }
    }

    fn into_maze(self) -> Maze {
        debug_assert!(self.visited.iter().all(|row| row.iter().all(|v| *v)),
                      "Every cell is reachable on a rectangular grid");
        Maze::from_parts(self.rows, self.columns, self.vertical_walls, self.horizontal_walls)
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::connectivity;
    use itertools::iproduct;
    use quickcheck::quickcheck;

    fn small_dimensions(rows: u8, columns: u8) -> (RowsCount, ColumnsCount) {
        (RowsCount(rows as usize % 16 + 1), ColumnsCount(columns as usize % 16 + 1))
    }

    fn is_invalid_dimension(result: Result<Maze>, rows: usize, columns: usize) -> bool {
        match result {
            Err(e) => match *e.kind() {
                ErrorKind::InvalidDimension(r, c) => r == rows && c == columns,
                _ => false,
            },
            Ok(_) => false,
        }
    }

    #[test]
    fn spanning_tree_passage_count() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = small_dimensions(rows, columns);
            let maze = seeded(rows, columns, seed).unwrap();
            maze.vertical_walls().open_count() + maze.horizontal_walls().open_count() ==
                rows.0 * columns.0 - 1
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn every_cell_reachable_from_every_cell() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = small_dimensions(rows, columns);
            let maze = seeded(rows, columns, seed).unwrap();
            maze.iter().all(|start| {
                connectivity::reachable_cells(&maze, start).map(|reached| reached.len()) ==
                    Some(maze.size())
            })
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn no_cycles() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = small_dimensions(rows, columns);
            let maze = seeded(rows, columns, seed).unwrap();
            let graph = connectivity::to_graph(&maze);
            !petgraph::algo::is_cyclic_undirected(&graph) &&
                petgraph::algo::connected_components(&graph) == 1
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn same_seed_same_maze() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = small_dimensions(rows, columns);
            seeded(rows, columns, seed).unwrap() == seeded(rows, columns, seed).unwrap()
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn traversals_agree() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = small_dimensions(rows, columns);
            let mut stack_rng = XorShiftRng::seed_from_u64(seed);
            let mut call_rng = XorShiftRng::seed_from_u64(seed);
            let with_stack = recursive_backtracker_with_traversal(rows,
                                                                  columns,
                                                                  &mut stack_rng,
                                                                  Traversal::ExplicitStack);
            let with_calls = recursive_backtracker_with_traversal(rows,
                                                                  columns,
                                                                  &mut call_rng,
                                                                  Traversal::CallStack);
            with_stack.unwrap() == with_calls.unwrap()
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn different_seeds_give_different_mazes() {
        let (rows, columns) = (RowsCount(16), ColumnsCount(16));
        let first = seeded(rows, columns, 1).unwrap();
        let all_same = (2..10).all(|seed| seeded(rows, columns, seed).unwrap() == first);
        assert!(!all_same);
    }

    #[test]
    fn single_cell() {
        let maze = seeded(RowsCount(1), ColumnsCount(1), 7).unwrap();
        assert_eq!(maze.passages_count(), 0);

        let (vertical, horizontal) = maze.into_walls();
        assert_eq!(vertical.shape(), (RowsCount(1), ColumnsCount(0)));
        assert_eq!(horizontal.shape(), (RowsCount(0), ColumnsCount(1)));
        assert_eq!(vertical.as_rows(), &[Vec::<bool>::new()]);
        assert!(horizontal.as_rows().is_empty());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(is_invalid_dimension(seeded(RowsCount(0), ColumnsCount(5), 1), 0, 5));
        assert!(is_invalid_dimension(seeded(RowsCount(5), ColumnsCount(0), 1), 5, 0));
        assert!(is_invalid_dimension(seeded(RowsCount(0), ColumnsCount(0), 1), 0, 0));
        assert!(is_invalid_dimension(thread_random(RowsCount(0), ColumnsCount(3)), 0, 3));

        let mut rng = XorShiftRng::seed_from_u64(3);
        let result = recursive_backtracker_with_traversal(RowsCount(0),
                                                          ColumnsCount(2),
                                                          &mut rng,
                                                          Traversal::CallStack);
        assert!(is_invalid_dimension(result, 0, 2));
    }

    #[test]
    fn invalid_dimension_message() {
        let err = seeded(RowsCount(0), ColumnsCount(5), 1).unwrap_err();
        assert_eq!(err.to_string(),
                   "invalid maze dimensions 0 x 5: rows and columns must both be at least 1");
    }

    #[test]
    fn two_by_two_seed_42() {
        let maze = seeded(RowsCount(2), ColumnsCount(2), 42).unwrap();
        assert_eq!(maze.passages_count(), 3);
        for start in maze.iter() {
            let reached = connectivity::reachable_cells(&maze, start).unwrap();
            assert_eq!(reached.len(), 4);
        }
    }

    #[test]
    fn one_dimensional_grids_are_corridors() {
        let row = seeded(RowsCount(1), ColumnsCount(12), 5).unwrap();
        assert_eq!(row.vertical_walls().as_rows(), &[vec![true; 11]]);
        assert!(row.horizontal_walls().as_rows().is_empty());

        let column = seeded(RowsCount(12), ColumnsCount(1), 5).unwrap();
        assert!(column.vertical_walls().iter_rows().all(|r| r.is_empty()));
        assert!(column.horizontal_walls().iter_rows().all(|r| r == &vec![true]));
    }

    #[test]
    fn large_grid_does_not_exhaust_the_call_stack() {
        let (rows, columns) = (RowsCount(400), ColumnsCount(500));
        let maze = seeded(rows, columns, 99).unwrap();
        assert_eq!(maze.passages_count(), rows.0 * columns.0 - 1);
        assert!(connectivity::is_perfect(&maze));
    }

    #[test]
    fn call_stack_request_on_a_large_grid_is_carved_iteratively() {
        let (rows, columns) = (RowsCount(1000), ColumnsCount(1000));
        let mut call_rng = XorShiftRng::seed_from_u64(8);
        let maze = recursive_backtracker_with_traversal(rows,
                                                        columns,
                                                        &mut call_rng,
                                                        Traversal::CallStack).unwrap();
        assert_eq!(maze.passages_count(), rows.0 * columns.0 - 1);

        let mut stack_rng = XorShiftRng::seed_from_u64(8);
        let with_stack = recursive_backtracker_with_traversal(rows,
                                                              columns,
                                                              &mut stack_rng,
                                                              Traversal::ExplicitStack).unwrap();
        assert!(maze == with_stack);
    }

    #[test]
    fn call_stack_limit_is_inclusive() {
        // 32 x 32 is exactly at the limit and still recurses; equal output either way.
        let (rows, columns) = (RowsCount(32), ColumnsCount(32));
        assert_eq!(rows.0 * columns.0, MAX_CALL_STACK_CELLS);
        let mut call_rng = XorShiftRng::seed_from_u64(4);
        let mut stack_rng = XorShiftRng::seed_from_u64(4);
        let with_calls =
            recursive_backtracker_with_traversal(rows, columns, &mut call_rng, Traversal::CallStack);
        let with_stack = recursive_backtracker_with_traversal(rows,
                                                              columns,
                                                              &mut stack_rng,
                                                              Traversal::ExplicitStack);
        assert!(with_calls.unwrap() == with_stack.unwrap());
    }

    #[test]
    fn default_traversal_is_explicit_stack() {
        assert_eq!(Traversal::default(), Traversal::ExplicitStack);
    }

    #[test]
    fn thread_rng_mazes_are_perfect() {
        for _ in 0..20 {
            let maze = thread_random(RowsCount(9), ColumnsCount(13)).unwrap();
            assert!(connectivity::is_perfect(&maze));
        }
    }

    #[test]
    fn revisiting_is_a_no_op() {
        let mut carver = Carver::new(RowsCount(2), ColumnsCount(2));
        let mut rng = XorShiftRng::seed_from_u64(11);
        let origin = CellCoordinate::new(0, 0);
        assert!(carver.visit(origin, &mut rng).is_some());
        assert!(carver.visit(origin, &mut rng).is_none());
        assert_eq!(carver.vertical_walls.open_count() + carver.horizontal_walls.open_count(), 0);
    }

    #[test]
    fn carving_skips_visited_and_off_grid_neighbours() {
        let mut carver = Carver::new(RowsCount(2), ColumnsCount(2));
        let mut rng = XorShiftRng::seed_from_u64(11);
        let origin = CellCoordinate::new(0, 0);
        let _ = carver.visit(origin, &mut rng);
        let _ = carver.visit(CellCoordinate::new(0, 1), &mut rng);

        assert_eq!(carver.carve_towards(origin, GridDirection::North), None);
        assert_eq!(carver.carve_towards(origin, GridDirection::West), None);
        assert_eq!(carver.carve_towards(origin, GridDirection::East), None);
        assert_eq!(carver.carve_towards(origin, GridDirection::South),
                   Some(CellCoordinate::new(1, 0)));
        assert_eq!(carver.horizontal_walls.is_open(0, 0), Some(true));
        assert_eq!(carver.vertical_walls.open_count(), 0);
    }

    #[test]
    fn visited_rows_are_independent() {
        let mut carver = Carver::new(RowsCount(3), ColumnsCount(3));
        let mut rng = XorShiftRng::seed_from_u64(0);
        let _ = carver.visit(CellCoordinate::new(1, 1), &mut rng);
        assert!(carver.is_visited(CellCoordinate::new(1, 1)));
        assert!(!carver.is_visited(CellCoordinate::new(0, 1)));
        assert!(!carver.is_visited(CellCoordinate::new(2, 1)));
    }

    #[test]
    fn shuffled_candidates_are_a_permutation() {
        let mut carver = Carver::new(RowsCount(50), ColumnsCount(50));
        let mut rng = XorShiftRng::seed_from_u64(21);
        let mut first_directions = Vec::new();
        for coord in iproduct!(0..50, 0..50).map(CellCoordinate::from) {
            let frame = carver.visit(coord, &mut rng).unwrap();
            let mut sorted = frame.candidates.to_vec();
            sorted.sort_by_key(|dir| GridDirection::ALL.iter().position(|d| d == dir));
            assert_eq!(&sorted[..], &GridDirection::ALL[..]);
            first_directions.push(frame.candidates[0]);
        }
        // 2500 shuffles, each direction should lead a good share of them.
        for dir in GridDirection::ALL.iter() {
            let leading = first_directions.iter().filter(|d| *d == dir).count();
            assert!(leading > 450 && leading < 800, "{:?} led {} shuffles", dir, leading);
        }
    }
}
