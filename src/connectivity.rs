use bit_set::BitSet;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::coordinates::CellCoordinate;
use crate::maze::Maze;

/// Flood fill from `start` through open passages.
///
/// The returned set holds the row major index of every reachable cell, `start` included.
/// `None` if `start` is not on the maze.
pub fn reachable_cells(maze: &Maze, start: CellCoordinate) -> Option<BitSet> {

    let start_index = maze.cell_index(start)?;
    let mut reached = BitSet::with_capacity(maze.size());
    let _ = reached.insert(start_index);

    // `reached` doubles as the visited set, so the frontier never holds a cell twice.
    let mut frontier = vec![start];
    while !frontier.is_empty() {

        let mut new_frontier = vec![];
        for cell_coord in &frontier {
            for link_coordinate in maze.links(*cell_coord).into_iter().flatten() {
                if let Some(link_index) = maze.cell_index(link_coordinate) {
                    if reached.insert(link_index) {
                        new_frontier.push(link_coordinate);
                    }
                }
            }
        }
        frontier = new_frontier;
    }

    Some(reached)
}

/// A maze is perfect if it is a spanning tree of its grid: every cell reachable and exactly
/// `size() - 1` passages, so there are no loops.
pub fn is_perfect(maze: &Maze) -> bool {
    let all_reachable = reachable_cells(maze, CellCoordinate::new(0, 0))
        .map_or(false, |reached| reached.len() == maze.size());
    all_reachable && maze.passages_count() == maze.size() - 1
}

/// The maze as an undirected graph. Node `i` is the cell with row major index `i` and carries
/// its coordinate; every passage is an edge.
pub fn to_graph(maze: &Maze) -> UnGraph<CellCoordinate, ()> {
    let mut graph = UnGraph::with_capacity(maze.size(), maze.passages_count());
    for coord in maze.iter() {
        let _ = graph.add_node(coord);
    }
    for (a, b) in maze.iter_passages() {
        if let (Some(a_index), Some(b_index)) = (maze.cell_index(a), maze.cell_index(b)) {
            let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }
    }
    graph
}

/// Edge list text: a first line `n m` (cells count, passages count) then one line per passage
/// holding the two cells' 1-based row major indices.
pub fn edge_list(maze: &Maze) -> String {

    let mut graph_data = String::new();
    graph_data.push_str(&maze.size().to_string());
    graph_data.push(' ');
    graph_data.push_str(&maze.passages_count().to_string());
    graph_data.push('\n');

    for (src, dst) in maze.iter_passages() {
        if let (Some(index_a), Some(index_b)) = (maze.cell_index(src), maze.cell_index(dst)) {
            graph_data.push_str(&(index_a + 1).to_string());
            graph_data.push(' ');
            graph_data.push_str(&(index_b + 1).to_string());
            graph_data.push('\n');
        }
    }

    graph_data
}
