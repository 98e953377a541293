//! # grid_dijkstra
//!
//! Deterministic single-source shortest paths on a 4-connected grid. A [Board]
//! holds the topology (dimensions, start, finish and walls) while every search run
//! owns its own [SearchState] table with tentative distances, visited flags and
//! backpointers. A run produces the *visitation trace*, the exact order in which
//! cells were expanded, which a front-end can replay before drawing the
//! [reconstructed path](reconstruct_path).
//!
//! All moves cost one, so the search is
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) specialised
//! to unit weights. Ties between cells at equal distance are broken exactly as a stable
//! re-sort of the remaining cells (in row-major order) would break them, which makes the
//! trace reproducible. Connected components are tracked with a [UnionFind] structure so
//! reachability can be answered without searching.
//!
//! ```
//! use grid_dijkstra::{cell, Board, search};
//!
//! let mut board = Board::new(3, 3, cell(0, 0), cell(2, 2)).unwrap();
//! board.toggle_wall(cell(1, 1)).unwrap();
//! let outcome = search(&board);
//! assert!(outcome.found());
//! assert_eq!(outcome.path().len(), 5);
//! ```
//!
//! [UnionFind]: petgraph::unionfind::UnionFind
pub mod board;
pub mod error;
pub mod search;

pub use board::Board;
pub use error::BoardError;
pub use grid_util::point::Point;
pub use search::frontier::{Frontier, HeapFrontier, SortedFrontier};
pub use search::{
    reconstruct_path, search, search_with, Distance, NodeState, SearchOutcome, SearchState,
    SearchStatus, UNREACHED,
};

/// Number of rows of the reference board.
pub const REFERENCE_ROWS: usize = 20;
/// Number of columns of the reference board.
pub const REFERENCE_COLS: usize = 50;
/// `(row, col)` of the start cell on the reference board.
pub const REFERENCE_START: (usize, usize) = (10, 15);
/// `(row, col)` of the finish cell on the reference board.
pub const REFERENCE_FINISH: (usize, usize) = (10, 35);

/// Builds the [Point] addressing `(row, col)`. Points store the column in `x` and the row in `y`.
pub fn cell(row: usize, col: usize) -> Point {
    Point::new(col as i32, row as i32)
}
