use crate::board::Board;
use grid_util::point::Point;
use log::{debug, info, trace};

pub mod frontier;

use frontier::{Frontier, HeapFrontier};

/// Number of unit steps from the start cell.
pub type Distance = u32;

/// Distance of a cell that has not been reached (yet).
pub const UNREACHED: Distance = Distance::MAX;

/// Lifecycle of a single search run. [Found](SearchStatus::Found) and
/// [Exhausted](SearchStatus::Exhausted) are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// State table allocated or reset, nothing expanded.
    Init,
    /// Cells are being selected and expanded.
    Running,
    /// The finish cell was expanded.
    Found,
    /// Every cell still reachable was expanded without meeting the finish.
    Exhausted,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchStatus::Found | SearchStatus::Exhausted)
    }
}

/// Search fields of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeState {
    pub distance: Distance,
    pub visited: bool,
    /// The cell this one was first reached from.
    pub previous: Option<Point>,
}

impl Default for NodeState {
    fn default() -> NodeState {
        NodeState {
            distance: UNREACHED,
            visited: false,
            previous: None,
        }
    }
}

/// Per-run state table, indexed like [Board::index]. The board itself is never mutated by a
/// search, so any number of runs can share one board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    rows: usize,
    cols: usize,
    nodes: Vec<NodeState>,
    status: SearchStatus,
}

impl SearchState {
    pub fn new(board: &Board) -> SearchState {
        SearchState {
            rows: board.rows(),
            cols: board.cols(),
            nodes: vec![NodeState::default(); board.cell_count()],
            status: SearchStatus::Init,
        }
    }

    /// Restores every cell to an unreached, unvisited state without a backpointer.
    pub fn reset(&mut self) {
        self.nodes.fill(NodeState::default());
        self.status = SearchStatus::Init;
    }

    /// Resets the table, reallocating it if it was built for a board of another shape.
    fn prepare(&mut self, board: &Board) {
        if (self.rows, self.cols) == (board.rows(), board.cols()) {
            self.reset();
        } else {
            *self = SearchState::new(board);
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Search fields of `point`, or [None] if it lies outside the board.
    pub fn node(&self, point: Point) -> Option<&NodeState> {
        if point.x < 0 || point.y < 0 || point.x as usize >= self.cols {
            return None;
        }
        self.nodes.get(point.y as usize * self.cols + point.x as usize)
    }
    pub fn distance(&self, point: Point) -> Distance {
        self.node(point).map_or(UNREACHED, |n| n.distance)
    }
    pub fn is_visited(&self, point: Point) -> bool {
        self.node(point).is_some_and(|n| n.visited)
    }
    pub fn previous(&self, point: Point) -> Option<Point> {
        self.node(point).and_then(|n| n.previous)
    }

    pub fn distance_at(&self, index: usize) -> Distance {
        self.nodes[index].distance
    }
    pub fn is_visited_at(&self, index: usize) -> bool {
        self.nodes[index].visited
    }
}

/// Result of a run: the visitation trace together with the state table it left behind.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Expanded cells in expansion order. Starts with the start cell, never contains a wall
    /// and ends with the finish cell exactly when the finish was found.
    pub trace: Vec<Point>,
    finish: Point,
    state: SearchState,
}

impl SearchOutcome {
    pub fn status(&self) -> SearchStatus {
        self.state.status
    }
    pub fn found(&self) -> bool {
        self.state.status == SearchStatus::Found
    }
    pub fn state(&self) -> &SearchState {
        &self.state
    }
    /// Gives the table back so it can be reused by [search_with].
    pub fn into_state(self) -> SearchState {
        self.state
    }
    /// The path from start to finish, see [reconstruct_path]. Only a real route if
    /// [found](Self::found) holds.
    pub fn path(&self) -> Vec<Point> {
        reconstruct_path(&self.state, self.finish)
    }
}

/// Runs a search from the board's start to its finish using a [HeapFrontier].
pub fn search(board: &Board) -> SearchOutcome {
    search_with::<HeapFrontier>(board, SearchState::new(board))
}

/// Runs a search with an explicit [Frontier] strategy, reusing `state` (which is reset first).
///
/// The cell with the smallest distance is selected repeatedly. Walls are discarded when
/// selected, a cell at [UNREACHED] distance ends the run as
/// [Exhausted](SearchStatus::Exhausted) and expanding the finish ends it as
/// [Found](SearchStatus::Found). Otherwise every unvisited neighbour, walls included, whose
/// distance improves gets the new distance and a backpointer to the expanded cell.
pub fn search_with<F: Frontier>(board: &Board, mut state: SearchState) -> SearchOutcome {
    state.prepare(board);
    let mut frontier = F::for_board(board);
    let start = board.index(board.start());
    let finish = board.index(board.finish());

    state.nodes[start].distance = 0;
    frontier.relaxed(start, 0, 0);
    state.status = SearchStatus::Running;
    debug!("Searching from {} to {}", board.start(), board.finish());

    let mut trace = Vec::new();
    let mut step = 0;
    loop {
        let Some(index) = frontier.pop(&state) else {
            state.status = SearchStatus::Exhausted;
            break;
        };
        let point = board.point(index);
        if board.is_wall(point) {
            trace!("Discarding wall {}", point);
            continue;
        }
        let distance = state.nodes[index].distance;
        if distance == UNREACHED {
            state.status = SearchStatus::Exhausted;
            break;
        }
        state.nodes[index].visited = true;
        trace.push(point);
        if index == finish {
            state.status = SearchStatus::Found;
            break;
        }

        step += 1;
        for neighbour in board.neighbours_of(point) {
            let n_ix = board.index(neighbour);
            let node = &mut state.nodes[n_ix];
            if node.visited {
                continue;
            }
            let new_distance = distance + 1;
            if node.distance > new_distance {
                node.distance = new_distance;
                node.previous = Some(point);
                frontier.relaxed(n_ix, new_distance, step);
            }
        }
    }

    info!(
        "Search {:?} after visiting {} of {} cells",
        state.status,
        trace.len(),
        board.cell_count()
    );
    SearchOutcome {
        trace,
        finish: board.finish(),
        state,
    }
}

/// Follows backpointers from `finish` and returns the cells in start-to-finish order. If
/// `finish` was never reached this is just `[finish]`, so callers should check the run
/// status before treating the result as a route.
pub fn reconstruct_path(state: &SearchState, finish: Point) -> Vec<Point> {
    let mut path = std::iter::successors(Some(finish), |p| state.previous(*p)).collect::<Vec<_>>();
    path.reverse();
    path
}
