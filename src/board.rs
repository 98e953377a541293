use crate::error::BoardError;
use crate::{cell, REFERENCE_COLS, REFERENCE_FINISH, REFERENCE_ROWS, REFERENCE_START};
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::str::FromStr;

const OPEN: char = '.';
const WALL: char = '#';
const START: char = 'S';
const FINISH: char = 'F';

/// [Board] is the search topology: a fixed `rows x cols` rectangle with one start cell, one
/// finish cell and any number of walls stored in a [BoolGrid] (occupied is [true]). Connected
/// components of the open cells are maintained in a [UnionFind] structure, which is flagged as
/// dirty whenever placing a wall may have split a component.
///
/// Coordinates are [Point]s with the column in `x` and the row in `y`, see [cell].
#[derive(Clone, Debug)]
pub struct Board {
    walls: BoolGrid,
    rows: usize,
    cols: usize,
    start: Point,
    finish: Point,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Board {
    /// Creates a board without walls. Fails if the board is empty, if `start` or `finish` lies
    /// outside of it, or if they are the same cell.
    pub fn new(rows: usize, cols: usize, start: Point, finish: Point) -> Result<Board, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard { rows, cols });
        }
        for point in [start, finish] {
            if !Self::contains(rows, cols, point) {
                return Err(BoardError::OutOfBounds { point, rows, cols });
            }
        }
        if start == finish {
            return Err(BoardError::StartIsFinish(start));
        }
        Ok(Self::blank(rows, cols, start, finish))
    }

    /// The 20x50 board with start at row 10, column 15 and finish at row 10, column 35.
    pub fn reference() -> Board {
        Self::blank(
            REFERENCE_ROWS,
            REFERENCE_COLS,
            cell(REFERENCE_START.0, REFERENCE_START.1),
            cell(REFERENCE_FINISH.0, REFERENCE_FINISH.1),
        )
    }

    fn blank(rows: usize, cols: usize, start: Point, finish: Point) -> Board {
        let mut board = Board {
            walls: BoolGrid::new(cols, rows, false),
            rows,
            cols,
            start,
            finish,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        board.generate_components();
        board
    }

    fn contains(rows: usize, cols: usize, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && (point.x as usize) < cols && (point.y as usize) < rows
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn finish(&self) -> Point {
        self.finish
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        Self::contains(self.rows, self.cols, point)
    }

    /// Row-major index of an in-bounds point.
    pub fn index(&self, point: Point) -> usize {
        debug_assert!(self.in_bounds(point));
        point.y as usize * self.cols + point.x as usize
    }
    /// Inverse of [index](Self::index).
    pub fn point(&self, index: usize) -> Point {
        cell(index / self.cols, index % self.cols)
    }

    /// Whether `point` is a wall. Out-of-bounds points are not walls.
    pub fn is_wall(&self, point: Point) -> bool {
        self.in_bounds(point) && self.walls.get(point.x, point.y)
    }
    pub fn is_start(&self, point: Point) -> bool {
        point == self.start
    }
    pub fn is_finish(&self, point: Point) -> bool {
        point == self.finish
    }

    /// Iterates over all walls in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Point> + '_ {
        iproduct!(0..self.rows, 0..self.cols)
            .map(|(row, col)| cell(row, col))
            .filter(|p| self.is_wall(*p))
    }

    /// The up-to-four in-bounds neighbours of `point`, always in the order up, down, left,
    /// right. Walls are included; the search decides what to do with them.
    pub fn neighbours_of(&self, point: Point) -> SmallVec<[Point; 4]> {
        [
            Point::new(point.x, point.y - 1),
            Point::new(point.x, point.y + 1),
            Point::new(point.x - 1, point.y),
            Point::new(point.x + 1, point.y),
        ]
        .into_iter()
        .filter(|p| self.in_bounds(*p))
        .collect()
    }

    fn check_editable(&self, point: Point) -> Result<(), BoardError> {
        if !self.in_bounds(point) {
            return Err(BoardError::OutOfBounds {
                point,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.is_start(point) || self.is_finish(point) {
            return Err(BoardError::ProtectedCell(point));
        }
        Ok(())
    }

    /// Flips the wall state of `point` and returns the new state. Applying it twice restores
    /// the board. The start and finish cells are rejected.
    pub fn toggle_wall(&mut self, point: Point) -> Result<bool, BoardError> {
        self.check_editable(point)?;
        let blocked = !self.walls.get(point.x, point.y);
        self.write_wall(point, blocked);
        Ok(blocked)
    }

    /// Sets the wall state of `point`. The start and finish cells are rejected.
    pub fn set_wall(&mut self, point: Point, blocked: bool) -> Result<(), BoardError> {
        self.check_editable(point)?;
        self.write_wall(point, blocked);
        Ok(())
    }

    /// Removes every wall, returning the board to its freshly constructed state.
    pub fn clear_walls(&mut self) {
        self.walls = BoolGrid::new(self.cols, self.rows, false);
        self.generate_components();
    }

    /// Joins newly connected components when a cell opens and flags the components as dirty if
    /// they are (potentially) broken apart by a new wall.
    fn write_wall(&mut self, point: Point, blocked: bool) {
        let was_blocked = self.walls.get(point.x, point.y);
        self.walls.set(point.x, point.y, blocked);
        if blocked {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            let ix = self.index(point);
            for n in self.neighbours_of(point) {
                if !self.is_wall(n) {
                    let n_ix = self.index(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Whether placing walls since the last [generate_components](Self::generate_components)
    /// may have split components.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cell_count());
        self.components_dirty = false;
        for (row, col) in iproduct!(0..self.rows, 0..self.cols) {
            let point = cell(row, col);
            if self.is_wall(point) {
                continue;
            }
            let ix = self.index(point);
            for n in [cell(row + 1, col), cell(row, col + 1)] {
                if self.in_bounds(n) && !self.is_wall(n) {
                    let n_ix = self.index(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Checks if `a` and `b` are open cells on the same component. The answer is only exact
    /// when the components are not dirty, see [update](Self::update).
    pub fn reachable(&self, a: &Point, b: &Point) -> bool {
        if !self.in_bounds(*a) || !self.in_bounds(*b) || self.is_wall(*a) || self.is_wall(*b) {
            return false;
        }
        let reachable = self.components.equiv(self.index(*a), self.index(*b));
        if !reachable {
            info!("{} is not reachable from {}", b, a);
        }
        reachable
    }

    /// Checks if `a` and `b` are not on the same component.
    pub fn unreachable(&self, a: &Point, b: &Point) -> bool {
        !self.reachable(a, b)
    }

    fn symbol(&self, point: Point) -> char {
        if self.is_start(point) {
            START
        } else if self.is_finish(point) {
            FINISH
        } else if self.is_wall(point) {
            WALL
        } else {
            OPEN
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.start == other.start
            && self.finish == other.finish
            && self.walls().eq(other.walls())
    }
}

impl Eq for Board {}

/// Renders the board one row per line using `.` for open cells, `#` for walls, `S` for the
/// start and `F` for the finish.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line = (0..self.cols).map(|col| self.symbol(cell(row, col))).join("");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the format written by [Display](fmt::Display). Blank lines and surrounding
/// whitespace are ignored.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s
            .lines()
            .enumerate()
            .map(|(n, line)| (n + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect::<Vec<_>>();
        let parse_error = |line: usize, reason: String| BoardError::Parse { line, reason };

        let rows = lines.len();
        let cols = lines.first().map_or(0, |(_, line)| line.chars().count());
        let mut start = None;
        let mut finish = None;
        let mut walls = Vec::new();
        for (row, (line_no, line)) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(parse_error(
                    *line_no,
                    format!("expected {} cells, found {}", cols, width),
                ));
            }
            for (col, c) in line.chars().enumerate() {
                let point = cell(row, col);
                match c {
                    OPEN => {}
                    WALL => walls.push(point),
                    START | FINISH => {
                        let slot = if c == START { &mut start } else { &mut finish };
                        if slot.replace(point).is_some() {
                            return Err(parse_error(*line_no, format!("second '{}' cell", c)));
                        }
                    }
                    other => {
                        return Err(parse_error(
                            *line_no,
                            format!("unexpected character '{}'", other),
                        ))
                    }
                }
            }
        }
        let last_line = lines.last().map_or(0, |(n, _)| *n);
        let start = start.ok_or_else(|| parse_error(last_line, "no start cell".to_owned()))?;
        let finish = finish.ok_or_else(|| parse_error(last_line, "no finish cell".to_owned()))?;

        let mut board = Board::new(rows, cols, start, finish)?;
        for wall in walls {
            board.walls.set(wall.x, wall.y, true);
        }
        board.generate_components();
        Ok(board)
    }
}
