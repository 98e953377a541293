use grid_dijkstra::{Board, Point, SearchOutcome};

/// Search result drawn on top of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Visited,
    Path,
}

/// What a single cell looks like, board contents taking precedence over overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Open,
    Wall,
    Start,
    Finish,
    Visited,
    Path,
}

impl Tile {
    pub fn symbol(self) -> char {
        match self {
            Tile::Open => '.',
            Tile::Wall => '#',
            Tile::Start => 'S',
            Tile::Finish => 'F',
            Tile::Visited => 'o',
            Tile::Path => '*',
        }
    }
}

/// Overlays for every cell of a board, indexed like [Board::index].
#[derive(Clone, Debug)]
pub struct Canvas {
    overlays: Vec<Overlay>,
}

impl Canvas {
    pub fn new(board: &Board) -> Canvas {
        Canvas {
            overlays: vec![Overlay::None; board.cell_count()],
        }
    }

    /// Canvas with the whole trace visited and, if found, the whole path drawn.
    pub fn from_outcome(board: &Board, outcome: &SearchOutcome) -> Canvas {
        let mut canvas = Canvas::new(board);
        for &p in &outcome.trace {
            canvas.set(board, p, Overlay::Visited);
        }
        if outcome.found() {
            for p in outcome.path() {
                canvas.set(board, p, Overlay::Path);
            }
        }
        canvas
    }

    pub fn clear(&mut self) {
        self.overlays.fill(Overlay::None);
    }

    pub fn set(&mut self, board: &Board, point: Point, overlay: Overlay) {
        if board.in_bounds(point) {
            self.overlays[board.index(point)] = overlay;
        }
    }

    pub fn tile(&self, board: &Board, point: Point) -> Tile {
        if board.is_start(point) {
            Tile::Start
        } else if board.is_finish(point) {
            Tile::Finish
        } else if board.is_wall(point) {
            Tile::Wall
        } else {
            match self.overlays[board.index(point)] {
                Overlay::None => Tile::Open,
                Overlay::Visited => Tile::Visited,
                Overlay::Path => Tile::Path,
            }
        }
    }

    /// One line per row, one symbol per cell.
    pub fn render_text(&self, board: &Board) -> String {
        let mut out = String::with_capacity(board.rows() * (board.cols() + 1));
        for ix in 0..board.cell_count() {
            out.push(self.tile(board, board.point(ix)).symbol());
            if (ix + 1) % board.cols() == 0 {
                out.push('\n');
            }
        }
        out
    }
}
