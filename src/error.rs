use grid_util::point::Point;

/// Errors raised while building or editing a [Board](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("a board needs at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },

    #[error("cell {point} lies outside the {rows}x{cols} board")]
    OutOfBounds {
        point: Point,
        rows: usize,
        cols: usize,
    },

    #[error("start and finish must be distinct, both are {0}")]
    StartIsFinish(Point),

    #[error("cell {0} is the start or the finish and cannot become a wall")]
    ProtectedCell(Point),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
