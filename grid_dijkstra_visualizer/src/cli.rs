use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use grid_dijkstra::{
    cell, search_with, Board, HeapFrontier, Point, SearchOutcome, SearchState, SortedFrontier,
    REFERENCE_COLS, REFERENCE_FINISH, REFERENCE_ROWS, REFERENCE_START,
};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::playback::{PlaybackConfig, PATH_DELAY_MS, VISIT_DELAY_MS};

#[derive(Parser)]
#[command(name = "grid-dijkstra")]
#[command(author, version, about)]
#[command(long_about = "Paint walls between a start and a finish cell and watch Dijkstra's \
    algorithm search for the shortest path.\n\n\
    Examples:\n  \
    grid-dijkstra                          Open the interactive board\n  \
    grid-dijkstra --rows 10 --cols 30      Interactive board of another size\n  \
    grid-dijkstra solve --board maze.txt   Solve a text board and print the result")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Milliseconds between two visited cells during playback
    #[arg(long, default_value_t = VISIT_DELAY_MS, global = true)]
    pub visit_delay_ms: u64,

    /// Milliseconds between two path cells during playback
    #[arg(long, default_value_t = PATH_DELAY_MS, global = true)]
    pub path_delay_ms: u64,

    /// Strategy used to select the next cell
    #[arg(long, value_enum, default_value_t = FrontierKind::Heap, global = true)]
    pub frontier: FrontierKind,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress everything but errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Paint walls with the mouse and animate searches (default)
    Interactive,

    /// Search a board once and print the outcome
    Solve {
        /// Text board using '.', '#', 'S' and 'F'; overrides the layout options
        #[arg(short, long)]
        board: Option<PathBuf>,

        /// Also list every visited cell in visitation order
        #[arg(long)]
        trace: bool,
    },
}

/// Shape of a freshly created board.
#[derive(Args, Clone, Debug)]
pub struct LayoutArgs {
    /// Number of rows
    #[arg(long, default_value_t = REFERENCE_ROWS, global = true)]
    pub rows: usize,

    /// Number of columns
    #[arg(long, default_value_t = REFERENCE_COLS, global = true)]
    pub cols: usize,

    /// Start cell as ROW,COL
    #[arg(long, default_value_t = CellArg::from(REFERENCE_START), global = true)]
    pub start: CellArg,

    /// Finish cell as ROW,COL
    #[arg(long, default_value_t = CellArg::from(REFERENCE_FINISH), global = true)]
    pub finish: CellArg,
}

impl LayoutArgs {
    /// A board without walls with the configured shape.
    pub fn board(&self) -> Result<Board> {
        Board::new(
            self.rows,
            self.cols,
            self.start.point(),
            self.finish.point(),
        )
        .context("invalid board layout")
    }
}

/// Reads a board in the text format accepted by [Board]'s `FromStr`.
pub fn load_board(path: &Path) -> Result<Board> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    text.parse::<Board>()
        .with_context(|| format!("failed to parse board file {}", path.display()))
}

/// A `ROW,COL` command line value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellArg {
    pub row: usize,
    pub col: usize,
}

impl CellArg {
    pub fn point(self) -> Point {
        cell(self.row, self.col)
    }
}

impl From<(usize, usize)> for CellArg {
    fn from((row, col): (usize, usize)) -> Self {
        CellArg { row, col }
    }
}

impl fmt::Display for CellArg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for CellArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid coordinate '{}': {}", v, e))
        };
        Ok(CellArg {
            row: parse(row)?,
            col: parse(col)?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FrontierKind {
    /// Binary heap, O(V log V)
    Heap,
    /// Stable re-sort of all remaining cells on every selection
    Sorted,
}

impl FrontierKind {
    pub fn search(self, board: &Board, state: SearchState) -> SearchOutcome {
        match self {
            FrontierKind::Heap => search_with::<HeapFrontier>(board, state),
            FrontierKind::Sorted => search_with::<SortedFrontier>(board, state),
        }
    }
}

impl Cli {
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            visit_delay: Duration::from_millis(self.visit_delay_ms),
            path_delay: Duration::from_millis(self.path_delay_ms),
        }
    }

    pub fn is_interactive(&self) -> bool {
        !matches!(self.command, Some(Commands::Solve { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_reference_board() {
        let cli = Cli::parse_from(["grid-dijkstra"]);
        assert!(cli.command.is_none());
        assert!(cli.is_interactive());
        assert_eq!(cli.layout.board().unwrap(), Board::reference());
        assert_eq!(cli.frontier, FrontierKind::Heap);
        let config = cli.playback_config();
        assert_eq!(config.visit_delay, Duration::from_millis(10));
        assert_eq!(config.path_delay, Duration::from_millis(50));
    }

    #[test]
    fn solve_with_layout() {
        let cli = Cli::parse_from([
            "grid-dijkstra",
            "solve",
            "--rows",
            "3",
            "--cols",
            "4",
            "--start",
            "0,0",
            "--finish",
            "2, 3",
            "--frontier",
            "sorted",
            "--trace",
        ]);
        assert!(!cli.is_interactive());
        assert!(matches!(
            cli.command,
            Some(Commands::Solve {
                board: None,
                trace: true
            })
        ));
        let board = cli.layout.board().unwrap();
        assert_eq!(board.finish(), cell(2, 3));
        assert_eq!(cli.frontier, FrontierKind::Sorted);
    }

    #[test]
    fn rejects_bad_layout() {
        assert!(Cli::try_parse_from(["grid-dijkstra", "--start", "3"]).is_err());
        assert!(Cli::try_parse_from(["grid-dijkstra", "--start", "a,1"]).is_err());
        let cli = Cli::parse_from(["grid-dijkstra", "--start", "10,35"]);
        assert!(cli.layout.board().is_err());
    }

    #[test]
    fn parse_cell_values() {
        assert_eq!("10,15".parse::<CellArg>(), Ok(CellArg { row: 10, col: 15 }));
        assert_eq!(" 1 , 2 ".parse::<CellArg>(), Ok(CellArg { row: 1, col: 2 }));
        assert!("1;2".parse::<CellArg>().is_err());
        assert_eq!(CellArg::from(REFERENCE_START).to_string(), "10,15");
    }

    #[test]
    fn frontier_kinds_agree() {
        let board: Board = "S.#.\n..#.\n...F\n".parse().unwrap();
        let heap = FrontierKind::Heap.search(&board, SearchState::new(&board));
        let sorted = FrontierKind::Sorted.search(&board, SearchState::new(&board));
        assert_eq!(heap.trace, sorted.trace);
    }
}
