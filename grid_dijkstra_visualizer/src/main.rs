mod cli;
mod logging;
mod playback;
mod render;
mod terminal;

use anyhow::Result;
use clap::Parser;
use grid_dijkstra::{Board, SearchState};
use log::info;
use std::io::{self, Write};

use cli::{load_board, Cli, Commands, FrontierKind};
use render::Canvas;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet, cli.is_interactive());

    match &cli.command {
        Some(Commands::Solve { board, trace }) => {
            let board = match board {
                Some(path) => load_board(path)?,
                None => cli.layout.board()?,
            };
            solve(&board, cli.frontier, *trace)
        }
        Some(Commands::Interactive) | None => {
            let board = cli.layout.board()?;
            terminal::run(board, cli.playback_config(), cli.frontier)
        }
    }
}

fn solve(board: &Board, frontier: FrontierKind, show_trace: bool) -> Result<()> {
    info!(
        "Solving {}x{} board with {} walls",
        board.rows(),
        board.cols(),
        board.walls().count()
    );
    let outcome = frontier.search(board, SearchState::new(board));
    let canvas = Canvas::from_outcome(board, &outcome);

    let mut out = io::stdout().lock();
    writeln!(out, "status: {:?}", outcome.status())?;
    writeln!(out, "visited: {} cells", outcome.trace.len())?;
    if outcome.found() {
        writeln!(out, "path: {} cells", outcome.path().len())?;
    } else {
        writeln!(out, "path: none")?;
    }
    write!(out, "{}", canvas.render_text(board))?;
    if show_trace {
        writeln!(out, "trace:")?;
        for p in &outcome.trace {
            writeln!(out, "{},{}", p.y, p.x)?;
        }
    }
    Ok(())
}
