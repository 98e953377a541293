//! Full-screen interactive board. Dragging with the left mouse button paints walls, `v` runs
//! and animates a search, `r` resets the board, `c` clears the search overlays and `q` quits.
use anyhow::{bail, Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use grid_dijkstra::{cell, Board, Point, SearchOutcome, SearchState};
use log::debug;
use std::io::{self, Write};
use std::time::Instant;

use crate::cli::FrontierKind;
use crate::playback::{schedule_outcome, PlaybackConfig};
use crate::render::{Canvas, Overlay, Tile};

const HEADER_ROWS: u16 = 3;
const CELL_WIDTH: u16 = 2;
const HELP: &str = "drag: walls  v: visualize  c: clear  r: reset  q: quit";

fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Open => Color::Rgb { r: 235, g: 235, b: 235 },
        Tile::Wall => Color::Rgb { r: 12, g: 53, b: 71 },
        Tile::Start => Color::Rgb { r: 0, g: 170, b: 0 },
        Tile::Finish => Color::Rgb { r: 210, g: 0, b: 0 },
        Tile::Visited => Color::Rgb { r: 0, g: 190, b: 218 },
        Tile::Path => Color::Rgb { r: 255, g: 254, b: 106 },
    }
}

fn describe(outcome: &SearchOutcome) -> String {
    if outcome.found() {
        format!(
            "Path of {} cells found after visiting {} cells",
            outcome.path().len(),
            outcome.trace.len()
        )
    } else {
        format!(
            "No path: the finish is unreachable, {} cells visited",
            outcome.trace.len()
        )
    }
}

/// Blocks until `deadline`, returning early with [true] if a key is pressed. Other events are
/// swallowed.
fn wait_until(deadline: Instant) -> Result<bool> {
    loop {
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        if event::poll(deadline - now)? {
            if let Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                return Ok(true);
            }
        }
    }
}

pub struct App {
    board: Board,
    canvas: Canvas,
    config: PlaybackConfig,
    frontier: FrontierKind,
    painting: bool,
    last_painted: Option<Point>,
    state: Option<SearchState>,
    status: String,
}

impl App {
    pub fn new(board: Board, config: PlaybackConfig, frontier: FrontierKind) -> App {
        App {
            canvas: Canvas::new(&board),
            board,
            config,
            frontier,
            painting: false,
            last_painted: None,
            state: None,
            status: String::new(),
        }
    }

    /// Maps a terminal position to the board cell drawn there.
    fn cell_at(&self, column: u16, row: u16) -> Option<Point> {
        let row = row.checked_sub(HEADER_ROWS)?;
        let p = cell(row as usize, (column / CELL_WIDTH) as usize);
        self.board.in_bounds(p).then_some(p)
    }

    fn paint(&mut self, p: Point) {
        if self.last_painted == Some(p) {
            return;
        }
        self.last_painted = Some(p);
        match self.board.toggle_wall(p) {
            Ok(blocked) => {
                debug!("Toggled {} to wall={}", p, blocked);
                self.canvas.set(&self.board, p, Overlay::None);
            }
            Err(err) => debug!("Ignoring paint: {}", err),
        }
    }

    fn handle_mouse(&mut self, me: MouseEvent) {
        match me.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(p) = self.cell_at(me.column, me.row) {
                    self.painting = true;
                    self.last_painted = None;
                    self.paint(p);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.painting => {
                if let Some(p) = self.cell_at(me.column, me.row) {
                    self.paint(p);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.painting = false;
                self.last_painted = None;
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.board.clear_walls();
        self.canvas.clear();
        self.status = "Board reset".to_owned();
    }

    /// Searches the current board and plays the trace, then the path. Any key skips to the end.
    fn visualize<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.painting = false;
        self.canvas.clear();
        self.status = "Searching...".to_owned();
        self.draw(out)?;

        let state = self
            .state
            .take()
            .unwrap_or_else(|| SearchState::new(&self.board));
        let outcome = self.frontier.search(&self.board, state);
        let frames = schedule_outcome(&outcome, &self.config);
        debug!("Playing {} frames", frames.len());

        let started = Instant::now();
        let mut skipped = false;
        for frame in &frames {
            if !skipped && wait_until(started + frame.at)? {
                debug!("Playback skipped");
                skipped = true;
            }
            self.canvas.set(&self.board, frame.point, frame.overlay);
            if !skipped {
                self.draw_cell(out, frame.point)?;
                out.flush()?;
            }
        }
        self.status = describe(&outcome);
        self.state = Some(outcome.into_state());
        self.draw(out)
    }

    fn draw_cell<W: Write>(&self, out: &mut W, p: Point) -> Result<()> {
        let tile = self.canvas.tile(&self.board, p);
        queue!(
            out,
            cursor::MoveTo(p.x as u16 * CELL_WIDTH, HEADER_ROWS + p.y as u16),
            SetBackgroundColor(tile_color(tile)),
            Print(" ".repeat(CELL_WIDTH as usize)),
            ResetColor
        )?;
        Ok(())
    }

    fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        queue!(
            out,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Green),
            Print("Dijkstra's algorithm"),
            ResetColor,
            cursor::MoveTo(0, 1),
            Print(HELP),
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::Yellow),
            Print(&self.status),
            ResetColor
        )?;
        for ix in 0..self.board.cell_count() {
            self.draw_cell(out, self.board.point(ix))?;
        }
        out.flush()?;
        Ok(())
    }

    fn event_loop<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.draw(out)?;
        loop {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind: KeyEventKind::Press,
                    ..
                }) => match code {
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('v') | KeyCode::Enter => self.visualize(out)?,
                    KeyCode::Char('r') => self.reset(),
                    KeyCode::Char('c') => {
                        self.canvas.clear();
                        self.status.clear();
                    }
                    _ => continue,
                },
                Event::Mouse(me) => self.handle_mouse(me),
                Event::Resize(..) => {}
                _ => continue,
            }
            self.draw(out)?;
        }
        Ok(())
    }
}

fn restore<W: Write>(out: &mut W) -> Result<()> {
    execute!(
        out,
        DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Runs the interactive board until the user quits. The terminal is restored on every exit
/// path.
pub fn run(board: Board, config: PlaybackConfig, frontier: FrontierKind) -> Result<()> {
    let (width, height) = terminal::size().context("failed to query the terminal size")?;
    let needed_width = board.cols() * CELL_WIDTH as usize;
    let needed_height = board.rows() + HEADER_ROWS as usize;
    if needed_width > width as usize || needed_height > height as usize {
        bail!(
            "a {}x{} board needs a terminal of at least {}x{} characters, this one is {}x{}",
            board.rows(),
            board.cols(),
            needed_width,
            needed_height,
            width,
            height
        );
    }

    let mut out = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let result = execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        EnableMouseCapture
    )
    .context("failed to prepare the terminal")
    .and_then(|_| App::new(board, config, frontier).event_loop(&mut out));
    let restored = restore(&mut out);
    result.and(restored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> App {
        let board = Board::new(3, 4, cell(0, 0), cell(2, 3)).unwrap();
        App::new(board, PlaybackConfig::default(), FrontierKind::Heap)
    }

    #[test]
    fn maps_screen_to_cells() {
        let app = app();
        assert_eq!(app.cell_at(0, 0), None);
        assert_eq!(app.cell_at(0, HEADER_ROWS), Some(cell(0, 0)));
        assert_eq!(app.cell_at(3, HEADER_ROWS + 2), Some(cell(2, 1)));
        assert_eq!(app.cell_at(8, HEADER_ROWS), None);
        assert_eq!(app.cell_at(0, HEADER_ROWS + 3), None);
    }

    /// Pressing toggles the cell under the cursor, dragging toggles each newly entered cell
    /// once and releasing stops painting.
    #[test]
    fn drag_paints_walls() {
        let mut app = app();
        let row = HEADER_ROWS + 1;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, row));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 1, row));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 2, row));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 4, row));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 4, row));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 6, row));
        assert_eq!(
            app.board.walls().collect::<Vec<_>>(),
            vec![cell(1, 0), cell(1, 1), cell(1, 2)]
        );
    }

    #[test]
    fn painting_skips_protected_cells() {
        let mut app = app();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, HEADER_ROWS));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 2, HEADER_ROWS));
        assert!(!app.board.is_wall(cell(0, 0)));
        assert!(app.board.is_wall(cell(0, 1)));
        app.reset();
        assert_eq!(app.board.walls().count(), 0);
    }
}
