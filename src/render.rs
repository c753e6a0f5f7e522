//! Presentation layer: colours derived from [CellState], a crossterm terminal renderer and a
//! plain text renderer. Nothing in here feeds back into the search except through the
//! [CancelToken].

use crate::app::Input;
use crate::cell::CellState;
use crate::error::Result;
use crate::grid::Grid;
use crate::search::CancelToken;
use crate::visualizer::Visualizer;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{self, Color},
    terminal::{self, ClearType},
};
use log::{debug, warn};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const LIGHT_BLUE: Rgb = Rgb(173, 216, 230);
pub const LIGHT_PURPLE: Rgb = Rgb(203, 160, 227);
pub const LIGHT_RED: Rgb = Rgb(255, 127, 127);
pub const LIGHT_GREEN: Rgb = Rgb(144, 238, 144);
pub const LIGHT_PINK: Rgb = Rgb(255, 182, 193);

/// Colour a cell is drawn with.
pub fn color(state: CellState) -> Rgb {
    match state {
        CellState::Empty => WHITE,
        CellState::Wall => BLACK,
        CellState::Start => LIGHT_BLUE,
        CellState::End => LIGHT_PURPLE,
        CellState::Frontier => LIGHT_GREEN,
        CellState::Visited => LIGHT_RED,
        CellState::Path => LIGHT_PINK,
    }
}

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Color {
        Color::Rgb { r, g, b }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Rendering context for a terminal. Owns the terminal between [init](Self::init) and
/// [close](Self::close): raw mode, the alternate screen and mouse capture.
///
/// Each cell is drawn `gap` columns wide and one row tall; a terminal row is roughly twice as
/// tall as a column is wide, so with the default width of two columns per cell cells come out
/// about square.
pub struct TerminalRenderer {
    out: io::Stdout,
    delay: Duration,
    cancel: CancelToken,
    status: String,
    active: bool,
}

impl TerminalRenderer {
    pub fn new(delay: Duration, cancel: CancelToken) -> TerminalRenderer {
        TerminalRenderer {
            out: io::stdout(),
            delay,
            cancel,
            status: String::new(),
            active: false,
        }
    }

    pub fn init(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        self.active = true;
        debug!("Terminal initialised");
        Ok(())
    }

    /// Hands the terminal back. Safe to call more than once.
    pub fn close(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.out,
            style::ResetColor,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        debug!("Terminal closed");
        Ok(())
    }

    /// Line shown under the grid.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn draw(&mut self, grid: &Grid) -> Result<()> {
        let gap = grid.geometry().gap;
        let blank = " ".repeat(gap);
        for row in 0..grid.side() {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            for col in 0..grid.side() {
                let state = grid.get(crate::pos(row, col)).unwrap_or_default();
                queue!(
                    self.out,
                    style::SetBackgroundColor(color(state).into()),
                    style::Print(&blank)
                )?;
            }
        }
        queue!(
            self.out,
            style::ResetColor,
            cursor::MoveTo(0, grid.side() as u16 + 1),
            terminal::Clear(ClearType::UntilNewLine),
            style::Print(&self.status)
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Drains pending terminal events and reports whether one of them asked to quit.
    fn quit_requested(&mut self) -> Result<bool> {
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                quit |= key.kind == KeyEventKind::Press && is_quit(&key);
            }
        }
        Ok(quit)
    }

    /// Waits up to `timeout` for the next editing input. Pointer positions are translated to
    /// cells with the grid's [Geometry](crate::grid::Geometry).
    pub fn next_input(&mut self, grid: &Grid, timeout: Duration) -> Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let geometry = grid.geometry();
        let input = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    Some(Input::Quit)
                } else {
                    match key.code {
                        KeyCode::Enter => Some(Input::Run),
                        KeyCode::Char(' ') => Some(Input::Reset),
                        KeyCode::Char('c') => Some(Input::ClearSearch),
                        _ => None,
                    }
                }
            }
            Event::Mouse(me) => {
                let cell = geometry.cell_at(me.column as usize, me.row as usize * geometry.gap);
                match (me.kind, cell) {
                    (MouseEventKind::Down(MouseButton::Left), Some(p))
                    | (MouseEventKind::Drag(MouseButton::Left), Some(p)) => Some(Input::Paint(p)),
                    (MouseEventKind::Down(MouseButton::Right), Some(p))
                    | (MouseEventKind::Drag(MouseButton::Right), Some(p)) => Some(Input::Erase(p)),
                    _ => None,
                }
            }
            _ => None,
        };
        Ok(input)
    }
}

impl Visualizer for TerminalRenderer {
    fn redraw(&mut self, grid: &Grid) {
        if let Err(e) = self.draw(grid) {
            warn!("Failed to draw grid: {e}");
        }
        thread::sleep(self.delay);
        match self.quit_requested() {
            Ok(true) => self.cancel.cancel(),
            Ok(false) => {}
            Err(e) => warn!("Failed to poll terminal events: {e}"),
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to restore terminal: {e}");
        }
    }
}

/// Writes every redraw as a text frame. Write errors are kept and reported by
/// [finish](Self::finish), since a [Visualizer] cannot fail.
pub struct TextRenderer<W: Write> {
    out: W,
    frames: usize,
    error: Option<io::Error>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> TextRenderer<W> {
        TextRenderer {
            out,
            frames: 0,
            error: None,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> Visualizer for TextRenderer<W> {
    fn redraw(&mut self, grid: &Grid) {
        if self.error.is_some() {
            return;
        }
        self.frames += 1;
        if let Err(e) = writeln!(self.out, "frame {}\n{}", self.frames, grid) {
            self.error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::astar;

    #[test]
    fn colors_follow_state() {
        assert_eq!(color(CellState::Wall), BLACK);
        assert_eq!(color(CellState::Frontier), LIGHT_GREEN);
        assert_eq!(Color::from(LIGHT_RED), Color::Rgb { r: 255, g: 127, b: 127 });
    }

    #[test]
    fn text_renderer_writes_a_frame_per_redraw() {
        let mut grid: Grid = "S.\n.E\n".parse().unwrap();
        grid.compute_neighbours();
        let mut renderer = TextRenderer::new(Vec::new());
        let outcome = astar(&mut grid, &mut renderer, &CancelToken::new()).unwrap();
        assert_eq!(outcome.path_len(), Some(2));
        let frames = renderer.frames();
        let text = String::from_utf8(renderer.finish().unwrap()).unwrap();
        assert_eq!(text.matches("frame ").count(), frames);
        assert!(text.ends_with("Sx\n*E\n\n"));
    }
}
