use std::io::{stdout, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue, style};
use log::error;

use crate::error::{Error, Result};
use crate::render::Frame;
use crate::BoardInt;

/// Where the game loop draws.
pub trait Surface {
    fn render(&mut self, frame: &Frame) -> Result<()>;

    /// Shown once, below the last frame, when the snake crashes.
    fn game_over(&mut self, score: usize) -> Result<()>;
}

/// Puts the terminal back the way it was. Safe to call from any thread and
/// any number of times; only the first call does anything.
pub struct RawModeGuard {
    active: AtomicBool,
}

impl RawModeGuard {
    fn new() -> Self {
        RawModeGuard { active: AtomicBool::new(true) }
    }

    pub fn restore(&self) -> Result<()> {
        if !self.active.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        let mut out = stdout();
        execute!(out, cursor::Show, cursor::EnableBlinking)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

pub struct Terminal {
    stdout: Stdout,
    guard: Arc<RawModeGuard>,
    board_height: BoardInt,
}

impl Terminal {
    /// Switches to raw mode and clears the screen for a board of the given size.
    pub fn enter(board_width: BoardInt, board_height: BoardInt) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        // Two extra rows for the game over message
        let (min_cols, min_rows) = (board_width as u16, board_height as u16 + 2);
        if cols < min_cols || rows < min_rows {
            return Err(Error::TerminalTooSmall { cols, rows, min_cols, min_rows });
        }

        terminal::enable_raw_mode()?;
        let mut term = Terminal {
            stdout: stdout(),
            guard: Arc::new(RawModeGuard::new()),
            board_height,
        };
        execute!(term.stdout, terminal::Clear(ClearType::All), cursor::Hide, cursor::DisableBlinking)?;
        Ok(term)
    }

    /// The restore action, shared with whoever else may need to run it.
    pub fn guard(&self) -> Arc<RawModeGuard> {
        Arc::clone(&self.guard)
    }

    pub fn restore(&self) -> Result<()> {
        self.guard.restore()
    }
}

impl Surface for Terminal {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(0, 0), style::Print(frame))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn game_over(&mut self, score: usize) -> Result<()> {
        let row = self.board_height as u16;
        queue!(
            self.stdout,
            cursor::MoveTo(0, row),
            style::Print("Game Over!\r\n"),
            style::Print(format!("Score: {}\r\n", score))
        )?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = self.guard.restore() {
            error!("Failed to restore the terminal: {}", e);
        }
    }
}
