//! Terminal setup and teardown.
//!
//! Handles entering/exiting raw mode, the alternate screen and mouse
//! capture. Restoring is idempotent and also runs on drop, so an early
//! `?` return still leaves the user's terminal usable.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::ResetColor;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

/// Terminal setup/teardown handle.
pub struct Terminal {
    out: Stdout,
    is_fullscreen: bool,
    is_raw: bool,
    mouse_enabled: bool,
}

impl Terminal {
    /// Enter fullscreen mode: raw input, alternate screen, hidden cursor.
    pub fn enter(mouse: bool) -> io::Result<Self> {
        let mut term = Self {
            out: io::stdout(),
            is_fullscreen: false,
            is_raw: false,
            mouse_enabled: false,
        };

        terminal::enable_raw_mode()?;
        term.is_raw = true;

        queue!(term.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        term.is_fullscreen = true;

        if mouse {
            queue!(term.out, EnableMouseCapture)?;
            term.mouse_enabled = true;
        }
        term.out.flush()?;

        tracing::debug!(mouse, "terminal entered fullscreen");
        Ok(term)
    }

    /// Current size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Where frames are written.
    pub fn writer(&mut self) -> &mut Stdout {
        &mut self.out
    }

    /// Undo everything `enter` did.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.mouse_enabled {
            queue!(self.out, DisableMouseCapture)?;
            self.mouse_enabled = false;
        }
        if self.is_fullscreen {
            queue!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
            self.is_fullscreen = false;
        }
        self.out.flush()?;

        if self.is_raw {
            terminal::disable_raw_mode()?;
            self.is_raw = false;
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            // Best effort; stdout may already be gone.
            let _ = execute!(io::stderr(), ResetColor);
            eprintln!("failed to restore terminal: {err}");
        }
    }
}
