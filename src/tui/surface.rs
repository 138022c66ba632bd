//! Terminal effects boundary: the `Surface` seam, key mapping, and the
//! crossterm implementation with its lifecycle.
//!
//! Everything above this module draws and reads through `Surface`, so the
//! screen loop runs unchanged against a scripted surface in tests.

use std::io::{self, BufRead, Write};

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use crate::types::Colors;

/// A cell on screen, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub column: u16,
    pub row: u16,
}

/// The key events a field cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    /// Ctrl+C.
    Interrupt,
}

/// Everything the engine needs from a terminal.
pub trait Surface {
    /// Columns available, queried once per render pass.
    fn width(&mut self) -> io::Result<u16>;

    /// Blank the whole display and home the cursor.
    fn clear(&mut self) -> io::Result<()>;

    fn set_colors(&mut self, colors: Colors) -> io::Result<()>;

    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Finish the current line.
    fn end_line(&mut self) -> io::Result<()>;

    fn cursor_position(&mut self) -> io::Result<CursorPos>;

    fn move_cursor(&mut self, pos: CursorPos) -> io::Result<()>;

    /// Block for one line of input, without its line terminator.
    fn read_line(&mut self) -> io::Result<String>;

    /// Block for one key. Only meaningful between `begin_key_input` and
    /// `end_key_input`.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Start intercepting single keys instead of echoed lines.
    fn begin_key_input(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn end_key_input(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a [`Key`].
///
/// Returns None for keys no field reacts to.
pub fn map_key(key: KeyEvent) -> Option<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Key::Interrupt);
    }

    match key.code {
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Char('\t')),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

// ============================================================================
// CROSSTERM SURFACE
// ============================================================================

/// The real terminal, drawn through crossterm on stdout.
pub struct CrosstermSurface {
    out: io::Stdout,
}

impl CrosstermSurface {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for CrosstermSurface {
    fn width(&mut self) -> io::Result<u16> {
        terminal::size().map(|(columns, _)| columns)
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    fn set_colors(&mut self, colors: Colors) -> io::Result<()> {
        queue!(
            self.out,
            SetBackgroundColor(colors.background.into()),
            SetForegroundColor(colors.foreground.into())
        )
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))?;
        self.out.flush()
    }

    fn end_line(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\r\n"))
    }

    fn cursor_position(&mut self) -> io::Result<CursorPos> {
        self.out.flush()?;
        let (column, row) = cursor::position()?;
        Ok(CursorPos { column, row })
    }

    fn move_cursor(&mut self, pos: CursorPos) -> io::Result<()> {
        execute!(self.out, MoveTo(pos.column, pos.row))
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.out.flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.out.flush()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(mapped) = map_key(key) {
                    return Ok(mapped);
                }
            }
        }
    }

    fn begin_key_input(&mut self) -> io::Result<()> {
        self.out.flush()?;
        enable_raw_mode()
    }

    fn end_key_input(&mut self) -> io::Result<()> {
        disable_raw_mode()
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Switch to the alternate screen and hand back the surface to draw on.
pub fn setup_terminal() -> io::Result<CrosstermSurface> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(CrosstermSurface::new())
}

/// Restore the terminal to normal mode.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), ResetColor, LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// SCRIPTED SURFACE (tests)
// ============================================================================

#[cfg(test)]
pub(crate) use scripted::ScriptedSurface;


// ============================================================================
// TESTS
// ============================================================================
