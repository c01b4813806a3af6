use crate::kitty;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{stdout, Write};

/// Assumed terminal size (cols, rows) when the size query fails.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// One decoded keystroke from the raw input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    /// End of input, or an unrecoverable read error.
    Eof,
    /// The terminal was resized; the next frame re-derives its layout.
    Resize,
}

/// Scoped raw-mode ownership. Entering raw mode is fatal if it fails; once
/// entered, restoration plus the on-screen image wipe runs exactly once on
/// every exit path, including panics, via `Drop`.
pub struct RawGuard {
    cleaned: bool,
}

impl RawGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
        Ok(Self { cleaned: false })
    }

    pub fn cleanup(&mut self) {
        if self.cleaned {
            return;
        }
        self.cleaned = true;
        let _ = terminal::disable_raw_mode();
        let mut out = stdout();
        let _ = out.write_all(kitty::encode_clear_all().as_bytes());
        let _ = out.write_all(kitty::CLEAR_SCREEN.as_bytes());
        let _ = out.flush();
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Current terminal size in cells, degrading to [`DEFAULT_SIZE`].
pub fn size() -> (u16, u16) {
    terminal::size().unwrap_or(DEFAULT_SIZE)
}

/// Blocks until one keystroke (or resize, or end of input) arrives.
pub fn read_key() -> Key {
    loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    // Ctrl-C / Ctrl-D end the session like end-of-input.
                    if matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d')) {
                        return Key::Eof;
                    }
                    continue;
                }
                match key.code {
                    KeyCode::Char(c) => return Key::Char(c),
                    KeyCode::Enter => return Key::Enter,
                    KeyCode::Esc => return Key::Esc,
                    _ => {}
                }
            }
            Ok(Event::Resize(..)) => return Key::Resize,
            Ok(_) => {}
            Err(_) => return Key::Eof,
        }
    }
}
