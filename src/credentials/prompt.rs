//! Interactive first-run prompt for the API token
//!
//! The prompt runs before the widget enters the alternate screen. Input is
//! masked: raw mode is enabled and each typed character echoes as `*`.
//! After the token, a single keypress picks the storage backend.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, Write};

use super::StorageBackend;

/// A token entered by the user together with the chosen backend
#[derive(Debug, Clone)]
pub struct TokenEntry {
    /// The API token as typed
    pub token: String,
    /// Where the token should be persisted
    pub backend: StorageBackend,
}

/// Source of a first-run token entry
///
/// The store only depends on this trait, so tests can script the prompt
/// instead of driving a terminal.
pub trait TokenPrompt {
    /// Synchronously asks the user for a token and a storage backend
    fn read_token(&mut self) -> io::Result<TokenEntry>;
}

/// Terminal-backed prompt using masked raw-mode input
#[derive(Debug, Default)]
pub struct TerminalPrompt;

/// Restores cooked mode when the prompt scope ends, even on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl TokenPrompt for TerminalPrompt {
    fn read_token(&mut self) -> io::Result<TokenEntry> {
        let mut stdout = io::stdout();
        writeln!(stdout, "Lunch Money API token required.")?;
        writeln!(
            stdout,
            "Create one at https://my.lunchmoney.app/developers, then paste it below."
        )?;
        write!(stdout, "Token: ")?;
        stdout.flush()?;

        let _guard = RawModeGuard::enable()?;
        let token = read_masked_line(&mut stdout)?;

        write!(
            stdout,
            "Save to [s]ynced documents folder or [l]ocal config? "
        )?;
        stdout.flush()?;
        let backend = read_backend_choice(&mut stdout)?;

        Ok(TokenEntry { token, backend })
    }
}

/// Reads one line of input, echoing `*` per character, until Enter
fn read_masked_line(stdout: &mut impl Write) -> io::Result<String> {
    let mut buffer = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Ok(buffer);
                }
                KeyCode::Backspace => {
                    if buffer.pop().is_some() {
                        write!(stdout, "\u{8} \u{8}")?;
                        stdout.flush()?;
                    }
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        "token entry cancelled",
                    ));
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    write!(stdout, "*")?;
                    stdout.flush()?;
                }
                _ => {}
            }
        }
    }
}

/// Waits for an `s` or `l` keypress selecting the storage backend
fn read_backend_choice(stdout: &mut impl Write) -> io::Result<StorageBackend> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    write!(stdout, "synced\r\n")?;
                    stdout.flush()?;
                    return Ok(StorageBackend::Synced);
                }
                KeyCode::Char('l') | KeyCode::Char('L') => {
                    write!(stdout, "local\r\n")?;
                    stdout.flush()?;
                    return Ok(StorageBackend::Local);
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        "backend choice cancelled",
                    ));
                }
                _ => {}
            }
        }
    }
}
