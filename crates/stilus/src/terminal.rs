use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::{MoveTo, Show},
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, size, Clear, ClearType},
};
use thiserror::Error;

/// Raw-mode attribute get/set, size query, or terminal I/O failure.
/// Always fatal; the session guard restores the screen on the way out.
#[derive(Debug, Error)]
#[error("terminal control failed: {0}")]
pub struct TerminalControlError(#[from] io::Error);

/// Owns the raw/cooked mode transition for the lifetime of the editor.
///
/// Restoration runs in `Drop`, so every exit path — normal quit, an error
/// propagated with `?`, or an unwinding panic — leaves the user's terminal
/// usable. The panic hook installed in `main` calls [`restore`] as well,
/// before the default hook prints its report.
pub struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    /// Switches the terminal into raw mode: no echo, no line buffering, no
    /// signal keys, no output post-processing.
    pub fn new() -> Result<Self, TerminalControlError> {
        enable_raw_mode()?;
        log::debug!("entered raw mode");
        Ok(Self { out: io::stdout() })
    }

    /// Current terminal size as `(cols, rows)`. Queried at startup and on
    /// resize events; there is no SIGWINCH handling of our own.
    pub fn size() -> Result<(usize, usize), TerminalControlError> {
        let (cols, rows) = size()?;
        Ok((cols as usize, rows as usize))
    }

    /// Blocks up to `timeout` for the next input event. `Ok(None)` means no
    /// data arrived yet; any read failure is fatal.
    pub fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>, TerminalControlError> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Writes one composed frame and flushes it in a single burst, so a
    /// repaint is never visible half-done.
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<(), TerminalControlError> {
        self.out.write_all(frame)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore(&mut self.out);
    }
}

/// Clears the screen, homes and shows the cursor, and leaves raw mode.
/// Failures are ignored; there is nothing left to do about them on the way
/// out.
pub fn restore(out: &mut impl Write) {
    let _ = execute!(out, Clear(ClearType::All), MoveTo(0, 0), Show);
    let _ = disable_raw_mode();
    log::debug!("left raw mode");
}
