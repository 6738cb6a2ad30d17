//! # Terminal driver
//!
//! Puts the terminal into raw mode on start (and guarantees it is restored on every exit path,
//! via `Editor`'s `Drop` impl), and resolves the window size.

use crate::sys;
use crate::Error;

/// Enable raw mode, returning the original terminal mode so it can be restored later.
pub fn enable_raw_mode() -> Result<sys::TermMode, Error> { sys::enable_raw_mode() }

/// Restore a previously-saved terminal mode.
pub fn disable_raw_mode(orig: &sys::TermMode) -> Result<(), Error> { sys::set_termios(orig) }

/// Resolve the window size as `(rows, cols)`. Prefers the OS ioctl; falls back to moving the
/// cursor to the bottom-right corner and reading back its reported position.
pub fn get_window_size() -> Result<(usize, usize), Error> {
    match sys::ioctl_window_size() {
        Some(size) => Ok(size),
        None => get_window_size_using_cursor(),
    }
}

/// Fallback window-size probe: push the cursor as far right/down as the terminal allows, then
/// ask for its position with a Device Status Report. Used only when `TIOCGWINSZ` fails, e.g. when
/// stdout isn't a real terminal device but stdin still is.
fn get_window_size_using_cursor() -> Result<(usize, usize), Error> {
    sys::write_all(b"\x1b[999C\x1b[999B\x1b[6n").map_err(|_| Error::WindowSize)?;
    get_cursor_position().ok_or(Error::WindowSize)
}

/// Parse a `ESC [ rows ; cols R` cursor position report from stdin.
fn get_cursor_position() -> Option<(usize, usize)> {
    let mut buf = Vec::with_capacity(32);
    while buf.len() < 31 {
        match sys::read_byte().ok()? {
            Some(b'R') => break,
            Some(b) => buf.push(b),
            // A genuine read failure already returned None above via `?`; a 0-byte timeout
            // means the terminal never answered the DSR query.
            None => return None,
        }
    }
    let body = buf.strip_prefix(b"\x1b[")?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// Write a full buffer to the terminal in one call, as the compositor requires for tear-free
/// frames.
pub fn print_and_flush(buffer: &[u8]) -> Result<(), Error> { Ok(sys::write_all(buffer)?) }
