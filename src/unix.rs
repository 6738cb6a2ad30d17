//! # sys (UNIX)
//!
//! UNIX-specific terminal primitives. Imported as `sys` by the rest of the crate. All of this
//! module talks to the OS directly through `libc`; nothing here is itself part of the editor
//! core, it's the thin collaborator the core is specified against.

use std::io;
use std::mem::MaybeUninit;

use libc::{
    c_int, ioctl, read, tcgetattr, tcsetattr, termios, winsize, write, BRKINT, CS8, ECHO, ICANON,
    ICRNL, IEXTEN, INPCK, ISIG, ISTRIP, IXON, OPOST, STDIN_FILENO, STDOUT_FILENO, TCSAFLUSH,
    TIOCGWINSZ, VMIN, VTIME,
};

use crate::Error;

/// The terminal mode, as understood by the platform. On UNIX this is `termios`.
pub type TermMode = termios;

fn cerr(ret: c_int) -> io::Result<()> {
    if ret == -1 { Err(io::Error::last_os_error()) } else { Ok(()) }
}

/// Snapshot the current terminal attributes.
fn get_termios() -> io::Result<TermMode> {
    let mut raw = MaybeUninit::<termios>::uninit();
    cerr(unsafe { tcgetattr(STDIN_FILENO, raw.as_mut_ptr()) })?;
    Ok(unsafe { raw.assume_init() })
}

/// Install a terminal mode, taking effect once all queued output has drained.
pub fn set_termios(mode: &TermMode) -> Result<(), Error> {
    cerr(unsafe { tcsetattr(STDIN_FILENO, TCSAFLUSH, mode) }).map_err(Error::from)
}

/// Snapshot the current terminal attributes and install a raw-mode variant of them. Returns the
/// pre-raw snapshot so the caller can restore it later.
pub fn enable_raw_mode() -> Result<TermMode, Error> {
    let orig = get_termios().map_err(|_| Error::TerminalInit)?;
    let mut raw = orig;
    // IXON: software flow control (XON/XOFF). ICRNL: CR -> NL translation on input.
    // BRKINT: break condition raising SIGINT. INPCK: parity checking. ISTRIP: 8th-bit stripping.
    raw.c_iflag &= !(BRKINT | ICRNL | INPCK | ISTRIP | IXON);
    // OPOST: output post-processing (e.g. \n -> \r\n).
    raw.c_oflag &= !OPOST;
    // Character size: 8 bits per byte.
    raw.c_cflag |= CS8;
    // ECHO: echo input. ICANON: line buffering. IEXTEN: extended input (Ctrl-V etc).
    // ISIG: SIGINT/SIGTSTP generation from Ctrl-C/Ctrl-Z.
    raw.c_lflag &= !(ECHO | ICANON | IEXTEN | ISIG);
    raw.c_cc[VMIN] = 0;
    raw.c_cc[VTIME] = 1;
    set_termios(&raw).map_err(|_| Error::TerminalInit)?;
    Ok(orig)
}

/// Query the window size through `TIOCGWINSZ`. Returns `None` if the ioctl fails or reports a
/// zero-width window, in which case the caller should fall back to the cursor-position probe.
pub fn ioctl_window_size() -> Option<(usize, usize)> {
    let mut ws = MaybeUninit::<winsize>::uninit();
    let ret = unsafe { ioctl(STDOUT_FILENO, TIOCGWINSZ, ws.as_mut_ptr()) };
    if ret == -1 {
        return None;
    }
    let ws = unsafe { ws.assume_init() };
    if ws.ws_col == 0 {
        None
    } else {
        Some((ws.ws_row as usize, ws.ws_col as usize))
    }
}

/// Read at most one byte from stdin. Returns `Ok(None)` on a 0-byte read (the `VTIME` timeout
/// firing with nothing typed), `Ok(Some(byte))` on success, `Err` on a true read failure.
pub fn read_byte() -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    let n = unsafe { read(STDIN_FILENO, buf.as_mut_ptr().cast(), 1) };
    match n {
        -1 => Err(io::Error::last_os_error()),
        0 => Ok(None),
        _ => Ok(Some(buf[0])),
    }
}

/// Write a full buffer to stdout in a single `write(2)` call. Short writes (which `write(2)` can
/// legally perform on a pipe or a loaded terminal) are looped over until the whole buffer is
/// flushed or an error occurs.
pub fn write_all(mut bytes: &[u8]) -> io::Result<()> {
    while !bytes.is_empty() {
        let n = unsafe { write(STDOUT_FILENO, bytes.as_ptr().cast(), bytes.len()) };
        if n == -1 {
            return Err(io::Error::last_os_error());
        }
        bytes = &bytes[n as usize..];
    }
    Ok(())
}

/// Read one byte from stdin, blocking (retrying past `VTIME` timeouts) until a byte arrives.
pub fn read_byte_blocking() -> io::Result<u8> {
    loop {
        if let Some(b) = read_byte()? {
            return Ok(b);
        }
    }
}
