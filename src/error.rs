//! # Errors

use std::fmt;

/// Error type for every fallible operation in the editor core.
#[derive(Debug)]
pub enum Error {
    /// Wrapper around `std::io::Error`. Covers file I/O and raw terminal reads/writes.
    Io(std::io::Error),
    /// Raw mode could not be enabled: the initial attribute query or install failed.
    TerminalInit,
    /// Neither the window-size ioctl nor the cursor-position fallback succeeded.
    WindowSize,
}

impl From<std::io::Error> for Error {
    /// Convert an IO Error into an editor `Error`.
    fn from(err: std::io::Error) -> Self { Self::Io(err) }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{}", err),
            Self::TerminalInit => write!(f, "could not initialize terminal raw mode"),
            Self::WindowSize => write!(f, "could not determine terminal window size"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::TerminalInit | Self::WindowSize => None,
        }
    }
}
