//! # ANSI/VT100 escape sequences
//!
//! Named constants for the strict subset of VT100/ANSI control sequences this editor emits.
//! Kept as plain `&str` constants so the compositor can `push_str` them into its append buffer
//! without any per-frame formatting cost.

/// Hide the cursor (`ESC[?25l`).
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Show the cursor (`ESC[?25h`).
pub const SHOW_CURSOR: &str = "\x1b[?25h";
/// Move the cursor to the top-left corner (`ESC[H`).
pub const MOVE_CURSOR_TO_START: &str = "\x1b[H";
/// Clear the entire screen (`ESC[2J`).
pub const CLEAR_SCREEN: &str = "\x1b[2J";
/// Clear from the cursor to the end of the current line (`ESC[K`).
pub const CLEAR_LINE_RIGHT_OF_CURSOR: &str = "\x1b[K";
/// Switch to inverse video (`ESC[7m`).
pub const REVERSE_VIDEO: &str = "\x1b[7m";
/// Reset all SGR attributes, including color (`ESC[m`).
pub const RESET_FMT: &str = "\x1b[m";
/// Reset only the foreground color (`ESC[39m`).
pub const RESET_FG: &str = "\x1b[39m";

/// Map a highlight class to its ANSI SGR foreground color code.
pub fn syntax_to_color(class: crate::highlight::Highlight) -> u8 {
    use crate::highlight::Highlight::{Match, Normal, Number};
    match class {
        Number => 31,
        Match => 34,
        Normal => 37,
    }
}
