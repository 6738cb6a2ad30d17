//! # Configuration
//!
//! Compile-time defaults for the text editor. Loading configuration from disk
//! is explicitly out of scope for this editor; `Config` exists purely as a
//! typed place to keep the few tunables the rest of the crate reads from.

use std::time::Duration;

/// Tunable parameters of the editor core.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The size of a tab stop. Must be > 0.
    pub tab_stop: usize,
    /// The number of additional Ctrl-Q presses required to quit with unsaved changes, after
    /// the first. The countdown shown to the user starts at this value.
    pub quit_times: usize,
    /// How long a status message remains visible in the message bar.
    pub message_dur: Duration,
}

impl Default for Config {
    /// Default configuration: an 8-column tab stop, a 3-press quit confirmation countdown (so
    /// a dirty buffer requires 4 consecutive Ctrl-Q presses to discard), and a 5 second message
    /// bar timeout.
    fn default() -> Self {
        Self { tab_stop: 8, quit_times: 3, message_dur: Duration::new(5, 0) }
    }
}
