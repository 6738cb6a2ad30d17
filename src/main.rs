//! # CLI entry point
//!
//! `codible [path]`. With no argument: empty buffer. With one argument: opens that file. On a
//! fatal error (terminal init, window size, a read failure, or the file not opening at startup),
//! clears the screen, prints a diagnostic to stderr, and exits with status 1.

use codible::{Config, Editor, Error};

fn main() {
    let path = std::env::args().nth(1);
    if let Err(err) = run(path.as_deref()) {
        // Best-effort: leave the screen in a sane state even though the terminal mode has
        // already been restored by Editor's Drop impl by the time we get here.
        print!("\x1b[2J\x1b[H");
        eprintln!("codible: {}", err);
        std::process::exit(1);
    }
}

fn run(path: Option<&str>) -> Result<(), Error> {
    let mut editor = Editor::new(Config::default())?;
    editor.run(path)
}
