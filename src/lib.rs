pub use crate::{config::Config, editor::Editor, error::Error};

mod ansi_escape;
mod append_buffer;
mod config;
mod editor;
mod error;
mod highlight;
mod input;
mod row;
mod syntax;
mod terminal;

#[cfg(unix)]
#[path = "unix.rs"]
mod sys;
