//! # Row store
//!
//! A `Row` owns one line of the buffer in two parallel representations: `chars`, the logical
//! bytes as typed, and `render`, the same content after tab expansion, plus a `highlight` vector
//! of the same length as `render`. The three are kept in lockstep: any mutation of `chars` must
//! be followed by a call to `Row::rebuild`, which recomputes `render` and `highlight` together so
//! no caller ever observes one without the other.

use crate::ansi_escape::syntax_to_color;
use crate::append_buffer::AppendBuffer;
use crate::highlight::{highlight_render, Highlight};
use crate::syntax::Conf;

/// One line of the buffer. Input and storage are byte-oriented: one logical character is one
/// byte (no multibyte/Unicode handling).
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// The logical characters, with no trailing newline.
    pub chars: Vec<u8>,
    /// `chars` after tab expansion.
    pub render: Vec<u8>,
    /// One highlight class per byte of `render`. Always the same length as `render`.
    pub highlight: Vec<Highlight>,
}

impl Row {
    /// Create a row from its logical bytes. `render`/`highlight` start empty and are filled in by
    /// the first `rebuild` call (performed by whoever inserts the row into the row store).
    pub fn new(chars: Vec<u8>) -> Self { Self { chars, render: Vec::new(), highlight: Vec::new() } }

    /// Number of logical bytes.
    pub fn size(&self) -> usize { self.chars.len() }

    /// Number of rendered bytes.
    pub fn rsize(&self) -> usize { self.render.len() }

    /// Recompute `render` (tab expansion) and `highlight` from `chars`. Must be called after every
    /// mutation of `chars` before any caller observes `render`/`highlight`.
    pub fn rebuild(&mut self, syntax: &Conf, tab_stop: usize) {
        let tab_stop = tab_stop.max(1);
        let mut render = Vec::with_capacity(self.chars.len());
        for &b in &self.chars {
            if b == b'\t' {
                render.push(b' ');
                while render.len() % tab_stop != 0 {
                    render.push(b' ');
                }
            } else {
                render.push(b);
            }
        }
        self.highlight = highlight_render(&render, syntax);
        self.render = render;
    }

    /// Map a logical column (index into `chars`) to a rendered column, expanding tabs along the
    /// way. `cx` may equal `self.size()` (the position one past the last character).
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut rx = 0;
        for &b in self.chars.iter().take(cx) {
            if b == b'\t' {
                rx += tab_stop - (rx % tab_stop);
            } else {
                rx += 1;
            }
        }
        rx
    }

    /// Map a rendered column back to the smallest logical column whose rendered position is >=
    /// `rx`. The inverse of `cx_to_rx`.
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut cur_rx = 0;
        for (cx, &b) in self.chars.iter().enumerate() {
            if cur_rx >= rx {
                return cx;
            }
            if b == b'\t' {
                cur_rx += tab_stop - (cur_rx % tab_stop);
            } else {
                cur_rx += 1;
            }
        }
        self.chars.len()
    }

    /// Insert a byte at logical position `at`, clamped to `[0, size()]`.
    pub fn insert_char(&mut self, at: usize, ch: u8, syntax: &Conf, tab_stop: usize) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, ch);
        self.rebuild(syntax, tab_stop);
    }

    /// Delete the byte at logical position `at`. No-op if `at` is out of range.
    pub fn delete_char(&mut self, at: usize, syntax: &Conf, tab_stop: usize) {
        if at < self.chars.len() {
            self.chars.remove(at);
            self.rebuild(syntax, tab_stop);
        }
    }

    /// Append bytes to the end of this row's logical characters.
    pub fn append_string(&mut self, s: &[u8], syntax: &Conf, tab_stop: usize) {
        self.chars.extend_from_slice(s);
        self.rebuild(syntax, tab_stop);
    }

    /// Split this row at logical position `at`: truncate it in place and return the removed
    /// suffix as a fresh, un-rebuilt set of bytes (the caller wraps it in a new `Row`).
    pub fn split_off(&mut self, at: usize, syntax: &Conf, tab_stop: usize) -> Vec<u8> {
        let tail = self.chars.split_off(at.min(self.chars.len()));
        self.rebuild(syntax, tab_stop);
        tail
    }

    /// Draw the visible slice `[col_off, col_off + width)` of this row's rendered content into
    /// `buffer`, emitting SGR color-change sequences only when the highlight class changes
    /// between consecutive bytes. Always appends the visible slice regardless of the row's
    /// length (a prior, discarded draft of this logic only appended when the row overflowed the
    /// screen width; always-appending is correct). Does not reset the foreground color at the
    /// end; the compositor does that once per line, uniformly for both content and tilde lines.
    pub fn draw(&self, col_off: usize, width: usize, buffer: &mut AppendBuffer) {
        if col_off >= self.render.len() {
            return;
        }
        let end = (col_off + width).min(self.render.len());
        let mut current: Option<Highlight> = None;
        for (i, &b) in self.render[col_off..end].iter().enumerate() {
            let class = self.highlight[col_off + i];
            if current != Some(class) {
                buffer.append_str(&format!("\x1b[{}m", syntax_to_color(class)));
                current = Some(class);
            }
            buffer.append(&[b]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(s: &[u8]) -> Row {
        let mut row = Row::new(s.to_vec());
        row.rebuild(&Conf::default(), 8);
        row
    }

    #[test]
    fn tab_rendering_matches_spec_s2() {
        let row = row_of(b"\tX");
        assert_eq!(row.cx_to_rx(0, 8), 0);
        assert_eq!(row.cx_to_rx(1, 8), 8);
        assert_eq!(row.cx_to_rx(2, 8), 9);
        assert_eq!(row.rsize(), 9);
    }

    #[test]
    fn render_highlight_always_same_length() {
        let row = row_of(b"x = 1\t2");
        assert_eq!(row.render.len(), row.highlight.len());
        assert_eq!(row.render.len(), row.rsize());
    }

    #[test]
    fn rx_to_cx_round_trips_cx_to_rx() {
        let row = row_of(b"a\tbc\td");
        for k in 0..=row.size() {
            let rx = row.cx_to_rx(k, 8);
            assert_eq!(row.rx_to_cx(rx, 8), k);
        }
    }

    #[test]
    fn insert_and_delete_char_rebuild_render() {
        let mut row = Row::new(b"abc".to_vec());
        row.rebuild(&Conf::default(), 8);
        row.insert_char(1, b'X', &Conf::default(), 8);
        assert_eq!(row.chars, b"aXbc");
        assert_eq!(row.render, b"aXbc");
        row.delete_char(0, &Conf::default(), 8);
        assert_eq!(row.chars, b"Xbc");
    }

    #[test]
    fn append_string_extends_chars() {
        let mut row = Row::new(b"foo".to_vec());
        row.append_string(b"bar", &Conf::default(), 8);
        assert_eq!(row.chars, b"foobar");
    }
}
