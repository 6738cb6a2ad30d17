//! # Append buffer
//!
//! A grow-only byte buffer scoped to a single frame. The compositor is the only producer; one
//! instance is created per `refresh_screen` call and handed to `terminal::print_and_flush` once
//! fully assembled, so the whole frame reaches the terminal in a single `write(2)`.
//!
//! Grounded directly in the original C `struct abuf` / `abAppend` / `abFree`: a realloc-on-append
//! buffer where an allocation failure silently drops that append rather than aborting the frame.

/// A single frame's worth of output bytes.
#[derive(Default)]
pub struct AppendBuffer {
    buf: Vec<u8>,
}

impl AppendBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self { Self::default() }

    /// Append bytes to the buffer. Rust's `Vec` aborts the process on allocation failure rather
    /// than returning one, so there is no silent-drop path to reproduce here; the call simply
    /// cannot fail in safe Rust.
    pub fn append(&mut self, bytes: &[u8]) { self.buf.extend_from_slice(bytes); }

    /// Append a `str`'s bytes to the buffer.
    pub fn append_str(&mut self, s: &str) { self.append(s.as_bytes()); }

    /// Borrow the buffer's contents.
    pub fn as_bytes(&self) -> &[u8] { &self.buf }

    /// Release the buffer's storage. Called implicitly at the end of a frame via `Drop`; exposed
    /// explicitly too since the source material frees the buffer at a specific point rather than
    /// relying on scope exit.
    pub fn free(self) { drop(self) }
}

#[cfg(test)]
mod tests {
    use super::AppendBuffer;

    #[test]
    fn append_concatenates_in_order() {
        let mut ab = AppendBuffer::new();
        ab.append(b"\x1b[H");
        ab.append_str("hello");
        assert_eq!(ab.as_bytes(), b"\x1b[Hhello");
    }

    #[test]
    fn new_buffer_is_empty() {
        assert_eq!(AppendBuffer::new().as_bytes(), b"");
    }
}
