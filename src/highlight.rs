//! # Highlighter
//!
//! Computes a highlight class for each byte of a row's rendered representation. Classification
//! only runs when a syntax profile is active and its `HIGHLIGHT_NUMBERS` flag is set; absent a
//! profile every byte is `Normal`. `Match` is never produced here — it's painted on top by the
//! search component and always overrides whatever class was underneath.

use crate::syntax::{Conf, HIGHLIGHT_NUMBERS};

/// The highlight class attached to one rendered byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    Number,
    Match,
}

/// A byte that separates tokens: whitespace, NUL, or one of the punctuation characters listed in
/// the spec.
fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0 || b",.()+-/*=~%<>[];\"".contains(&b)
}

/// Recompute the highlight vector for `render` given the active syntax profile. `render` and the
/// returned vector always have the same length.
pub fn highlight_render(render: &[u8], syntax: &Conf) -> Vec<Highlight> {
    let mut hl = vec![Highlight::Normal; render.len()];
    if !(syntax.flags & HIGHLIGHT_NUMBERS != 0) {
        return hl;
    }
    let mut prev_sep = true;
    let mut prev_hl = Highlight::Normal;
    for (i, &b) in render.iter().enumerate() {
        let is_number = (b.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
            || (b == b'.' && prev_hl == Highlight::Number);
        hl[i] = if is_number { Highlight::Number } else { Highlight::Normal };
        prev_sep = is_separator(b);
        prev_hl = hl[i];
    }
    hl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Conf;

    fn c_conf() -> Conf { Conf::builtin_c() }

    #[test]
    fn numbers_only_highlighted_after_separator() {
        let render = b"x = 123 + 4.5;";
        let hl = highlight_render(render, &c_conf());
        let expect_number: Vec<usize> = vec![4, 5, 6, 10, 11, 12];
        for (i, &b) in render.iter().enumerate() {
            let is_num = expect_number.contains(&i);
            assert_eq!(hl[i] == Highlight::Number, is_num, "byte {} = {:?}", i, b as char);
        }
    }

    #[test]
    fn no_profile_active_is_all_normal() {
        let render = b"123";
        let hl = highlight_render(render, &Conf::default());
        assert!(hl.iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn digit_after_double_quote_is_separator_preceded() {
        let render = br#"x = "5";"#;
        let hl = highlight_render(render, &c_conf());
        let quote_digit = render.iter().position(|&b| b == b'5').unwrap();
        assert_eq!(hl[quote_digit], Highlight::Number);
    }

    #[test]
    fn leading_digit_in_identifier_is_not_a_number() {
        // a digit right after a non-separator character (e.g. part of an identifier like `x1`)
        // is not separator-preceded, so it stays Normal.
        let render = b"x1";
        let hl = highlight_render(render, &c_conf());
        assert_eq!(hl, vec![Highlight::Normal, Highlight::Normal]);
    }
}
