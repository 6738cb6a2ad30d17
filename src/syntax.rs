//! # Syntax profile
//!
//! An immutable descriptor of which files a highlighting profile applies to and which highlight
//! features it turns on. Syntax-highlighting configuration files are out of scope for this
//! editor (see Non-goals); the single built-in C-family profile below is the only one that
//! exists.

/// Flag: enable numeric-literal highlighting.
pub const HIGHLIGHT_NUMBERS: u32 = 1 << 0;

/// A syntax highlighting profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conf {
    /// Label shown in the status bar (e.g. "c"). Empty string means no profile is active.
    pub name: &'static str,
    /// Filename extensions/substrings that activate this profile. An entry with a leading dot
    /// (e.g. `.c`) must match as an exact filename suffix; an entry without one matches as a
    /// substring anywhere in the filename.
    pub patterns: &'static [&'static str],
    /// Bitset of enabled highlight features (see the `HIGHLIGHT_*` constants).
    pub flags: u32,
}

impl Default for Conf {
    /// No profile active: no name, no patterns, no highlighting.
    fn default() -> Self { Self { name: "", patterns: &[], flags: 0 } }
}

impl Conf {
    /// The sole built-in profile: C-family sources, numeric literals only.
    pub fn builtin_c() -> Self {
        Self { name: "c", patterns: &[".c", ".h", ".cpp"], flags: HIGHLIGHT_NUMBERS }
    }

    /// Every registered profile, checked in order against a filename.
    fn all() -> [Self; 1] { [Self::builtin_c()] }

    /// Find the profile matching `filename`, if any. A pattern with a leading dot must match as
    /// an exact suffix; other patterns match anywhere in the filename.
    pub fn matching(filename: &str) -> Option<Self> {
        Self::all().into_iter().find(|conf| {
            conf.patterns.iter().any(|pat| {
                if pat.starts_with('.') { filename.ends_with(pat) } else { filename.contains(pat) }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Conf;

    #[test]
    fn matches_c_family_extensions() {
        assert!(Conf::matching("main.c").is_some());
        assert!(Conf::matching("header.h").is_some());
        assert!(Conf::matching("prog.cpp").is_some());
        assert!(Conf::matching("notes.txt").is_none());
    }

    #[test]
    fn default_conf_has_no_highlighting() {
        let conf = Conf::default();
        assert_eq!(conf.flags, 0);
        assert_eq!(conf.name, "");
    }
}
