//! Source location tracking for tokens and errors.

use core::fmt;

/// A line and character position in the source text.
///
/// Both coordinates are zero-based. The `Display` form is one-based, which is
/// what error messages show to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pos {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based character index within the line.
    pub char: usize,
}

impl Pos {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, char: usize) -> Self {
        Self { line, char }
    }

    /// Returns the position after consuming `ch`.
    #[must_use]
    pub const fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                line: self.line + 1,
                char: 0,
            }
        } else {
            Self {
                line: self.line,
                char: self.char + 1,
            }
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, char {}", self.line + 1, self.char + 1)
    }
}
