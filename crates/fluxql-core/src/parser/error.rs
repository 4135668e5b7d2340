//! Parser error types.

use crate::lexer::Pos;

/// A parse error.
///
/// Parsing stops at the first error; there is no recovery and no partial AST.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A token other than one of the expected ones was found.
    #[error("found {found}, expected {} at {pos}", .expected.join(", "))]
    Unexpected {
        /// Literal text of the offending token, or its canonical spelling.
        found: String,
        /// What the grammar accepts at this point.
        expected: Vec<String>,
        /// Where the offending token starts.
        pos: Pos,
    },

    /// A syntactically well-formed token carries an unacceptable value.
    #[error("{message} at {pos}")]
    Invalid {
        /// Description of the problem.
        message: String,
        /// Where the offending token starts.
        pos: Pos,
    },
}

impl ParseError {
    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected<I, S>(found: impl Into<String>, expected: I, pos: Pos) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Unexpected {
            found: found.into(),
            expected: expected.into_iter().map(Into::into).collect(),
            pos,
        }
    }

    /// Creates a value error.
    #[must_use]
    pub fn invalid(message: impl Into<String>, pos: Pos) -> Self {
        Self::Invalid {
            message: message.into(),
            pos,
        }
    }

    /// Returns where the error occurred.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::Unexpected { pos, .. } | Self::Invalid { pos, .. } => *pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_display() {
        let err = ParseError::unexpected("blah", ["SELECT"], Pos::new(0, 0));
        assert_eq!(err.to_string(), "found blah, expected SELECT at line 1, char 1");
    }

    #[test]
    fn test_unexpected_display_joins_expected() {
        let err = ParseError::unexpected("EOF", ["KEYS", "VALUES"], Pos::new(2, 4));
        assert_eq!(
            err.to_string(),
            "found EOF, expected KEYS, VALUES at line 3, char 5"
        );
    }

    #[test]
    fn test_invalid_display() {
        let err = ParseError::invalid("LIMIT must be > 0", Pos::new(0, 34));
        assert_eq!(err.to_string(), "LIMIT must be > 0 at line 1, char 35");
        assert_eq!(err.pos(), Pos::new(0, 34));
    }
}
