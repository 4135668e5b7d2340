//! String and identifier quoting used when rendering queries.

use crate::lexer::{lookup, TokenKind};

/// Wraps a string in double quotes, escaping newlines, backslashes and quotes.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Returns the identifier unchanged when it can be written bare, otherwise
/// quotes it.
///
/// An identifier is written bare when it is non-empty and contains only ASCII
/// letters, `_` and `.`.
#[must_use]
pub fn quote_ident(s: &str) -> String {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic() || c == '_' || c == '.') {
        s.to_string()
    } else {
        quote(s)
    }
}

/// Renders a name so that it scans back as the same name: bare when it lexes
/// as a plain identifier, quoted otherwise.
pub(crate) fn format_ident(s: &str) -> String {
    let mut chars = s.chars();
    let bare = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        && lookup(s) == TokenKind::Ident;
    if bare {
        s.to_string()
    } else {
        quote(s)
    }
}
