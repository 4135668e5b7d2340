//! Query Lexer
//!
//! This module provides a hand-written lexer for the query language that
//! produces tokens on demand with one token of pushback.

mod pos;
mod scanner;
mod token;

pub use pos::Pos;
pub use scanner::Lexer;
pub use token::{lookup, Keyword, Token, TokenKind};
