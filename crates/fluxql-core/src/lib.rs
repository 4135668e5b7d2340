//! # fluxql-core
//!
//! Lexer, parser and AST for a SQL-like time-series query language.
//!
//! This crate provides:
//! - A hand-written lexer with one token of pushback
//! - A recursive descent statement parser with precedence-climbing expressions
//! - Position-anchored parse errors
//! - `Display` rendering of every AST node back to query text
//!
//! ## Parsing
//!
//! ```rust
//! use fluxql_core::{parse_query, Statement};
//!
//! let query = parse_query("SELECT value FROM cpu WHERE host = 'a'; LIST DATABASES").unwrap();
//! assert_eq!(query.len(), 2);
//! assert_eq!(query.statements[1], Statement::ListDatabases);
//! assert_eq!(
//!     query.statements[0].to_string(),
//!     r#"SELECT value FROM cpu WHERE host = "a""#
//! );
//! ```
//!
//! ## Errors
//!
//! Errors carry the offending token, what was expected and where:
//!
//! ```rust
//! use fluxql_core::parse_statement;
//!
//! let err = parse_statement("SELECT field1 FROM myseries LIMIT 0").unwrap_err();
//! assert_eq!(err.to_string(), "LIMIT must be > 0 at line 1, char 35");
//! ```

pub mod ast;
pub mod duration;
pub mod lexer;
pub mod parser;
pub mod quote;

use core::str::FromStr;

pub use ast::{Expr, Query, Statement};
pub use duration::{format_duration, parse_duration, DurationError};
pub use lexer::{Lexer, Pos, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use quote::{quote, quote_ident};

/// Parses every statement in `input`.
///
/// # Errors
///
/// Returns the first `ParseError` encountered.
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    Parser::new(input).parse_query()
}

/// Parses `input` as exactly one statement, optionally followed by `;`.
///
/// # Errors
///
/// Returns a `ParseError` if the statement is malformed or followed by
/// anything else.
pub fn parse_statement(input: &str) -> Result<Statement, ParseError> {
    let mut parser = Parser::new(input);
    let stmt = parser.parse_statement()?;
    parser.expect_end_of_statement()?;
    Ok(stmt)
}

/// Parses `input` as exactly one expression.
///
/// # Errors
///
/// Returns a `ParseError` if the expression is malformed or followed by
/// anything else.
pub fn parse_expr(input: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(input);
    let expr = parser.parse_expr()?;
    parser.expect_end_of_input()?;
    Ok(expr)
}

impl FromStr for Query {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_query(s)
    }
}

impl FromStr for Statement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_statement(s)
    }
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expr(s)
    }
}
