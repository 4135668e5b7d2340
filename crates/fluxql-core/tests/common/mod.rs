#![allow(dead_code)]

use fluxql_core::ast::{SelectStatement, Statement};
use fluxql_core::{Expr, ParseError, Parser};

/// Parses `query` as one complete statement.
pub fn parse(query: &str) -> Statement {
    fluxql_core::parse_statement(query)
        .unwrap_or_else(|e| panic!("Failed to parse: {query}\nError: {e:?}"))
}

/// Parses the leading statement of `query`, ignoring whatever follows it.
pub fn parse_prefix(query: &str) -> Statement {
    Parser::new(query)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {query}\nError: {e:?}"))
}

pub fn parse_err(query: &str) -> ParseError {
    Parser::new(query)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {query}"))
}

pub fn parse_select(query: &str) -> SelectStatement {
    select(parse(query))
}

pub fn select(stmt: Statement) -> SelectStatement {
    match stmt {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_expr(input: &str) -> Expr {
    fluxql_core::parse_expr(input)
        .unwrap_or_else(|e| panic!("Failed to parse expression: {input}\nError: {e:?}"))
}

pub fn parse_expr_err(input: &str) -> ParseError {
    Parser::new(input)
        .parse_expr()
        .expect_err(&format!("Expected parse error for: {input}"))
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(query).to_string() can be re-parsed into the same AST and
/// yields the same string again.
pub fn round_trip(query: &str) {
    let ast1 = parse(query);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {query}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    assert_eq!(ast1, ast2, "AST changed after round-trip of: {query}");
}
