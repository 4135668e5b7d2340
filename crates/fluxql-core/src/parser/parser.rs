//! Query parser implementation.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use regex::Regex;
use tracing::{debug, trace};

use super::error::ParseError;
use super::precedence::attach;
use crate::ast::{
    AlterRetentionPolicyStatement, BinaryOp, CreateContinuousQueryStatement,
    CreateRetentionPolicyStatement, DeleteStatement, Dimension, Expr, Field, ListFromStatement,
    ListStatement, Measurement, Privilege, PrivilegeStatement, Query, SelectStatement, SortField,
    Source, Statement, Target, DATE_TIME_FORMAT,
};
use crate::duration::parse_duration;
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// Layout of date-only time literals.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest replication factor accepted.
const MAX_REPLICATION: u32 = i32::MAX.unsigned_abs();

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date literal regex"))
}

fn date_time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(?:\.\d+)?$")
            .expect("Invalid datetime literal regex")
    })
}

/// Builds an "unexpected token" error for `tok`.
fn unexpected(tok: &Token, expected: &[&str]) -> ParseError {
    ParseError::unexpected(tok.describe(), expected.iter().copied(), tok.pos)
}

/// Returns true for tokens usable as a name (identifier or quoted string).
const fn is_name(tok: &Token) -> bool {
    matches!(tok.kind, TokenKind::Ident | TokenKind::String)
}

/// Whether a SELECT must carry an INTO clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetRequirement {
    Required,
    Optional,
}

/// Query parser.
///
/// Drives a [`Lexer`] token by token. Each parser owns its cursor, so
/// independent parsers can run on separate threads.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
        }
    }

    /// Parses every `;`-separated statement up to the end of input.
    ///
    /// Whitespace-only input yields an empty query.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` encountered.
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        if self.scan_ignore_whitespace().is_eof() {
            debug!("empty query");
            return Ok(Query::default());
        }
        self.unscan();

        let mut statements = Vec::new();
        loop {
            statements.push(self.parse_statement()?);

            let tok = self.scan_ignore_whitespace();
            match tok.kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    if self.scan_ignore_whitespace().is_eof() {
                        break;
                    }
                    self.unscan();
                }
                _ => return Err(unexpected(&tok, &[";", "EOF"])),
            }
        }

        debug!(statements = statements.len(), "parsed query");
        Ok(Query { statements })
    }

    /// Parses a single statement.
    ///
    /// Input after the statement is left unread.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input does not start with a valid statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let result = self.parse_statement_inner();
        match &result {
            Ok(stmt) => debug!(kind = stmt.kind(), "parsed statement"),
            Err(err) => debug!(error = %err, "statement parse failed"),
        }
        result
    }

    fn parse_statement_inner(&mut self) -> Result<Statement, ParseError> {
        let tok = self.scan_ignore_whitespace();
        trace!(token = tok.describe(), "dispatching statement");
        match tok.as_keyword() {
            Some(Keyword::Select) => Ok(Statement::Select(
                self.parse_select_statement(TargetRequirement::Optional)?,
            )),
            Some(Keyword::Delete) => Ok(Statement::Delete(self.parse_delete_statement()?)),
            Some(Keyword::List) => self.parse_list_statement(),
            Some(Keyword::Create) => self.parse_create_statement(),
            Some(Keyword::Drop) => self.parse_drop_statement(),
            Some(Keyword::Grant) => Ok(Statement::Grant(
                self.parse_privilege_statement(Keyword::To)?,
            )),
            Some(Keyword::Revoke) => Ok(Statement::Revoke(
                self.parse_privilege_statement(Keyword::From)?,
            )),
            Some(Keyword::Alter) => self.parse_alter_statement(),
            _ => Err(unexpected(&tok, &["SELECT"])),
        }
    }

    /// Parses a LIST statement. The LIST keyword has been consumed.
    fn parse_list_statement(&mut self) -> Result<Statement, ParseError> {
        let tok = self.scan_ignore_whitespace();
        match tok.as_keyword() {
            Some(Keyword::Series) => Ok(Statement::ListSeries(self.parse_list_filter()?)),
            Some(Keyword::Continuous) => {
                self.expect_keyword(Keyword::Queries)?;
                Ok(Statement::ListContinuousQueries)
            }
            Some(Keyword::Databases) => Ok(Statement::ListDatabases),
            Some(Keyword::Measurements) => {
                Ok(Statement::ListMeasurements(self.parse_list_filter()?))
            }
            Some(Keyword::Tag) => {
                let next = self.scan_ignore_whitespace();
                match next.as_keyword() {
                    Some(Keyword::Keys) => Ok(Statement::ListTagKeys(self.parse_list_from()?)),
                    Some(Keyword::Values) => {
                        Ok(Statement::ListTagValues(self.parse_list_from()?))
                    }
                    _ => Err(unexpected(&next, &["KEYS", "VALUES"])),
                }
            }
            Some(Keyword::Field) => {
                let next = self.scan_ignore_whitespace();
                match next.as_keyword() {
                    Some(Keyword::Keys) => Ok(Statement::ListFieldKeys(self.parse_list_from()?)),
                    Some(Keyword::Values) => {
                        Ok(Statement::ListFieldValues(self.parse_list_from()?))
                    }
                    _ => Err(unexpected(&next, &["KEYS", "VALUES"])),
                }
            }
            _ => Err(unexpected(
                &tok,
                &["SERIES", "CONTINUOUS", "MEASUREMENTS", "TAG", "FIELD"],
            )),
        }
    }

    /// Parses a CREATE statement. The CREATE keyword has been consumed.
    fn parse_create_statement(&mut self) -> Result<Statement, ParseError> {
        let tok = self.scan_ignore_whitespace();
        match tok.as_keyword() {
            Some(Keyword::Continuous) => Ok(Statement::CreateContinuousQuery(
                self.parse_create_continuous_query_statement()?,
            )),
            Some(Keyword::Database) => Ok(Statement::CreateDatabase {
                name: self.parse_identifier()?,
            }),
            Some(Keyword::User) => self.parse_create_user_statement(),
            Some(Keyword::Retention) => {
                self.expect_keyword(Keyword::Policy)?;
                Ok(Statement::CreateRetentionPolicy(
                    self.parse_create_retention_policy_statement()?,
                ))
            }
            _ => Err(unexpected(
                &tok,
                &["CONTINUOUS", "DATABASE", "USER", "RETENTION"],
            )),
        }
    }

    /// Parses a DROP statement. The DROP keyword has been consumed.
    fn parse_drop_statement(&mut self) -> Result<Statement, ParseError> {
        let tok = self.scan_ignore_whitespace();
        match tok.as_keyword() {
            Some(Keyword::Series) => Ok(Statement::DropSeries {
                name: self.parse_name()?,
            }),
            Some(Keyword::Continuous) => {
                self.expect_keyword(Keyword::Query)?;
                Ok(Statement::DropContinuousQuery {
                    name: self.parse_name()?,
                })
            }
            Some(Keyword::Database) => Ok(Statement::DropDatabase {
                name: self.parse_identifier()?,
            }),
            Some(Keyword::User) => Ok(Statement::DropUser {
                name: self.parse_identifier()?,
            }),
            _ => Err(unexpected(&tok, &["SERIES", "CONTINUOUS"])),
        }
    }

    /// Parses an ALTER statement. The ALTER keyword has been consumed.
    fn parse_alter_statement(&mut self) -> Result<Statement, ParseError> {
        let tok = self.scan_ignore_whitespace();
        if !tok.kind.is_keyword(Keyword::Retention) {
            return Err(unexpected(&tok, &["RETENTION"]));
        }
        self.expect_keyword(Keyword::Policy)?;
        Ok(Statement::AlterRetentionPolicy(
            self.parse_alter_retention_policy_statement()?,
        ))
    }

    /// Parses a SELECT statement. The SELECT keyword has been consumed.
    fn parse_select_statement(
        &mut self,
        requirement: TargetRequirement,
    ) -> Result<SelectStatement, ParseError> {
        let fields = self.parse_fields()?;
        let target = self.parse_target(requirement)?;

        self.expect_keyword(Keyword::From)?;
        let source = self.parse_source()?;

        let condition = self.parse_condition()?;
        let dimensions = self.parse_dimensions()?;
        let sort_fields = self.parse_order_by()?;
        let limit = self.parse_limit()?;

        Ok(SelectStatement {
            fields,
            target,
            source,
            condition,
            dimensions,
            sort_fields,
            limit,
        })
    }

    /// Parses a DELETE statement. The DELETE keyword has been consumed.
    fn parse_delete_statement(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::From)?;
        let source = self.parse_source()?;
        let condition = self.parse_condition()?;
        Ok(DeleteStatement { source, condition })
    }

    /// Parses the `[WHERE] [ORDER BY] [LIMIT]` tail of LIST SERIES and LIST MEASUREMENTS.
    fn parse_list_filter(&mut self) -> Result<ListStatement, ParseError> {
        Ok(ListStatement {
            condition: self.parse_condition()?,
            sort_fields: self.parse_order_by()?,
            limit: self.parse_limit()?,
        })
    }

    /// Parses the `FROM [WHERE] [ORDER BY] [LIMIT]` tail of the tag and field listings.
    fn parse_list_from(&mut self) -> Result<ListFromStatement, ParseError> {
        self.expect_keyword(Keyword::From)?;
        Ok(ListFromStatement {
            source: self.parse_source()?,
            condition: self.parse_condition()?,
            sort_fields: self.parse_order_by()?,
            limit: self.parse_limit()?,
        })
    }

    /// Parses `QUERY <name> ON <db> BEGIN SELECT ... END`.
    /// The CREATE CONTINUOUS keywords have been consumed.
    fn parse_create_continuous_query_statement(
        &mut self,
    ) -> Result<CreateContinuousQueryStatement, ParseError> {
        self.expect_keyword(Keyword::Query)?;
        let name = self.parse_identifier()?;

        self.expect_keyword(Keyword::On)?;
        let database = self.parse_identifier()?;

        self.expect_keyword(Keyword::Begin)?;
        self.expect_keyword(Keyword::Select)?;
        let source = self.parse_select_statement(TargetRequirement::Required)?;
        self.expect_keyword(Keyword::End)?;

        Ok(CreateContinuousQueryStatement {
            name,
            database,
            source,
        })
    }

    /// Parses `<name> WITH PASSWORD <password>`. The CREATE USER keywords
    /// have been consumed.
    fn parse_create_user_statement(&mut self) -> Result<Statement, ParseError> {
        let name = self.parse_name()?;
        self.expect_keyword(Keyword::With)?;
        self.expect_keyword(Keyword::Password)?;
        let password = self.parse_name()?;
        Ok(Statement::CreateUser { name, password })
    }

    fn parse_create_retention_policy_statement(
        &mut self,
    ) -> Result<CreateRetentionPolicyStatement, ParseError> {
        let name = self.parse_identifier()?;
        self.expect_keyword(Keyword::On)?;
        let database = self.parse_identifier()?;

        self.expect_keyword(Keyword::Duration)?;
        let duration = self.parse_duration_value()?;

        self.expect_keyword(Keyword::Replication)?;
        let replication = self.parse_int(1, MAX_REPLICATION)?;

        let default = self.consume_keyword(Keyword::Default);

        Ok(CreateRetentionPolicyStatement {
            name,
            database,
            duration,
            replication,
            default,
        })
    }

    fn parse_alter_retention_policy_statement(
        &mut self,
    ) -> Result<AlterRetentionPolicyStatement, ParseError> {
        let name = self.parse_identifier()?;
        self.expect_keyword(Keyword::On)?;
        let database = self.parse_identifier()?;

        let mut stmt = AlterRetentionPolicyStatement {
            name,
            database,
            duration: None,
            replication: None,
            default: false,
        };

        // At least one option is required, at most three are read.
        for i in 0..3 {
            let tok = self.scan_ignore_whitespace();
            match tok.as_keyword() {
                Some(Keyword::Duration) => stmt.duration = Some(self.parse_duration_value()?),
                Some(Keyword::Replication) => {
                    stmt.replication = Some(self.parse_int(1, MAX_REPLICATION)?);
                }
                Some(Keyword::Default) => stmt.default = true,
                _ => {
                    if i == 0 {
                        return Err(unexpected(&tok, &["DURATION", "RETENTION", "DEFAULT"]));
                    }
                    self.unscan();
                    break;
                }
            }
        }

        Ok(stmt)
    }

    /// Parses the body of GRANT (`preposition` = TO) or REVOKE (`preposition` = FROM).
    fn parse_privilege_statement(
        &mut self,
        preposition: Keyword,
    ) -> Result<PrivilegeStatement, ParseError> {
        let privilege = self.parse_privilege()?;

        let mut on = None;
        let mut tok = self.scan_ignore_whitespace();
        if tok.kind.is_keyword(Keyword::On) {
            on = Some(self.parse_name()?);
            tok = self.scan_ignore_whitespace();
        } else if privilege != Privilege::All {
            // Only ALL PRIVILEGES may be granted cluster-wide.
            return Err(unexpected(&tok, &["ON"]));
        }

        if !tok.kind.is_keyword(preposition) {
            return Err(unexpected(&tok, &[preposition.as_str()]));
        }
        let user = self.parse_name()?;

        Ok(PrivilegeStatement {
            privilege,
            on,
            user,
        })
    }

    fn parse_privilege(&mut self) -> Result<Privilege, ParseError> {
        let tok = self.scan_ignore_whitespace();
        match tok.as_keyword() {
            Some(Keyword::Read) => Ok(Privilege::Read),
            Some(Keyword::Write) => Ok(Privilege::Write),
            Some(Keyword::All) => {
                self.consume_keyword(Keyword::Privileges);
                Ok(Privilege::All)
            }
            _ => Err(unexpected(&tok, &["READ", "WRITE", "ALL [PRIVILEGES]"])),
        }
    }

    /// Parses the field list of a SELECT.
    fn parse_fields(&mut self) -> Result<Vec<Field>, ParseError> {
        if self.scan_ignore_whitespace().kind == TokenKind::Mul {
            return Ok(vec![Field::wildcard()]);
        }
        self.unscan();

        let mut fields = Vec::new();
        loop {
            let expr = self.parse_expr()?;
            let alias = self.parse_alias()?;
            fields.push(Field { expr, alias });
            if !self.consume_comma() {
                break;
            }
        }
        Ok(fields)
    }

    /// Parses an optional `AS <name>`.
    fn parse_alias(&mut self) -> Result<Option<String>, ParseError> {
        if !self.consume_keyword(Keyword::As) {
            return Ok(None);
        }
        Ok(Some(self.parse_name()?))
    }

    /// Parses an optional `INTO [<rp>.]<measurement> [ON <db>]`.
    fn parse_target(
        &mut self,
        requirement: TargetRequirement,
    ) -> Result<Option<Target>, ParseError> {
        let tok = self.scan_ignore_whitespace();
        if !tok.kind.is_keyword(Keyword::Into) {
            if requirement == TargetRequirement::Required {
                return Err(unexpected(&tok, &["INTO"]));
            }
            self.unscan();
            return Ok(None);
        }

        // The first name is either the measurement or the retention policy.
        let mut target = Target::new(self.parse_identifier()?);
        if self.scan_ignore_whitespace().kind == TokenKind::Dot {
            let measurement = self.parse_identifier()?;
            target.retention_policy = Some(std::mem::replace(&mut target.measurement, measurement));
        } else {
            self.unscan();
        }

        if self.consume_keyword(Keyword::On) {
            target.database = Some(self.parse_identifier()?);
        }

        Ok(Some(target))
    }

    /// Parses a measurement name or a `join(...)` / `merge(...)` list.
    fn parse_source(&mut self) -> Result<Source, ParseError> {
        let tok = self.scan_ignore_whitespace();
        if !is_name(&tok) {
            return Err(unexpected(&tok, &["identifier", "string"]));
        }

        // Only a bare identifier immediately followed by "(" starts a list.
        let next = self.scan();
        if tok.kind == TokenKind::String || next.kind != TokenKind::LeftParen {
            self.unscan();
            return Ok(Source::measurement(tok.lit));
        }

        let source_type = tok.lit.to_lowercase();
        if source_type != "join" && source_type != "merge" {
            return Err(ParseError::invalid(
                format!("unknown merge type: {source_type}"),
                tok.pos,
            ));
        }

        let mut measurements = Vec::new();
        loop {
            let tok = self.scan_ignore_whitespace();
            if !is_name(&tok) {
                return Err(unexpected(&tok, &["measurement name"]));
            }
            measurements.push(Measurement::new(tok.lit));
            if !self.consume_comma() {
                break;
            }
        }
        self.expect(TokenKind::RightParen, ")")?;

        Ok(if source_type == "join" {
            Source::Join(measurements)
        } else {
            Source::Merge(measurements)
        })
    }

    /// Parses an optional `WHERE <expr>`.
    fn parse_condition(&mut self) -> Result<Option<Expr>, ParseError> {
        if !self.consume_keyword(Keyword::Where) {
            return Ok(None);
        }
        Ok(Some(self.parse_expr()?))
    }

    /// Parses an optional `GROUP BY <expr>[, <expr>]*`.
    fn parse_dimensions(&mut self) -> Result<Vec<Dimension>, ParseError> {
        if !self.consume_keyword(Keyword::Group) {
            return Ok(Vec::new());
        }
        self.expect_keyword(Keyword::By)?;

        let mut dimensions = Vec::new();
        loop {
            dimensions.push(Dimension {
                expr: self.parse_expr()?,
            });
            if !self.consume_comma() {
                break;
            }
        }
        Ok(dimensions)
    }

    /// Parses an optional `ORDER BY` clause.
    fn parse_order_by(&mut self) -> Result<Vec<SortField>, ParseError> {
        if !self.consume_keyword(Keyword::Order) {
            return Ok(Vec::new());
        }
        self.expect_keyword(Keyword::By)?;

        let mut fields = vec![self.parse_sort_field()?];
        while self.consume_comma() {
            fields.push(self.parse_sort_field()?);
        }
        Ok(fields)
    }

    /// Parses `ASC`, `DESC` or `<name> [ASC|DESC]`.
    fn parse_sort_field(&mut self) -> Result<SortField, ParseError> {
        let tok = self.scan_ignore_whitespace();
        match tok.kind {
            TokenKind::Ident | TokenKind::String => {
                let ascending = match self.scan_ignore_whitespace().as_keyword() {
                    Some(Keyword::Asc) => true,
                    Some(Keyword::Desc) => false,
                    _ => {
                        self.unscan();
                        true
                    }
                };
                Ok(SortField {
                    name: Some(tok.lit),
                    ascending,
                })
            }
            TokenKind::Keyword(Keyword::Asc) => Ok(SortField::direction(true)),
            TokenKind::Keyword(Keyword::Desc) => Ok(SortField::direction(false)),
            _ => Err(unexpected(&tok, &["identifier, ASC, or DESC"])),
        }
    }

    /// Parses an optional `LIMIT <n>` with `n > 0`.
    fn parse_limit(&mut self) -> Result<Option<usize>, ParseError> {
        if !self.consume_keyword(Keyword::Limit) {
            return Ok(None);
        }

        let tok = self.scan_ignore_whitespace();
        if tok.kind != TokenKind::Number {
            return Err(unexpected(&tok, &["number"]));
        }
        if tok.lit.contains('.') {
            return Err(ParseError::invalid(
                "fractional parts not allowed in limit",
                tok.pos,
            ));
        }

        let n: usize = tok
            .lit
            .parse()
            .map_err(|_| ParseError::invalid("unable to parse number", tok.pos))?;
        if n == 0 {
            return Err(ParseError::invalid("LIMIT must be > 0", tok.pos));
        }
        Ok(Some(n))
    }

    /// Parses an integer in `min..=max`.
    fn parse_int(&mut self, min: u32, max: u32) -> Result<u32, ParseError> {
        let tok = self.scan_ignore_whitespace();
        if tok.kind != TokenKind::Number {
            return Err(unexpected(&tok, &["number"]));
        }
        if tok.lit.contains('.') {
            return Err(ParseError::invalid("number must be an integer", tok.pos));
        }

        match tok.lit.parse::<u32>() {
            Ok(n) if (min..=max).contains(&n) => Ok(n),
            _ => Err(ParseError::invalid(
                format!("invalid value {}: must be {min} <= n <= {max}", tok.lit),
                tok.pos,
            )),
        }
    }

    /// Parses a duration literal value.
    fn parse_duration_value(&mut self) -> Result<std::time::Duration, ParseError> {
        let tok = self.scan_ignore_whitespace();
        if tok.kind != TokenKind::DurationVal {
            return Err(unexpected(&tok, &["duration"]));
        }
        parse_duration(&tok.lit).map_err(|err| ParseError::invalid(err.to_string(), tok.pos))
    }

    /// Parses a name that must be an identifier (or quoted string).
    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let tok = self.scan_ignore_whitespace();
        if !is_name(&tok) {
            return Err(unexpected(&tok, &["identifier"]));
        }
        Ok(tok.lit)
    }

    /// Parses a name given as an identifier or a string.
    fn parse_name(&mut self) -> Result<String, ParseError> {
        let tok = self.scan_ignore_whitespace();
        if !is_name(&tok) {
            return Err(unexpected(&tok, &["identifier", "string"]));
        }
        Ok(tok.lit)
    }

    /// Parses an expression.
    ///
    /// Operators are folded by precedence; equal precedence associates left.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input does not start with a valid expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_unary_expr()?;
        loop {
            let tok = self.scan_ignore_whitespace();
            let Some(op) = BinaryOp::from_token(tok.kind) else {
                self.unscan();
                return Ok(expr);
            };
            let rhs = self.parse_unary_expr()?;
            expr = attach(expr, op, rhs);
        }
    }

    /// Parses an operand: a group, call, variable or literal.
    fn parse_unary_expr(&mut self) -> Result<Expr, ParseError> {
        let tok = self.scan_ignore_whitespace();
        match tok.kind {
            TokenKind::LeftParen => {
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RightParen, ")")?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            TokenKind::Ident => {
                // A call needs "(" directly after the name.
                if self.scan().kind == TokenKind::LeftParen {
                    self.parse_call(tok.lit)
                } else {
                    self.unscan();
                    Ok(Expr::VarRef(tok.lit))
                }
            }
            TokenKind::String => parse_string_literal(tok),
            TokenKind::Number => match tok.lit.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Expr::number(v)),
                _ => Err(ParseError::invalid("unable to parse number", tok.pos)),
            },
            TokenKind::True => Ok(Expr::boolean(true)),
            TokenKind::False => Ok(Expr::boolean(false)),
            TokenKind::DurationVal => parse_duration(&tok.lit)
                .map(Expr::duration)
                .map_err(|err| ParseError::invalid(err.to_string(), tok.pos)),
            _ => Err(unexpected(&tok, &["identifier", "string", "number", "bool"])),
        }
    }

    /// Parses call arguments. The name and "(" have been consumed.
    fn parse_call(&mut self, name: String) -> Result<Expr, ParseError> {
        if self.scan_ignore_whitespace().kind == TokenKind::RightParen {
            return Ok(Expr::call(name, Vec::new()));
        }
        self.unscan();

        let mut args = Vec::new();
        loop {
            args.push(self.parse_expr()?);
            if !self.consume_comma() {
                break;
            }
        }
        self.expect(TokenKind::RightParen, ")")?;

        Ok(Expr::call(name, args))
    }

    /// Requires the input to end here, allowing one trailing `;`.
    pub(crate) fn expect_end_of_statement(&mut self) -> Result<(), ParseError> {
        let tok = self.scan_ignore_whitespace();
        match tok.kind {
            TokenKind::Eof => Ok(()),
            TokenKind::Semicolon => self.expect(TokenKind::Eof, "EOF"),
            _ => Err(unexpected(&tok, &[";", "EOF"])),
        }
    }

    /// Requires the input to end here.
    pub(crate) fn expect_end_of_input(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Eof, "EOF")
    }

    // --- Helper methods ---

    fn scan(&mut self) -> Token {
        self.lexer.scan()
    }

    fn scan_ignore_whitespace(&mut self) -> Token {
        self.lexer.scan_ignore_whitespace()
    }

    fn unscan(&mut self) {
        self.lexer.unscan();
    }

    /// Consumes the next token if it is the given keyword.
    fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        if self.scan_ignore_whitespace().kind.is_keyword(keyword) {
            true
        } else {
            self.unscan();
            false
        }
    }

    /// Consumes the next token if it is a comma.
    fn consume_comma(&mut self) -> bool {
        if self.scan_ignore_whitespace().kind == TokenKind::Comma {
            true
        } else {
            self.unscan();
            false
        }
    }

    /// Expects the next token to be of the given kind.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), ParseError> {
        let tok = self.scan_ignore_whitespace();
        if tok.kind == kind {
            Ok(())
        } else {
            Err(unexpected(&tok, &[expected]))
        }
    }

    /// Expects the next token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        let tok = self.scan_ignore_whitespace();
        if tok.kind.is_keyword(keyword) {
            Ok(())
        } else {
            Err(unexpected(&tok, &[keyword.as_str()]))
        }
    }
}

/// Classifies a quoted literal as a time literal or a plain string.
fn parse_string_literal(tok: Token) -> Result<Expr, ParseError> {
    if date_time_regex().is_match(&tok.lit) {
        // chrono reads second 60 as a leap second; it is not a valid time here.
        let t = NaiveDateTime::parse_from_str(&tok.lit, DATE_TIME_FORMAT)
            .ok()
            .filter(|t| t.nanosecond() < 1_000_000_000)
            .ok_or_else(|| ParseError::invalid("unable to parse datetime", tok.pos))?;
        return Ok(Expr::time(Utc.from_utc_datetime(&t)));
    }

    if date_regex().is_match(&tok.lit) {
        let t = NaiveDate::parse_from_str(&tok.lit, DATE_FORMAT)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| ParseError::invalid("unable to parse date", tok.pos))?;
        return Ok(Expr::time(Utc.from_utc_datetime(&t)));
    }

    Ok(Expr::string(tok.lit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Pos;

    fn parse(s: &str) -> Result<Statement, ParseError> {
        Parser::new(s).parse_statement()
    }

    #[test]
    fn test_simple_select() {
        let stmt = parse("SELECT value FROM cpu").unwrap();
        assert!(matches!(stmt, Statement::Select(_)));
    }

    #[test]
    fn test_select_with_where() {
        let stmt = parse("SELECT * FROM cpu WHERE host = 'a'").unwrap();
        if let Statement::Select(select) = stmt {
            assert!(select.condition.is_some());
        } else {
            panic!("Expected SELECT statement");
        }
    }

    #[test]
    fn test_expression_precedence() {
        // 1 + 2 * 3 should be parsed as 1 + (2 * 3)
        let expr = Parser::new("1 + 2 * 3").parse_expr().unwrap();
        if let Expr::Binary { op, right, .. } = &expr {
            assert_eq!(*op, BinaryOp::Add);
            assert!(matches!(
                right.as_ref(),
                Expr::Binary {
                    op: BinaryOp::Mul,
                    ..
                }
            ));
        } else {
            panic!("Expected binary expression");
        }
    }

    #[test]
    fn test_parse_statement_leaves_trailing_input() {
        let mut parser = Parser::new("LIST DATABASES; LIST SERIES");
        assert_eq!(parser.parse_statement().unwrap(), Statement::ListDatabases);
        assert!(parser.expect_end_of_statement().is_err());
    }

    #[test]
    fn test_unknown_statement() {
        let err = parse("blah blah").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unexpected {
                found: "blah".into(),
                expected: vec!["SELECT".into()],
                pos: Pos::new(0, 0),
            }
        );
    }

    #[test]
    fn test_string_literal_classification() {
        let tok = Token::new(TokenKind::String, Pos::default(), "2000-01-01");
        assert!(matches!(
            parse_string_literal(tok),
            Ok(Expr::Literal(crate::ast::Literal::Time(_)))
        ));

        let tok = Token::new(TokenKind::String, Pos::default(), "hello");
        assert_eq!(parse_string_literal(tok), Ok(Expr::string("hello")));
    }

    #[test]
    fn test_regexes() {
        assert!(date_regex().is_match("2000-01-01"));
        assert!(!date_regex().is_match("2000-01-01 00:00:00"));
        assert!(date_time_regex().is_match("2000-01-01 00:00:00"));
        assert!(date_time_regex().is_match("2000-01-01 00:00:00.123"));
        assert!(!date_time_regex().is_match("2000-01-01T00:00:00"));
    }
}
