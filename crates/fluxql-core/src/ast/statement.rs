//! Statement AST types.

use core::fmt;
use std::time::Duration;

use super::expression::Expr;
use super::types::{Dimension, Field, Privilege, SortField, Source, Target};
use crate::duration::format_duration_literal;
use crate::quote::format_ident;

/// Writes `items` separated by `", "`.
fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Writes the optional WHERE, ORDER BY and LIMIT clauses.
fn write_filter(
    f: &mut fmt::Formatter<'_>,
    condition: Option<&Expr>,
    sort_fields: &[SortField],
    limit: Option<usize>,
) -> fmt::Result {
    if let Some(condition) = condition {
        write!(f, " WHERE {condition}")?;
    }
    if !sort_fields.is_empty() {
        f.write_str(" ORDER BY ")?;
        write_list(f, sort_fields)?;
    }
    if let Some(limit) = limit {
        write!(f, " LIMIT {limit}")?;
    }
    Ok(())
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectStatement {
    /// Selected fields.
    pub fields: Vec<Field>,
    /// INTO target.
    pub target: Option<Target>,
    /// FROM source.
    pub source: Source,
    /// WHERE condition.
    pub condition: Option<Expr>,
    /// GROUP BY dimensions.
    pub dimensions: Vec<Dimension>,
    /// ORDER BY fields.
    pub sort_fields: Vec<SortField>,
    /// LIMIT, always greater than zero when present.
    pub limit: Option<usize>,
}

impl SelectStatement {
    /// Creates a SELECT of `fields` from `source` with no other clauses.
    #[must_use]
    pub const fn new(fields: Vec<Field>, source: Source) -> Self {
        Self {
            fields,
            target: None,
            source,
            condition: None,
            dimensions: Vec::new(),
            sort_fields: Vec::new(),
            limit: None,
        }
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        write_list(f, &self.fields)?;
        if let Some(target) = &self.target {
            write!(f, " INTO {target}")?;
        }
        write!(f, " FROM {}", self.source)?;
        if let Some(condition) = &self.condition {
            write!(f, " WHERE {condition}")?;
        }
        if !self.dimensions.is_empty() {
            f.write_str(" GROUP BY ")?;
            write_list(f, &self.dimensions)?;
        }
        write_filter(f, None, &self.sort_fields, self.limit)
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeleteStatement {
    /// FROM source.
    pub source: Source,
    /// WHERE condition.
    pub condition: Option<Expr>,
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.source)?;
        write_filter(f, self.condition.as_ref(), &[], None)
    }
}

/// The filter shared by LIST SERIES and LIST MEASUREMENTS.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListStatement {
    /// WHERE condition.
    pub condition: Option<Expr>,
    /// ORDER BY fields.
    pub sort_fields: Vec<SortField>,
    /// LIMIT.
    pub limit: Option<usize>,
}

impl fmt::Display for ListStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_filter(f, self.condition.as_ref(), &self.sort_fields, self.limit)
    }
}

/// The body shared by LIST TAG KEYS/VALUES and LIST FIELD KEYS/VALUES.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListFromStatement {
    /// FROM source.
    pub source: Source,
    /// WHERE condition.
    pub condition: Option<Expr>,
    /// ORDER BY fields.
    pub sort_fields: Vec<SortField>,
    /// LIMIT.
    pub limit: Option<usize>,
}

impl fmt::Display for ListFromStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " FROM {}", self.source)?;
        write_filter(f, self.condition.as_ref(), &self.sort_fields, self.limit)
    }
}

/// A CREATE CONTINUOUS QUERY statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateContinuousQueryStatement {
    /// Query name.
    pub name: String,
    /// Database the query runs on.
    pub database: String,
    /// The query to run; its target is always set.
    pub source: SelectStatement,
}

impl fmt::Display for CreateContinuousQueryStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE CONTINUOUS QUERY {} ON {} BEGIN {} END",
            format_ident(&self.name),
            format_ident(&self.database),
            self.source
        )
    }
}

/// A CREATE RETENTION POLICY statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateRetentionPolicyStatement {
    /// Policy name.
    pub name: String,
    /// Database the policy belongs to.
    pub database: String,
    /// How long data is kept.
    pub duration: Duration,
    /// Replication factor.
    pub replication: u32,
    /// Whether this becomes the database's default policy.
    pub default: bool,
}

impl fmt::Display for CreateRetentionPolicyStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE RETENTION POLICY {} ON {} DURATION {} REPLICATION {}",
            format_ident(&self.name),
            format_ident(&self.database),
            format_duration_literal(self.duration),
            self.replication
        )?;
        if self.default {
            f.write_str(" DEFAULT")?;
        }
        Ok(())
    }
}

/// An ALTER RETENTION POLICY statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterRetentionPolicyStatement {
    /// Policy name.
    pub name: String,
    /// Database the policy belongs to.
    pub database: String,
    /// New duration, if changed.
    pub duration: Option<Duration>,
    /// New replication factor, if changed.
    pub replication: Option<u32>,
    /// Whether the policy becomes the database's default.
    pub default: bool,
}

impl fmt::Display for AlterRetentionPolicyStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ALTER RETENTION POLICY {} ON {}",
            format_ident(&self.name),
            format_ident(&self.database)
        )?;
        if let Some(duration) = self.duration {
            write!(f, " DURATION {}", format_duration_literal(duration))?;
        }
        if let Some(replication) = self.replication {
            write!(f, " REPLICATION {replication}")?;
        }
        if self.default {
            f.write_str(" DEFAULT")?;
        }
        Ok(())
    }
}

/// The body of GRANT and REVOKE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrivilegeStatement {
    /// The privilege granted or revoked.
    pub privilege: Privilege,
    /// The object the privilege applies to; `None` means cluster-wide.
    pub on: Option<String>,
    /// The user receiving or losing the privilege.
    pub user: String,
}

impl PrivilegeStatement {
    fn write(&self, f: &mut fmt::Formatter<'_>, verb: &str, preposition: &str) -> fmt::Result {
        write!(f, "{verb} {}", self.privilege)?;
        if let Some(on) = &self.on {
            write!(f, " ON {}", format_ident(on))?;
        }
        write!(f, " {preposition} {}", format_ident(&self.user))
    }
}

/// A parsed statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    /// SELECT
    Select(SelectStatement),
    /// DELETE FROM
    Delete(DeleteStatement),
    /// LIST SERIES
    ListSeries(ListStatement),
    /// LIST MEASUREMENTS
    ListMeasurements(ListStatement),
    /// LIST TAG KEYS
    ListTagKeys(ListFromStatement),
    /// LIST TAG VALUES
    ListTagValues(ListFromStatement),
    /// LIST FIELD KEYS
    ListFieldKeys(ListFromStatement),
    /// LIST FIELD VALUES
    ListFieldValues(ListFromStatement),
    /// LIST DATABASES
    ListDatabases,
    /// LIST CONTINUOUS QUERIES
    ListContinuousQueries,
    /// DROP SERIES
    DropSeries {
        /// Series name.
        name: String,
    },
    /// DROP CONTINUOUS QUERY
    DropContinuousQuery {
        /// Query name.
        name: String,
    },
    /// DROP DATABASE
    DropDatabase {
        /// Database name.
        name: String,
    },
    /// DROP USER
    DropUser {
        /// User name.
        name: String,
    },
    /// CREATE DATABASE
    CreateDatabase {
        /// Database name.
        name: String,
    },
    /// CREATE USER ... WITH PASSWORD
    CreateUser {
        /// User name.
        name: String,
        /// Initial password.
        password: String,
    },
    /// CREATE CONTINUOUS QUERY
    CreateContinuousQuery(CreateContinuousQueryStatement),
    /// CREATE RETENTION POLICY
    CreateRetentionPolicy(CreateRetentionPolicyStatement),
    /// ALTER RETENTION POLICY
    AlterRetentionPolicy(AlterRetentionPolicyStatement),
    /// GRANT
    Grant(PrivilegeStatement),
    /// REVOKE
    Revoke(PrivilegeStatement),
}

impl Statement {
    /// Returns the leading keywords that identify the statement form.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Delete(_) => "DELETE",
            Self::ListSeries(_) => "LIST SERIES",
            Self::ListMeasurements(_) => "LIST MEASUREMENTS",
            Self::ListTagKeys(_) => "LIST TAG KEYS",
            Self::ListTagValues(_) => "LIST TAG VALUES",
            Self::ListFieldKeys(_) => "LIST FIELD KEYS",
            Self::ListFieldValues(_) => "LIST FIELD VALUES",
            Self::ListDatabases => "LIST DATABASES",
            Self::ListContinuousQueries => "LIST CONTINUOUS QUERIES",
            Self::DropSeries { .. } => "DROP SERIES",
            Self::DropContinuousQuery { .. } => "DROP CONTINUOUS QUERY",
            Self::DropDatabase { .. } => "DROP DATABASE",
            Self::DropUser { .. } => "DROP USER",
            Self::CreateDatabase { .. } => "CREATE DATABASE",
            Self::CreateUser { .. } => "CREATE USER",
            Self::CreateContinuousQuery(_) => "CREATE CONTINUOUS QUERY",
            Self::CreateRetentionPolicy(_) => "CREATE RETENTION POLICY",
            Self::AlterRetentionPolicy(_) => "ALTER RETENTION POLICY",
            Self::Grant(_) => "GRANT",
            Self::Revoke(_) => "REVOKE",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Delete(s) => write!(f, "{s}"),
            Self::ListSeries(s) | Self::ListMeasurements(s) => write!(f, "{}{s}", self.kind()),
            Self::ListTagKeys(s)
            | Self::ListTagValues(s)
            | Self::ListFieldKeys(s)
            | Self::ListFieldValues(s) => write!(f, "{}{s}", self.kind()),
            Self::ListDatabases | Self::ListContinuousQueries => f.write_str(self.kind()),
            Self::DropSeries { name }
            | Self::DropContinuousQuery { name }
            | Self::DropDatabase { name }
            | Self::DropUser { name }
            | Self::CreateDatabase { name } => {
                write!(f, "{} {}", self.kind(), format_ident(name))
            }
            Self::CreateUser { name, password } => write!(
                f,
                "CREATE USER {} WITH PASSWORD {}",
                format_ident(name),
                format_ident(password)
            ),
            Self::CreateContinuousQuery(s) => write!(f, "{s}"),
            Self::CreateRetentionPolicy(s) => write!(f, "{s}"),
            Self::AlterRetentionPolicy(s) => write!(f, "{s}"),
            Self::Grant(s) => s.write(f, "GRANT", "TO"),
            Self::Revoke(s) => s.write(f, "REVOKE", "FROM"),
        }
    }
}

/// An ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Query {
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

impl Query {
    /// Returns the number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if the query has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str(";\n")?;
            }
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}
