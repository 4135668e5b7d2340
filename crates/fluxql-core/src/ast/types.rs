//! Clause-level AST types shared by several statements.

use core::fmt;

use super::expression::Expr;
use crate::quote::{format_ident, quote};

/// A selected field with an optional alias.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Field {
    /// The field expression.
    pub expr: Expr,
    /// Optional alias (AS name).
    pub alias: Option<String>,
}

impl Field {
    /// Creates a field without an alias.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Returns the field that selects everything.
    #[must_use]
    pub const fn wildcard() -> Self {
        Self::new(Expr::Wildcard)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", format_ident(alias))?;
        }
        Ok(())
    }
}

/// A GROUP BY dimension.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dimension {
    /// The grouping expression.
    pub expr: Expr,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

/// An ORDER BY entry.
///
/// A bare `ASC` or `DESC` has no name and orders by the default key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortField {
    /// The field to order by.
    pub name: Option<String>,
    /// True for ascending order.
    pub ascending: bool,
}

impl SortField {
    /// Creates an ascending sort on a named field.
    #[must_use]
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ascending: true,
        }
    }

    /// Creates a descending sort on a named field.
    #[must_use]
    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ascending: false,
        }
    }

    /// Creates a sort on the default key.
    #[must_use]
    pub const fn direction(ascending: bool) -> Self {
        Self {
            name: None,
            ascending,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{} ", format_ident(name))?;
        }
        f.write_str(if self.ascending { "ASC" } else { "DESC" })
    }
}

/// The destination of a SELECT ... INTO.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Target {
    /// Retention policy the measurement is written under.
    pub retention_policy: Option<String>,
    /// Measurement to write into.
    pub measurement: String,
    /// Database to write into.
    pub database: Option<String>,
}

impl Target {
    /// Creates a target writing into a measurement.
    #[must_use]
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            retention_policy: None,
            measurement: measurement.into(),
            database: None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bare identifiers absorb dots, so a qualified name needs the quoted form.
        if let Some(rp) = &self.retention_policy {
            write!(f, "{}.{}", quote(rp), quote(&self.measurement))?;
        } else {
            f.write_str(&format_ident(&self.measurement))?;
        }
        if let Some(db) = &self.database {
            write!(f, " ON {}", format_ident(db))?;
        }
        Ok(())
    }
}

/// A named measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Measurement {
    /// The measurement name.
    pub name: String,
}

impl Measurement {
    /// Creates a measurement reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_ident(&self.name))
    }
}

/// Where a statement reads its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Source {
    /// A single measurement.
    Measurement(Measurement),
    /// `join(a, b, ...)`
    Join(Vec<Measurement>),
    /// `merge(a, b, ...)`
    Merge(Vec<Measurement>),
}

impl Source {
    /// Creates a single-measurement source.
    #[must_use]
    pub fn measurement(name: impl Into<String>) -> Self {
        Self::Measurement(Measurement::new(name))
    }
}

fn write_measurements(f: &mut fmt::Formatter<'_>, measurements: &[Measurement]) -> fmt::Result {
    for (i, m) in measurements.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{m}")?;
    }
    Ok(())
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measurement(m) => write!(f, "{m}"),
            Self::Join(ms) => {
                f.write_str("join(")?;
                write_measurements(f, ms)?;
                f.write_str(")")
            }
            Self::Merge(ms) => {
                f.write_str("merge(")?;
                write_measurements(f, ms)?;
                f.write_str(")")
            }
        }
    }
}

/// A privilege named by GRANT or REVOKE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Privilege {
    /// READ
    Read,
    /// WRITE
    Write,
    /// ALL [PRIVILEGES]
    All,
}

impl Privilege {
    /// Returns the query-language spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::All => "ALL PRIVILEGES",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
