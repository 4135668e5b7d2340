//! Abstract Syntax Tree (AST) types for queries.
//!
//! Every node implements `Display`, rendering text that parses back to an
//! equal node.

mod expression;
mod statement;
mod types;

pub(crate) use expression::DATE_TIME_FORMAT;
pub use expression::{BinaryOp, Call, Expr, Literal};
pub use statement::{
    AlterRetentionPolicyStatement, CreateContinuousQueryStatement, CreateRetentionPolicyStatement,
    DeleteStatement, ListFromStatement, ListStatement, PrivilegeStatement, Query, SelectStatement,
    Statement,
};
pub use types::{Dimension, Field, Measurement, Privilege, SortField, Source, Target};
