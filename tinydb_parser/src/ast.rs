use crate::StatementError;
use serde::{Serialize, Serializer};
use std::fmt;

/// Classification of a parsed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementType {
    /// Input could not be classified.
    Invalid,
    /// `create table ...`.
    Create,
    /// `insert into ...`.
    Insert,
    /// `select ... from ...`.
    Select,
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementType::Invalid => "INVALID",
            StatementType::Create => "CREATE",
            StatementType::Insert => "INSERT",
            StatementType::Select => "SELECT",
        };
        f.write_str(name)
    }
}

/// One parsed input line.
///
/// The statement type and the error are independent: a `create` with
/// duplicate column labels is still a [`StatementType::Create`] and carries
/// an error at the same time.
///
/// Field meaning per type:
///
/// | type     | `columns`              | `values`                 |
/// |----------|------------------------|--------------------------|
/// | `Select` | empty                  | projected column names   |
/// | `Insert` | target columns, if any | literal values           |
/// | `Create` | declared labels        | declared type specs      |
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub(crate) statement_type: StatementType,
    pub(crate) table_name: Option<String>,
    pub(crate) columns: Vec<String>,
    pub(crate) values: Vec<String>,
    pub(crate) has_wildcard: bool,
    #[serde(serialize_with = "error_message")]
    pub(crate) error: Option<StatementError>,
}

fn error_message<S: Serializer>(error: &Option<StatementError>, s: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(err) => s.serialize_some(&err.to_string()),
        None => s.serialize_none(),
    }
}

impl Statement {
    pub(crate) fn empty(statement_type: StatementType) -> Self {
        Self {
            statement_type,
            table_name: None,
            columns: Vec::new(),
            values: Vec::new(),
            has_wildcard: false,
            error: None,
        }
    }

    pub(crate) fn failed(statement_type: StatementType, error: StatementError) -> Self {
        Self {
            error: Some(error),
            ..Self::empty(statement_type)
        }
    }

    /// Statement classification.
    pub fn statement_type(&self) -> StatementType {
        self.statement_type
    }

    /// Error recorded while parsing, if any.
    pub fn error(&self) -> Option<&StatementError> {
        self.error.as_ref()
    }

    /// `true` when parsing produced no error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Target table.
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Column names; see the type-level table for their meaning.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values; see the type-level table for their meaning.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// `true` for `select * ...`.
    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }
}
