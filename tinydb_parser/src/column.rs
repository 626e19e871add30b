//! Column type and size grammar used by `create table`.
//!
//! A column spec is either `int` or `varchar(N)`. Type and size are parsed
//! independently: `varchar(0)` has a type but no valid size.

use crate::StatementError;
use tinydb_schema::{Column, ColumnType, INTEGER_SIZE};

const INT: &str = "int";
const VARCHAR: &str = "varchar";

/// Returns the text between the parentheses of `varchar(...)`.
fn varchar_argument(spec: &str) -> Option<&str> {
    spec.strip_prefix(VARCHAR)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Parse the size in bytes declared by a column spec.
///
/// `int` is always 4 bytes; `varchar(N)` yields `N` when it is a positive
/// decimal number. Anything else yields `None`.
pub fn parse_column_size(spec: &str) -> Option<u32> {
    if spec == INT {
        return Some(INTEGER_SIZE);
    }
    let digits = varchar_argument(spec)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

/// Parse the column type named by a column spec.
pub fn parse_column_type(spec: &str) -> Option<ColumnType> {
    if spec == INT {
        return Some(ColumnType::Integer);
    }
    varchar_argument(spec).map(|_| ColumnType::String)
}

/// Build a column from its label and spec; both grammars must accept `spec`.
pub fn parse_column(label: &str, spec: &str) -> Result<Column, StatementError> {
    match (parse_column_type(spec), parse_column_size(spec)) {
        (Some(column_type), Some(size)) => Ok(Column::new(label, column_type, size)),
        _ => Err(StatementError::InvalidColumnSpec {
            label: label.to_string(),
            spec: spec.to_string(),
        }),
    }
}
