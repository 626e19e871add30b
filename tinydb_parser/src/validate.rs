//! Checks a parsed statement against the tables registered in a schema.

use crate::{Statement, StatementError, StatementType};
use std::collections::HashSet;
use tinydb_schema::{Column, ColumnType, Schema, Table};

/// Validate `stmt` against `schema`.
///
/// A statement that already failed to parse returns its own error. `select`
/// and `insert` must name an existing table and existing columns; `insert`
/// targets must be distinct and values must fit their target column.
pub fn validate(stmt: &Statement, schema: &Schema) -> Result<(), StatementError> {
    if let Some(err) = stmt.error() {
        return Err(err.clone());
    }
    match stmt.statement_type() {
        StatementType::Select => {
            let table = lookup_table(stmt, schema)?;
            for name in stmt.values() {
                lookup_column(table, name)?;
            }
            Ok(())
        }
        StatementType::Insert => {
            let table = lookup_table(stmt, schema)?;
            let mut seen = HashSet::with_capacity(stmt.columns().len());
            if let Some(repeated) = stmt.columns().iter().find(|name| !seen.insert(*name)) {
                return Err(StatementError::DuplicateTarget(repeated.clone()));
            }
            let targets = if stmt.columns().is_empty() {
                table.columns().iter().collect()
            } else {
                stmt.columns()
                    .iter()
                    .map(|name| lookup_column(table, name))
                    .collect::<Result<Vec<_>, _>>()?
            };
            if targets.len() != stmt.values().len() {
                return Err(StatementError::ValueCountMismatch {
                    expected: targets.len(),
                    found: stmt.values().len(),
                });
            }
            for (column, value) in targets.into_iter().zip(stmt.values()) {
                if !value_fits(column, value) {
                    return Err(StatementError::ValueOutOfRange {
                        value: value.clone(),
                        column: column.label().to_string(),
                    });
                }
            }
            Ok(())
        }
        StatementType::Create | StatementType::Invalid => Ok(()),
    }
}

fn lookup_table<'s>(stmt: &Statement, schema: &'s Schema) -> Result<&'s Table, StatementError> {
    let name = stmt.table_name().unwrap_or_default();
    schema
        .find_table_by_name(name)
        .ok_or_else(|| StatementError::UnknownTable(name.to_string()))
}

fn lookup_column<'t>(table: &'t Table, name: &str) -> Result<&'t Column, StatementError> {
    table
        .column(name)
        .ok_or_else(|| StatementError::UnknownColumn(name.to_string()))
}

fn value_fits(column: &Column, value: &str) -> bool {
    match column.column_type() {
        ColumnType::Integer => value.parse::<i32>().is_ok(),
        ColumnType::String => value.len() <= column.size() as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Schema {
        let mut s = Schema::new();
        let stmt = Statement::new("create table people id int name varchar(4)", &mut s);
        assert!(stmt.is_ok());
        s
    }

    fn check(raw: &str, schema: &mut Schema) -> Result<(), String> {
        let stmt = Statement::new(raw, schema);
        validate(&stmt, schema).map_err(|e| e.to_string())
    }

    #[test]
    fn select_against_schema() {
        let mut s = people();
        assert_eq!(check("select * from people", &mut s), Ok(()));
        assert_eq!(check("select id name from people", &mut s), Ok(()));
        assert_eq!(
            check("select * from ghosts", &mut s),
            Err("no such table: ghosts".into())
        );
        assert_eq!(
            check("select id age from people", &mut s),
            Err("no such column: age".into())
        );
    }

    #[test]
    fn insert_against_schema() {
        let mut s = people();
        assert_eq!(check("insert into people values 1 bob", &mut s), Ok(()));
        assert_eq!(check("insert into people name id values bob 7", &mut s), Ok(()));
        assert_eq!(
            check("insert into people values 1", &mut s),
            Err("expected 2 values but got 1".into())
        );
        assert_eq!(
            check("insert into people values one bob", &mut s),
            Err("value 'one' does not fit column 'id'".into())
        );
        assert_eq!(
            check("insert into people id name values 1 bobby", &mut s),
            Err("value 'bobby' does not fit column 'name'".into())
        );
        assert_eq!(
            check("insert into people id id values 1 2", &mut s),
            Err("column 'id' listed more than once".into())
        );
        assert_eq!(
            check("insert into people age values 3", &mut s),
            Err("no such column: age".into())
        );
    }

    #[test]
    fn parse_errors_pass_through() {
        let mut s = people();
        assert_eq!(check("", &mut s), Err("empty query".into()));
        assert_eq!(
            check("create table people id int", &mut s),
            Err("table 'people' already exists".into())
        );
    }
}
