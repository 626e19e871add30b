use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Size in bytes of an `int` column.
pub const INTEGER_SIZE: u32 = 4;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// 32-bit integer, always [`INTEGER_SIZE`] bytes.
    Integer,
    /// Variable length string with an explicit maximum size.
    String,
}

/// A labelled, typed and sized field of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColumnDef")]
pub struct Column {
    label: String,
    #[serde(rename = "type")]
    column_type: ColumnType,
    size: u32,
}

impl Column {
    /// Create a column definition.
    pub fn new(label: impl Into<String>, column_type: ColumnType, size: u32) -> Self {
        Self {
            label: label.into(),
            column_type,
            size,
        }
    }

    /// Column label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column type.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Size in bytes.
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Named, ordered collection of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableDef")]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, rejecting repeated column labels.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !seen.insert(col.label()) {
                return Err(SchemaError::DuplicateColumn(col.label().to_string()));
            }
        }
        Ok(Self {
            name: name.into(),
            columns,
        })
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Find a column by label.
    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label() == label)
    }

    /// Width of one row: the sum of all column sizes.
    pub fn row_size(&self) -> u64 {
        self.columns.iter().map(|c| u64::from(c.size())).sum()
    }
}

/// Serialized column, checked on the way in.
#[derive(Deserialize)]
struct ColumnDef {
    label: String,
    #[serde(rename = "type")]
    column_type: ColumnType,
    size: u32,
}

impl TryFrom<ColumnDef> for Column {
    type Error = SchemaError;

    fn try_from(def: ColumnDef) -> Result<Self, Self::Error> {
        let valid = match def.column_type {
            ColumnType::Integer => def.size == INTEGER_SIZE,
            ColumnType::String => def.size > 0,
        };
        if !valid || def.label.is_empty() {
            return Err(SchemaError::InvalidColumn(def.label));
        }
        Ok(Column::new(def.label, def.column_type, def.size))
    }
}

/// Serialized table, rebuilt through [`Table::new`].
#[derive(Deserialize)]
struct TableDef {
    name: String,
    columns: Vec<Column>,
}

impl TryFrom<TableDef> for Table {
    type Error = SchemaError;

    fn try_from(def: TableDef) -> Result<Self, Self::Error> {
        Table::new(def.name, def.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_labels_rejected() {
        let err = Table::new(
            "people",
            vec![
                Column::new("name", ColumnType::String, 32),
                Column::new("name", ColumnType::String, 32),
            ],
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn("name".into()));
    }

    #[test]
    fn labels_compare_case_sensitively() {
        let table = Table::new(
            "people",
            vec![
                Column::new("name", ColumnType::String, 32),
                Column::new("Name", ColumnType::String, 32),
            ],
        );
        assert!(table.is_ok());
    }

    #[test]
    fn deserialize_checks_columns() {
        let dup = r#"{"name":"t","columns":[
            {"label":"a","type":"Integer","size":4},
            {"label":"a","type":"Integer","size":4}]}"#;
        assert!(serde_json::from_str::<Table>(dup).is_err());

        let bad_size = r#"{"label":"id","type":"Integer","size":8}"#;
        assert!(serde_json::from_str::<Column>(bad_size).is_err());
        let zero = r#"{"label":"name","type":"String","size":0}"#;
        assert!(serde_json::from_str::<Column>(zero).is_err());

        let ok = r#"{"label":"name","type":"String","size":32}"#;
        let col: Column = serde_json::from_str(ok).unwrap();
        assert_eq!(col, Column::new("name", ColumnType::String, 32));
    }

    #[test]
    fn column_lookup_and_row_size() {
        let table = Table::new(
            "people",
            vec![
                Column::new("id", ColumnType::Integer, INTEGER_SIZE),
                Column::new("email", ColumnType::String, 256),
            ],
        )
        .unwrap();
        assert_eq!(table.column("email").map(Column::size), Some(256));
        assert!(table.column("missing").is_none());
        assert_eq!(table.row_size(), 260);
    }
}
