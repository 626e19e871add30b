//! In-memory schema registry for TinyDB.
#![deny(missing_docs)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

mod table;

pub use table::{Column, ColumnType, Table, INTEGER_SIZE};

/// Errors raised while building tables or registering them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A table with this name is already registered.
    #[error("table '{0}' already exists")]
    DuplicateTable(String),
    /// Two columns of one table share a label.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
    /// Column with an empty label or a size its type does not allow.
    #[error("invalid column '{0}'")]
    InvalidColumn(String),
}

/// Registry of table definitions keyed by name.
///
/// Tables are only ever added; [`Schema::table_names`] reports them in the
/// order they were registered.
/// Serialized as the list of tables in registration order; deserializing
/// re-registers each one, so duplicate names are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Table>", into = "Vec<Table>")]
pub struct Schema {
    tables: HashMap<String, Table>,
    order: Vec<String>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a table by its exact name.
    pub fn find_table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Names of all registered tables, oldest first.
    pub fn table_names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Iterate tables in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.order.iter().filter_map(|name| self.tables.get(name))
    }

    /// Register a new table. Fails if the name is taken.
    pub fn insert_table(&mut self, table: Table) -> Result<(), SchemaError> {
        if self.tables.contains_key(table.name()) {
            return Err(SchemaError::DuplicateTable(table.name().to_string()));
        }
        debug!(table = table.name(), columns = table.columns().len(), "registering table");
        self.order.push(table.name().to_string());
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` when no table has been registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl TryFrom<Vec<Table>> for Schema {
    type Error = SchemaError;

    fn try_from(tables: Vec<Table>) -> Result<Self, Self::Error> {
        let mut schema = Schema::new();
        for table in tables {
            schema.insert_table(table)?;
        }
        Ok(schema)
    }
}

impl From<Schema> for Vec<Table> {
    fn from(mut schema: Schema) -> Self {
        schema
            .order
            .iter()
            .filter_map(|name| schema.tables.remove(name))
            .collect()
    }
}
