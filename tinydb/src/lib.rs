#![deny(missing_docs)]
#![doc = "TinyDB core library: a session tying the statement parser to one schema."]

pub use tinydb_parser::{
    parse_column_size, parse_column_type, validate, Statement, StatementError, StatementType,
};
pub use tinydb_schema::{Column, ColumnType, Schema, SchemaError, Table};

use tracing::trace;

/// One user session: a schema plus the statements accepted so far.
///
/// # Examples
///
/// ```
/// let mut session = tinydb::Session::new();
/// session.execute("create table people id int name varchar(32)").unwrap();
/// let stmt = session.execute("select name from people").unwrap();
/// assert_eq!(stmt.values(), ["name"]);
/// assert!(session.execute("select * from ghosts").is_err());
/// ```
#[derive(Debug, Default)]
pub struct Session {
    schema: Schema,
    history: Vec<Statement>,
}

impl Session {
    /// Start a session with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `line` and validate it against the session schema.
    ///
    /// Accepted statements are appended to [`Session::history`].
    pub fn execute(&mut self, line: &str) -> Result<Statement, StatementError> {
        let stmt = Statement::new(line, &mut self.schema);
        validate(&stmt, &self.schema)?;
        trace!(statement_type = %stmt.statement_type(), "accepted statement");
        self.history.push(stmt.clone());
        Ok(stmt)
    }

    /// Tables defined in this session.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Statements accepted so far, oldest first.
    pub fn history(&self) -> &[Statement] {
        &self.history
    }
}
