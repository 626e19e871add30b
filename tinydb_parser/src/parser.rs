//! Statement dispatch and the per-statement parsing routines.

use crate::ast::{Statement, StatementType};
use crate::column::parse_column;
use crate::token::{tokenize, Token, Word};
use thiserror::Error;
use tinydb_schema::{Schema, SchemaError, Table};
use tracing::{debug, info, warn};

/// Why a statement could not be parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// Input was empty or only whitespace.
    #[error("empty query")]
    EmptyQuery,
    /// First word is not a known statement keyword.
    #[error("bad starter identifier")]
    BadStarterIdentifier,
    /// `select` with the wrong shape.
    #[error("invalid select statement: {0}")]
    MalformedSelect(Malformed),
    /// `insert` with the wrong shape.
    #[error("invalid insert statement: {0}")]
    MalformedInsert(Malformed),
    /// `create` with the wrong shape.
    #[error("invalid create statement: {0}")]
    MalformedCreate(Malformed),
    /// Two columns of one `create` share a label.
    #[error("duplicate column names")]
    DuplicateColumnNames,
    /// Column spec rejected by the type or size grammar.
    #[error("invalid column spec for '{label}': '{spec}'")]
    InvalidColumnSpec {
        /// Column label.
        label: String,
        /// Offending spec text.
        spec: String,
    },
    /// `create` for a table that already exists.
    #[error("table '{0}' already exists")]
    DuplicateTable(String),
    /// Referenced table is not in the schema.
    #[error("no such table: {0}")]
    UnknownTable(String),
    /// `insert` names the same target column twice.
    #[error("column '{0}' listed more than once")]
    DuplicateTarget(String),
    /// Referenced column is not in the table.
    #[error("no such column: {0}")]
    UnknownColumn(String),
    /// `insert` value count differs from the number of target columns.
    #[error("expected {expected} values but got {found}")]
    ValueCountMismatch {
        /// Number of target columns.
        expected: usize,
        /// Number of supplied values.
        found: usize,
    },
    /// `insert` value does not fit its column type or size.
    #[error("value '{value}' does not fit column '{column}'")]
    ValueOutOfRange {
        /// Supplied value.
        value: String,
        /// Target column label.
        column: String,
    },
}

/// Shape problems shared by the statement routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    /// Fewer words than the shortest valid form.
    #[error("expecting at least {0} parts")]
    TooShort(usize),
    /// Required keyword is absent.
    #[error("expecting '{0}'")]
    MissingKeyword(&'static str),
    /// Nothing follows `from`.
    #[error("missing table name")]
    MissingTable,
    /// A keyword or `*` used where a name is required.
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),
    /// `select from ...`.
    #[error("expecting at least one column")]
    NoColumns,
    /// Nothing follows `values`.
    #[error("expecting at least one value")]
    NoValues,
    /// `*` together with named columns.
    #[error("wildcard cannot be combined with column names")]
    MixedWildcard,
    /// Words after the table name of a `select`.
    #[error("unexpected trailing tokens")]
    TrailingTokens,
    /// Odd word at the end of a column definition list.
    #[error("column '{0}' has no type")]
    MissingType(String),
    /// Explicit column list and value list differ in length.
    #[error("{columns} columns but {values} values")]
    CountMismatch {
        /// Listed columns.
        columns: usize,
        /// Listed values.
        values: usize,
    },
}

impl From<SchemaError> for StatementError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::DuplicateTable(name) => StatementError::DuplicateTable(name),
            SchemaError::DuplicateColumn(_) => StatementError::DuplicateColumnNames,
            SchemaError::InvalidColumn(label) => StatementError::InvalidColumnSpec {
                label,
                spec: String::new(),
            },
        }
    }
}

const SELECT_MIN_PARTS: usize = 4;
const INSERT_MIN_PARTS: usize = 5;
const CREATE_MIN_PARTS: usize = 5;

impl Statement {
    /// Parse one input line.
    ///
    /// Never fails outright: problems are reported through
    /// [`Statement::error`]. A valid `create table` registers the new table
    /// in `schema`; nothing else mutates it.
    pub fn new(raw: &str, schema: &mut Schema) -> Self {
        if raw.trim().is_empty() {
            return Statement::failed(StatementType::Invalid, StatementError::EmptyQuery);
        }
        let words = tokenize(raw);
        let Some(first) = words.first() else {
            return Statement::failed(StatementType::Invalid, StatementError::EmptyQuery);
        };

        let (statement_type, parsed) = match first.kind {
            Token::Select => (StatementType::Select, parse_select(&words)),
            Token::Insert => (StatementType::Insert, parse_insert(&words)),
            Token::Create => (StatementType::Create, parse_create(&words, schema)),
            _ => (StatementType::Invalid, Err(StatementError::BadStarterIdentifier)),
        };
        debug!(%statement_type, words = words.len(), "dispatched statement");

        parsed.unwrap_or_else(|err| {
            warn!(%statement_type, error = %err, "rejected statement");
            Statement::failed(statement_type, err)
        })
    }
}

fn texts(words: &[Word<'_>]) -> Vec<String> {
    words.iter().map(|w| w.text.to_string()).collect()
}

fn identifier<'a>(word: &Word<'a>) -> Result<&'a str, Malformed> {
    match word.kind {
        Token::Word => Ok(word.text),
        _ => Err(Malformed::InvalidIdentifier(word.text.to_string())),
    }
}

fn identifiers(words: &[Word<'_>]) -> Result<Vec<String>, Malformed> {
    words
        .iter()
        .map(|w| identifier(w).map(str::to_string))
        .collect()
}

/// `select (* | <col>...) from <table>`
fn parse_select(words: &[Word<'_>]) -> Result<Statement, StatementError> {
    select_parts(words).map_err(StatementError::MalformedSelect)
}

fn select_parts(words: &[Word<'_>]) -> Result<Statement, Malformed> {
    if words.len() < SELECT_MIN_PARTS {
        return Err(Malformed::TooShort(SELECT_MIN_PARTS));
    }
    let from = words
        .iter()
        .position(|w| w.kind == Token::From)
        .ok_or(Malformed::MissingKeyword("from"))?;

    let projection = &words[1..from];
    let has_wildcard = match projection {
        [] => return Err(Malformed::NoColumns),
        [only] => only.kind == Token::Star,
        many if many.iter().any(|w| w.kind == Token::Star) => {
            return Err(Malformed::MixedWildcard)
        }
        _ => false,
    };

    let table = words.get(from + 1).ok_or(Malformed::MissingTable)?;
    let table = identifier(table)?;
    if words.len() > from + 2 {
        return Err(Malformed::TrailingTokens);
    }

    let mut stmt = Statement::empty(StatementType::Select);
    stmt.table_name = Some(table.to_string());
    stmt.has_wildcard = has_wildcard;
    if !has_wildcard {
        stmt.values = identifiers(projection)?;
    }
    Ok(stmt)
}

/// `insert into <table> [<col>...] values <val>...`
fn parse_insert(words: &[Word<'_>]) -> Result<Statement, StatementError> {
    insert_parts(words).map_err(StatementError::MalformedInsert)
}

fn insert_parts(words: &[Word<'_>]) -> Result<Statement, Malformed> {
    if words.len() < INSERT_MIN_PARTS {
        return Err(Malformed::TooShort(INSERT_MIN_PARTS));
    }
    if words[1].kind != Token::Into {
        return Err(Malformed::MissingKeyword("into"));
    }
    let table = identifier(&words[2])?;
    let values_at = words[3..]
        .iter()
        .position(|w| w.kind == Token::Values)
        .map(|i| i + 3)
        .ok_or(Malformed::MissingKeyword("values"))?;

    let columns = identifiers(&words[3..values_at])?;
    let values = texts(&words[values_at + 1..]);
    if values.is_empty() {
        return Err(Malformed::NoValues);
    }
    if !columns.is_empty() && columns.len() != values.len() {
        return Err(Malformed::CountMismatch {
            columns: columns.len(),
            values: values.len(),
        });
    }

    let mut stmt = Statement::empty(StatementType::Insert);
    stmt.table_name = Some(table.to_string());
    stmt.columns = columns;
    stmt.values = values;
    Ok(stmt)
}

/// `create table <name> <label> <spec> [<label> <spec>...]`
fn parse_create(words: &[Word<'_>], schema: &mut Schema) -> Result<Statement, StatementError> {
    let bad = StatementError::MalformedCreate;
    if words.len() < CREATE_MIN_PARTS {
        return Err(bad(Malformed::TooShort(CREATE_MIN_PARTS)));
    }
    if words[1].kind != Token::Table {
        return Err(bad(Malformed::MissingKeyword("table")));
    }
    let name = identifier(&words[2]).map_err(bad)?;

    let mut columns = Vec::new();
    let mut specs = Vec::new();
    let mut defs = words[3..].iter();
    while let Some(label) = defs.next() {
        let spec = defs
            .next()
            .ok_or_else(|| bad(Malformed::MissingType(label.text.to_string())))?;
        let label = identifier(label).map_err(bad)?;
        columns.push(parse_column(label, spec.text)?);
        specs.push(spec.text.to_string());
    }
    let labels: Vec<String> = columns.iter().map(|c| c.label().to_string()).collect();

    schema.insert_table(Table::new(name, columns)?)?;
    info!(table = name, columns = labels.len(), "created table");

    let mut stmt = Statement::empty(StatementType::Create);
    stmt.table_name = Some(name.to_string());
    stmt.columns = labels;
    stmt.values = specs;
    Ok(stmt)
}
