//! TinyDB statement parser crate.
#![deny(missing_docs)]

mod ast;
mod token;

pub use ast::{Statement, StatementType};
pub use token::{tokenize, LexItem, Lexer, Span, Token, Word};

pub mod column;
pub mod parser;
pub mod validate;

pub use column::{parse_column, parse_column_size, parse_column_type};
pub use parser::{Malformed, StatementError};
pub use validate::validate;
