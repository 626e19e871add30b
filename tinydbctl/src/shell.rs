//! Statement evaluation and backslash meta commands.

use std::fmt::Write as _;
use tinydb::{Session, Statement, Table};
use tinydb_log::ReloadHandle;

/// Shell commands that are not statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// `\q` or `exit`.
    Quit,
    /// `\h` or `\?`.
    Help,
    /// `\dt`.
    ListTables,
    /// `\d <table>`.
    Describe(String),
    /// `\log <filter>`.
    Log(String),
    /// Any other backslash command.
    Unknown(String),
}

impl MetaCommand {
    /// Recognise a meta command; `None` means `line` is a statement.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            return Some(Self::Quit);
        }
        let rest = line.strip_prefix('\\')?;
        let mut parts = rest.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::to_string);
        Some(match (cmd, arg) {
            ("q", _) => Self::Quit,
            ("h" | "?", _) => Self::Help,
            ("dt", _) => Self::ListTables,
            ("d", Some(table)) => Self::Describe(table),
            ("log", Some(filter)) => Self::Log(filter),
            _ => Self::Unknown(line.to_string()),
        })
    }
}

const HELP: &str = "\
statements:
  create table <name> <col> <int|varchar(N)> ...
  insert into <table> [<col> ...] values <val> ...
  select <* | col ...> from <table>
meta commands:
  \\dt             list tables
  \\d <table>      describe a table
  \\log <filter>   change the log filter
  \\h              this help
  \\q              quit";

/// Evaluates input lines against one session.
pub struct Shell {
    session: Session,
    json: bool,
    log: Option<ReloadHandle>,
}

/// Result of one input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Text for stdout.
    Output(String),
    /// Text for stderr; the line failed.
    Error(String),
    /// Leave the shell.
    Quit,
}

impl Shell {
    /// Create a shell; `log` enables `\log`.
    pub fn new(json: bool, log: Option<ReloadHandle>) -> Self {
        Self {
            session: Session::new(),
            json,
            log,
        }
    }

    /// Evaluate one line, statement or meta command.
    pub fn eval(&mut self, line: &str) -> Reply {
        match MetaCommand::parse(line) {
            Some(cmd) => self.meta(cmd),
            None => match self.session.execute(line) {
                Ok(stmt) => Reply::Output(self.render(&stmt)),
                Err(err) => Reply::Error(format!("Error: {err}")),
            },
        }
    }

    fn meta(&mut self, cmd: MetaCommand) -> Reply {
        match cmd {
            MetaCommand::Quit => Reply::Quit,
            MetaCommand::Help => Reply::Output(HELP.to_string()),
            MetaCommand::ListTables => Reply::Output(self.session.schema().table_names().join("\n")),
            MetaCommand::Describe(name) => match self.session.schema().find_table_by_name(&name) {
                Some(table) => Reply::Output(describe(table)),
                None => Reply::Error(format!("Error: no such table: {name}")),
            },
            MetaCommand::Log(filter) => match &self.log {
                Some(handle) => match tinydb_log::set_level(handle, &filter) {
                    Ok(()) => Reply::Output(format!("log filter set to {filter}")),
                    Err(err) => Reply::Error(format!("Error: {err:#}")),
                },
                None => Reply::Error("Error: logging is not initialised".to_string()),
            },
            MetaCommand::Unknown(line) => Reply::Error(format!("Error: unknown command {line}")),
        }
    }

    fn render(&self, stmt: &Statement) -> String {
        if self.json {
            // only strings and flags, serialization cannot fail
            serde_json::to_string(stmt).unwrap_or_default()
        } else {
            format!("{:#?}", stmt)
        }
    }
}

/// Column listing for `\d`.
fn describe(table: &Table) -> String {
    let mut out = format!("table {}\n", table.name());
    for col in table.columns() {
        let ty = format!("{:?}", col.column_type());
        let _ = writeln!(out, "  {:<16} {:<8} {}", col.label(), ty, col.size());
    }
    let _ = write!(out, "row size: {} bytes", table.row_size());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_commands() {
        assert_eq!(MetaCommand::parse("\\q"), Some(MetaCommand::Quit));
        assert_eq!(MetaCommand::parse(" EXIT "), Some(MetaCommand::Quit));
        assert_eq!(MetaCommand::parse("\\dt"), Some(MetaCommand::ListTables));
        assert_eq!(
            MetaCommand::parse("\\d people"),
            Some(MetaCommand::Describe("people".into()))
        );
        assert_eq!(
            MetaCommand::parse("\\log debug"),
            Some(MetaCommand::Log("debug".into()))
        );
        assert_eq!(
            MetaCommand::parse("\\d"),
            Some(MetaCommand::Unknown("\\d".into()))
        );
        assert_eq!(MetaCommand::parse("select * from people"), None);
    }

    #[test]
    fn eval_statements_and_describe() {
        let mut shell = Shell::new(false, None);
        assert!(matches!(
            shell.eval("create table people id int name varchar(32)"),
            Reply::Output(_)
        ));
        assert_eq!(shell.eval("\\dt"), Reply::Output("people".into()));

        let Reply::Output(text) = shell.eval("\\d people") else {
            panic!("expected description");
        };
        assert!(text.starts_with("table people\n"));
        assert!(text.contains("name"));
        assert!(text.ends_with("row size: 36 bytes"));

        assert_eq!(
            shell.eval("select age from people"),
            Reply::Error("Error: no such column: age".into())
        );
        assert_eq!(shell.eval("\\q"), Reply::Quit);
    }

    #[test]
    fn json_output() {
        let mut shell = Shell::new(true, None);
        let Reply::Output(text) = shell.eval("create table t id int") else {
            panic!("expected output");
        };
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["statement_type"], "create");
        assert_eq!(value["table_name"], "t");
    }

    #[test]
    fn log_without_handle() {
        let mut shell = Shell::new(false, None);
        assert!(matches!(shell.eval("\\log debug"), Reply::Error(_)));
    }
}
