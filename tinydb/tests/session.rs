use tinydb::{ColumnType, Session, StatementError, StatementType};

#[test]
fn create_insert_select_flow() {
    let mut session = Session::new();

    let create = session
        .execute("create table people id int name varchar(32) email varchar(256)")
        .unwrap();
    assert_eq!(create.statement_type(), StatementType::Create);

    let table = session.schema().find_table_by_name("people").unwrap();
    let types: Vec<_> = table.columns().iter().map(|c| c.column_type()).collect();
    assert_eq!(types, vec![ColumnType::Integer, ColumnType::String, ColumnType::String]);
    assert_eq!(table.row_size(), 4 + 32 + 256);

    let insert = session
        .execute("insert into people id name email values 1 ada ada@example.com")
        .unwrap();
    assert_eq!(insert.values(), ["1", "ada", "ada@example.com"]);

    let select = session.execute("select name email from people").unwrap();
    assert_eq!(select.table_name(), Some("people"));
    assert_eq!(select.values(), ["name", "email"]);

    assert_eq!(session.history().len(), 3);
}

#[test]
fn errors_surface_from_parse_and_validation() {
    let mut session = Session::new();
    assert_eq!(session.execute("   "), Err(StatementError::EmptyQuery));
    assert_eq!(
        session.execute("drop table people"),
        Err(StatementError::BadStarterIdentifier)
    );
    assert_eq!(
        session.execute("select * from people"),
        Err(StatementError::UnknownTable("people".into()))
    );
    assert_eq!(
        session.execute("create table people name varchar(32) name varchar(32)"),
        Err(StatementError::DuplicateColumnNames)
    );
    assert!(session.schema().is_empty());
    assert!(session.history().is_empty());
}

#[test]
fn same_input_same_result_on_fresh_sessions() {
    let raw = "create table people id int";
    let first = Session::new().execute(raw);
    let second = Session::new().execute(raw);
    assert_eq!(first, second);
}
