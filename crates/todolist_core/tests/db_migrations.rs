use rusqlite::Connection;
use todolist_core::db::migrations::latest_version;
use todolist_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().expect("in-memory store should open");

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["items", "lists", "list_items"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn reopening_a_store_file_keeps_data() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("todolistDB.db");

    let conn = open_db(&path).expect("store file should open");
    conn.execute(
        "INSERT INTO items (uuid, name) VALUES ('00000000-0000-4000-8000-000000000001', 'kept');",
        [],
    )
    .expect("statement should run");
    drop(conn);

    let reopened = open_db(&path).expect("store file should open");
    assert_eq!(schema_version(&reopened), latest_version());
    let count: i64 = reopened
        .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))
        .expect("query should return a row");
    assert_eq!(count, 1);
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).expect("sqlite file should open");
    conn.execute_batch("PRAGMA user_version = 999;").expect("batch should run");
    drop(conn);

    match open_db(&path).expect_err("newer schema should be rejected") {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn list_names_are_unique_at_the_schema_level() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    conn.execute(
        "INSERT INTO lists (uuid, name) VALUES ('00000000-0000-4000-8000-000000000001', 'Work');",
        [],
    )
    .expect("statement should run");

    let duplicate = conn.execute(
        "INSERT INTO lists (uuid, name) VALUES ('00000000-0000-4000-8000-000000000002', 'Work');",
        [],
    );
    assert!(duplicate.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .expect("query should return a row")
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .expect("query should return a row");
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
