//! Home-list item repository.
//!
//! # Responsibility
//! - Provide CRUD over the flat `items` table that backs "To-Do List".
//! - Own the repository error type shared with `list_repo`.
//!
//! # Invariants
//! - Items are returned in insertion order.
//! - Seeding is atomic: concurrent callers insert the defaults at most once.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::item::{Item, ItemId, ItemValidationError};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by item and list repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    ListNotFound(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::ListNotFound(name) => write!(f, "list not found: {name}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the home-list collection.
pub trait ItemRepository {
    /// Returns every home item in insertion order.
    fn list_items(&self) -> RepoResult<Vec<Item>>;
    /// Appends one item and returns its id.
    fn insert_item(&self, item: &Item) -> RepoResult<ItemId>;
    /// Inserts `items` only when the collection is empty.
    ///
    /// Returns `true` when the seed was written by this call.
    fn seed_if_empty(&self, items: &[Item]) -> RepoResult<bool>;
    /// Removes one item by id. Returns `false` when nothing matched.
    fn remove_item(&self, id: ItemId) -> RepoResult<bool>;
}

/// SQLite-backed home-list repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - [`RepoError::UninitializedConnection`] when migrations were not applied.
    /// - [`RepoError::MissingRequiredTable`] when `items` is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["items"])?;
        Ok(Self { conn })
    }

    /// Wraps a connection whose schema was already checked.
    pub(crate) fn from_checked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, name FROM items ORDER BY seq ASC;")?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row, "items")?);
        }
        Ok(items)
    }

    fn insert_item(&self, item: &Item) -> RepoResult<ItemId> {
        item.validate()?;
        insert_home_item(self.conn, item)?;
        Ok(item.id)
    }

    fn seed_if_empty(&self, items: &[Item]) -> RepoResult<bool> {
        for item in items {
            item.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(false);
        }

        for item in items {
            insert_home_item(&tx, item)?;
        }
        tx.commit()?;
        Ok(true)
    }

    fn remove_item(&self, id: ItemId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn insert_home_item(conn: &Connection, item: &Item) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO items (uuid, name) VALUES (?1, ?2);",
        params![item.id.to_string(), item.name.as_str()],
    )?;
    Ok(())
}

/// Parses a `(uuid, name)` row and re-validates it.
pub(crate) fn parse_item_row(row: &Row<'_>, table: &str) -> RepoResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, table)?;
    let name: String = row.get("name")?;
    Item::with_id(id, name).map_err(|err| {
        RepoError::InvalidData(format!("item `{uuid_text}` in {table}: {err}"))
    })
}

pub(crate) fn parse_uuid(value: &str, table: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {table}.uuid")))
}

/// Rejects connections that bypassed `db::open_db*` or lack `tables`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}
