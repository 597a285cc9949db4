//! Named-list repository.
//!
//! # Responsibility
//! - Look up, lazily create and mutate named lists with embedded items.
//!
//! # Invariants
//! - At most one list exists per name (`lists.name` is unique).
//! - `create_or_fetch` never creates a second list under concurrent callers.
//! - Embedded items keep insertion order.

use crate::model::item::{Item, ItemId};
use crate::model::todo_list::TodoList;
use crate::repo::item_repo::{
    ensure_connection_ready, parse_item_row, parse_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Outcome of [`ListRepository::create_or_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLookup {
    /// The list already existed and is returned unchanged.
    Existing(TodoList),
    /// The list was created by this call with the provided seed items.
    Created(TodoList),
}

impl ListLookup {
    pub fn into_list(self) -> TodoList {
        match self {
            Self::Existing(list) | Self::Created(list) => list,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Repository interface for named lists.
pub trait ListRepository {
    /// Finds a list by exact name.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<TodoList>>;
    /// Returns the list called `name`, creating it with `seed` when absent.
    fn create_or_fetch(&self, name: &str, seed: &[Item]) -> RepoResult<ListLookup>;
    /// Appends `item` to the list called `list_name`.
    ///
    /// # Errors
    /// - [`RepoError::ListNotFound`] when no such list exists.
    fn push_item(&self, list_name: &str, item: &Item) -> RepoResult<()>;
    /// Removes the embedded item `item_id` from `list_name`.
    ///
    /// Returns `false` when the list or the item does not exist.
    fn pull_item(&self, list_name: &str, item_id: ItemId) -> RepoResult<bool>;
}

/// SQLite-backed named-list repository.
pub struct SqliteListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListRepository<'conn> {
    /// Wraps a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["lists", "list_items"])?;
        Ok(Self { conn })
    }

    pub(crate) fn from_checked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<TodoList>> {
        load_list(self.conn, name)
    }

    fn create_or_fetch(&self, name: &str, seed: &[Item]) -> RepoResult<ListLookup> {
        for item in seed {
            item.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let candidate = TodoList::new(name);
        let inserted = tx.execute(
            "INSERT INTO lists (uuid, name) VALUES (?1, ?2)
             ON CONFLICT (name) DO NOTHING;",
            params![candidate.id.to_string(), name],
        )?;

        if inserted == 0 {
            let existing = load_list(&tx, name)?.ok_or_else(|| {
                RepoError::InvalidData(format!("list `{name}` vanished during create"))
            })?;
            tx.commit()?;
            return Ok(ListLookup::Existing(existing));
        }

        let list_id = candidate.id.to_string();
        for item in seed {
            insert_list_item(&tx, &list_id, item)?;
        }
        tx.commit()?;

        Ok(ListLookup::Created(TodoList {
            items: seed.to_vec(),
            ..candidate
        }))
    }

    fn push_item(&self, list_name: &str, item: &Item) -> RepoResult<()> {
        item.validate()?;

        let list_id = find_list_id(self.conn, list_name)?
            .ok_or_else(|| RepoError::ListNotFound(list_name.to_string()))?;
        insert_list_item(self.conn, &list_id, item)
    }

    fn pull_item(&self, list_name: &str, item_id: ItemId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM list_items
             WHERE uuid = ?2
               AND list_uuid = (SELECT uuid FROM lists WHERE name = ?1);",
            params![list_name, item_id.to_string()],
        )?;
        Ok(changed > 0)
    }
}

fn find_list_id(conn: &Connection, name: &str) -> RepoResult<Option<String>> {
    let id = conn
        .query_row(
            "SELECT uuid FROM lists WHERE name = ?1;",
            [name],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(id)
}

fn load_list(conn: &Connection, name: &str) -> RepoResult<Option<TodoList>> {
    let Some(list_id) = find_list_id(conn, name)? else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT uuid, name
         FROM list_items
         WHERE list_uuid = ?1
         ORDER BY seq ASC;",
    )?;
    let mut rows = stmt.query([list_id.as_str()])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_item_row(row, "list_items")?);
    }

    Ok(Some(TodoList {
        id: parse_uuid(&list_id, "lists")?,
        name: name.to_string(),
        items,
    }))
}

fn insert_list_item(conn: &Connection, list_id: &str, item: &Item) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO list_items (list_uuid, uuid, name) VALUES (?1, ?2, ?3);",
        params![list_id, item.id.to_string(), item.name.as_str()],
    )?;
    Ok(())
}
