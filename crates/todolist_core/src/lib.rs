//! Domain and storage core for the multi-list to-do server.
//! Everything that touches the store goes through this crate.

pub mod date;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use date::{format_header_date, today_header};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{default_items, Item, ItemId, ItemValidationError, DEFAULT_ITEM_NAMES};
pub use model::todo_list::{capitalize_list_name, ListId, ListTarget, TodoList, HOME_LIST_NAME};
pub use repo::item_repo::{ItemRepository, RepoError, RepoResult, SqliteItemRepository};
pub use repo::list_repo::{ListLookup, ListRepository, SqliteListRepository};
pub use service::todo_service::{ListPage, ListView, TodoService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Service wired to the SQLite repositories of one connection.
pub type SqliteTodoService<'conn> =
    TodoService<SqliteItemRepository<'conn>, SqliteListRepository<'conn>>;

/// Builds a service over the SQLite repositories for `conn`.
///
/// # Errors
/// - `RepoError::UninitializedConnection` / `MissingRequiredTable` when
///   `conn` was not opened through [`db::open_db`] or [`db::open_db_in_memory`].
pub fn sqlite_service(conn: &rusqlite::Connection) -> RepoResult<SqliteTodoService<'_>> {
    Ok(TodoService::new(
        SqliteItemRepository::try_new(conn)?,
        SqliteListRepository::try_new(conn)?,
    ))
}

/// A connection whose schema was checked once, for long-lived owners that
/// build a service per unit of work.
#[derive(Debug)]
pub struct ReadyConnection {
    conn: rusqlite::Connection,
}

impl ReadyConnection {
    /// Checks the schema of `conn` for every repository up front.
    ///
    /// # Errors
    /// Same as [`sqlite_service`].
    pub fn try_new(conn: rusqlite::Connection) -> RepoResult<Self> {
        repo::item_repo::ensure_connection_ready(&conn, &["items", "lists", "list_items"])?;
        Ok(Self { conn })
    }

    /// Builds a service without repeating the schema checks.
    pub fn service(&self) -> SqliteTodoService<'_> {
        TodoService::new(
            SqliteItemRepository::from_checked(&self.conn),
            SqliteListRepository::from_checked(&self.conn),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
