//! Shared application state.

use crate::error::AppError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};
use todolist_core::{ReadyConnection, RepoResult, SqliteTodoService};

/// Cloneable handle to the single store connection.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<ReadyConnection>>,
}

impl AppState {
    /// Wraps a connection returned by `todolist_core::db::open_db*`.
    ///
    /// # Errors
    /// The schema check of [`ReadyConnection::try_new`] runs here, once.
    pub fn new(conn: Connection) -> RepoResult<Self> {
        Ok(Self {
            conn: Arc::new(Mutex::new(ReadyConnection::try_new(conn)?)),
        })
    }

    /// Runs `op` against the store on the blocking pool.
    ///
    /// Store calls are serialized by the connection mutex. A call that panics
    /// leaves no open transaction behind, so a poisoned lock is taken back.
    pub async fn with_service<T, F>(&self, op: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&SqliteTodoService<'conn>) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            op(&guard.service()).map_err(AppError::from)
        })
        .await
        .map_err(|err| AppError::Task(err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::error::AppError;
    use rusqlite::Connection;
    use todolist_core::db::open_db_in_memory;
    use todolist_core::{ListView, RepoError, RepoResult};

    fn state() -> AppState {
        AppState::new(open_db_in_memory().expect("in-memory store should open"))
            .expect("migrated store should be accepted")
    }

    #[test]
    fn unmigrated_connection_is_rejected_up_front() {
        let raw = Connection::open_in_memory().expect("raw sqlite connection should open");
        let err = AppState::new(raw).err().expect("unmigrated store should be rejected");
        assert!(matches!(err, RepoError::UninitializedConnection { .. }));
    }

    #[tokio::test]
    async fn store_keeps_serving_after_a_call_panics() {
        let state = state();

        let err = state
            .with_service(|_service| -> RepoResult<()> { panic!("handler blew up") })
            .await
            .expect_err("panicking call should fail");
        assert!(matches!(err, AppError::Task(_)));

        let view = state
            .with_service(|service| service.home_view())
            .await
            .expect("store should still serve after a panic");
        assert!(matches!(view, ListView::Redirect(_)));
    }
}
