//! Shared handler state.
//!
//! # Invariants
//! - The connection handle is injected at router construction; there is no
//!   process-wide database singleton.
//! - SQLite work never runs on async executor threads.

use crate::error::ApiError;
use items_core::{ItemService, SqliteItemRepository};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `f` against an item service on the blocking thread pool.
    ///
    /// The connection lock is held for the whole call, so `f` observes one
    /// consistent database state.
    pub(crate) async fn with_item_service<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&ItemService<SqliteItemRepository<'_>>) -> Result<T, ApiError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| ApiError::Internal("database connection lock poisoned".to_string()))?;
            let service = ItemService::new(SqliteItemRepository::new(&guard));
            f(&service)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("database task failed: {err}")))?
    }
}
