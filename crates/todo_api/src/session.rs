//! Shared router state and per-request storage sessions.
//!
//! # Invariants
//! - A session is one SQLite connection opened for one request and dropped
//!   before the response is sent; connections are never shared.
//! - Blocking SQLite work runs on the blocking thread pool.

use crate::error::ApiError;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;
use todo_core::db::{open_db, DbResult};
use todo_core::{
    RepoResult, ServiceResult, SqliteTodoItemRepository, SqliteTodoListRepository,
    SqliteUserRepository, TodoItemService, TodoListService, UserService,
};

pub type Users<'conn> = UserService<SqliteUserRepository<'conn>>;
pub type Lists<'conn> = TodoListService<SqliteTodoListRepository<'conn>, SqliteUserRepository<'conn>>;
pub type Items<'conn> =
    TodoItemService<SqliteTodoItemRepository<'conn>, SqliteTodoListRepository<'conn>>;

/// Router state: where the database lives.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    /// Opens the database once so migrations run before the first request.
    pub fn open(db_path: impl Into<PathBuf>) -> DbResult<Self> {
        let db_path = db_path.into();
        drop(open_db(&db_path)?);
        Ok(Self {
            db_path: Arc::new(db_path),
        })
    }

    /// Runs `operation` against a fresh session on the blocking pool.
    pub async fn with_session<T, F>(&self, operation: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        tokio::task::spawn_blocking(move || {
            let conn = open_db(db_path.as_path()).map_err(|err| ApiError::internal("db_open", err))?;
            operation(&conn).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::internal("session task", err))?
    }
}

pub fn users(conn: &Connection) -> RepoResult<Users<'_>> {
    Ok(UserService::new(SqliteUserRepository::try_new(conn)?))
}

pub fn lists(conn: &Connection) -> RepoResult<Lists<'_>> {
    Ok(TodoListService::new(
        SqliteTodoListRepository::try_new(conn)?,
        SqliteUserRepository::try_new(conn)?,
    ))
}

pub fn items(conn: &Connection) -> RepoResult<Items<'_>> {
    Ok(TodoItemService::new(
        SqliteTodoItemRepository::try_new(conn)?,
        SqliteTodoListRepository::try_new(conn)?,
    ))
}
