//! Core domain logic for the to-do service.
//!
//! Users own lists, lists own items. This crate holds the entity model, the
//! transfer shapes, SQLite persistence and the operation services; the HTTP
//! surface lives in `todo_api`.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod transfer;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::todo_item::{ItemId, TodoItem, TodoItemDraft, TodoItemPatch};
pub use model::todo_list::{ListId, TodoList, TodoListDraft, TodoListPatch};
pub use model::user::{User, UserDraft, UserId, UserPatch};
pub use model::{ValidationError, ValidationReason};
pub use repo::todo_item_repo::{
    ItemKey, ItemSearchScope, SqliteTodoItemRepository, TodoItemRepository,
};
pub use repo::todo_list_repo::{SqliteTodoListRepository, TodoListRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use search::{search_todos, SearchHit, SearchQuery};
pub use service::todo_item_service::TodoItemService;
pub use service::todo_list_service::TodoListService;
pub use service::user_service::UserService;
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check probe.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
