//! Substring search across lists and items.
//!
//! # Responsibility
//! - Validate search text once for every search entry point.
//! - Combine list-name and item-name matches into one typed result sequence.
//!
//! # Invariants
//! - Matching is case-insensitive and treats wildcard characters literally.
//! - Lists come first, then items; each group is ordered by ascending id.
//! - No matches is an empty result, not an error.

use crate::model::todo_item::TodoItem;
use crate::model::todo_list::TodoList;
use crate::model::{ValidationError, ValidationReason};
use crate::repo::todo_item_repo::{ItemSearchScope, SqliteTodoItemRepository, TodoItemRepository};
use crate::repo::todo_list_repo::{SqliteTodoListRepository, TodoListRepository};
use crate::service::ServiceResult;
use log::debug;
use rusqlite::Connection;

/// Validated search text, kept exactly as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
}

impl SearchQuery {
    /// Builds a query from user text; only the empty string is rejected.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ValidationError::new("query", ValidationReason::Empty));
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One hit of a cross-entity search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchHit {
    List(TodoList),
    Item(TodoItem),
}

/// Searches list names and item names for `query`.
pub fn search_todos(conn: &Connection, query: &SearchQuery) -> ServiceResult<Vec<SearchHit>> {
    let lists = SqliteTodoListRepository::try_new(conn)?.search_lists(query.text())?;
    let items = SqliteTodoItemRepository::try_new(conn)?
        .search_items(query.text(), ItemSearchScope::Name)?;

    debug!(
        "event=search module=search status=ok lists={} items={}",
        lists.len(),
        items.len()
    );

    let mut hits = Vec::with_capacity(lists.len() + items.len());
    hits.extend(lists.into_iter().map(SearchHit::List));
    hits.extend(items.into_iter().map(SearchHit::Item));
    Ok(hits)
}
