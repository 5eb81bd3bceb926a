//! To-do item operations shared by the flat and list-scoped surfaces.
//!
//! # Responsibility
//! - Single implementation of item create/get/update/delete/list/search.
//! - Callers choose the lookup with [`ItemKey::by_id`] or
//!   [`ItemKey::in_list`].
//!
//! # Invariants
//! - Every creation path verifies the target list exists.
//! - A compound-key lookup only matches an item that belongs to that list.

use super::{not_found_as, ServiceError, ServiceResult};
use crate::model::todo_item::{TodoItem, TodoItemDraft, TodoItemPatch};
use crate::model::todo_list::ListId;
use crate::repo::todo_item_repo::{ItemKey, ItemSearchScope, TodoItemRepository};
use crate::repo::todo_list_repo::TodoListRepository;
use crate::repo::RepoError;
use crate::search::SearchQuery;
use log::info;

pub const ITEM_NOT_FOUND: &str = "ToDoItem not found";
pub const LIST_ITEM_NOT_FOUND: &str = "To-do item not found";
pub const PARENT_LIST_MISSING: &str = "The to-do list does not exist.";
pub const ITEMS_LIST_NOT_FOUND: &str = "To-do list not found";

/// Use-case service for items.
pub struct TodoItemService<I: TodoItemRepository, L: TodoListRepository> {
    items: I,
    lists: L,
}

impl<I: TodoItemRepository, L: TodoListRepository> TodoItemService<I, L> {
    pub fn new(items: I, lists: L) -> Self {
        Self { items, lists }
    }

    /// Creates an item in `draft.list_id`, which must exist.
    pub fn create_item(&self, draft: &TodoItemDraft) -> ServiceResult<TodoItem> {
        draft.validate()?;
        if !self.lists.list_exists(draft.list_id)? {
            return Err(ServiceError::not_found(PARENT_LIST_MISSING));
        }

        let item = self.items.create_item(draft).map_err(|err| match err {
            RepoError::MissingReference { .. } => ServiceError::not_found(PARENT_LIST_MISSING),
            other => other.into(),
        })?;
        info!(
            "event=item_create module=service status=ok item_id={} list_id={}",
            item.id, item.list_id
        );
        Ok(item)
    }

    pub fn get_item(&self, key: ItemKey) -> ServiceResult<TodoItem> {
        self.items
            .get_item(key)?
            .ok_or_else(|| ServiceError::not_found(not_found_detail(key)))
    }

    /// Lists the items of an existing list.
    pub fn items_in_list(&self, list_id: ListId) -> ServiceResult<Vec<TodoItem>> {
        if !self.lists.list_exists(list_id)? {
            return Err(ServiceError::not_found(ITEMS_LIST_NOT_FOUND));
        }
        Ok(self.items.list_items(Some(list_id))?)
    }

    pub fn all_items(&self) -> ServiceResult<Vec<TodoItem>> {
        Ok(self.items.list_items(None)?)
    }

    pub fn update_item(&self, key: ItemKey, patch: &TodoItemPatch) -> ServiceResult<TodoItem> {
        patch.validate()?;
        let item = not_found_as(self.items.update_item(key, patch), not_found_detail(key))?;
        info!(
            "event=item_update module=service status=ok item_id={} list_id={}",
            item.id, item.list_id
        );
        Ok(item)
    }

    pub fn delete_item(&self, key: ItemKey) -> ServiceResult<()> {
        not_found_as(self.items.delete_item(key), not_found_detail(key))?;
        info!(
            "event=item_delete module=service status=ok item_id={}",
            key.id
        );
        Ok(())
    }

    /// Items whose name or description contains the query (case-insensitive).
    pub fn search_items(&self, query: &SearchQuery) -> ServiceResult<Vec<TodoItem>> {
        Ok(self
            .items
            .search_items(query.text(), ItemSearchScope::NameOrDescription)?)
    }
}

fn not_found_detail(key: ItemKey) -> &'static str {
    match key.list_id {
        Some(_) => LIST_ITEM_NOT_FOUND,
        None => ITEM_NOT_FOUND,
    }
}
