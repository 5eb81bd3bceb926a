//! To-do list operations.
//!
//! # Invariants
//! - A list can only be created for an existing user.
//! - Listing by user distinguishes "user has no lists" (empty result) from
//!   "user does not exist" (`NotFound`).

use super::{not_found_as, ServiceError, ServiceResult};
use crate::model::todo_list::{ListId, TodoList, TodoListDraft, TodoListPatch};
use crate::model::user::UserId;
use crate::repo::todo_list_repo::TodoListRepository;
use crate::repo::user_repo::UserRepository;
use log::info;

pub const LIST_NOT_FOUND: &str = "To-do list not found";
pub const NO_LISTS_FOR_USER: &str = "No to-do lists found for the user.";
pub const LIST_OWNER_NOT_FOUND: &str = "User not found";

/// Use-case service for lists.
pub struct TodoListService<L: TodoListRepository, U: UserRepository> {
    lists: L,
    users: U,
}

impl<L: TodoListRepository, U: UserRepository> TodoListService<L, U> {
    pub fn new(lists: L, users: U) -> Self {
        Self { lists, users }
    }

    /// Creates an empty list owned by `draft.user_id`.
    pub fn create_list(&self, draft: &TodoListDraft) -> ServiceResult<TodoList> {
        draft.validate()?;
        if !self.users.user_exists(draft.user_id)? {
            return Err(ServiceError::not_found(LIST_OWNER_NOT_FOUND));
        }

        let list = self.lists.create_list(draft)?;
        info!(
            "event=list_create module=service status=ok list_id={} user_id={}",
            list.id, list.user_id
        );
        Ok(list)
    }

    pub fn get_list(&self, id: ListId) -> ServiceResult<TodoList> {
        self.lists
            .get_list(id)?
            .ok_or_else(|| ServiceError::not_found(LIST_NOT_FOUND))
    }

    /// Lists every list owned by an existing user (possibly none).
    pub fn lists_for_user(&self, user_id: UserId) -> ServiceResult<Vec<TodoList>> {
        if !self.users.user_exists(user_id)? {
            return Err(ServiceError::not_found(NO_LISTS_FOR_USER));
        }
        Ok(self.lists.lists_for_user(user_id)?)
    }

    pub fn update_list(&self, id: ListId, patch: &TodoListPatch) -> ServiceResult<TodoList> {
        patch.validate()?;
        let list = not_found_as(self.lists.update_list(id, patch), LIST_NOT_FOUND)?;
        info!("event=list_update module=service status=ok list_id={}", id);
        Ok(list)
    }

    /// Deletes the list and all of its items atomically.
    pub fn delete_list(&self, id: ListId) -> ServiceResult<()> {
        let items_removed = not_found_as(self.lists.delete_list(id), LIST_NOT_FOUND)?;
        info!(
            "event=list_delete module=service status=ok list_id={} items_removed={}",
            id, items_removed
        );
        Ok(())
    }
}
