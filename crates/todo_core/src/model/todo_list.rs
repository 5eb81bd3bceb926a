//! To-do list entity.
//!
//! # Invariants
//! - `user_id` references an existing user at creation time.
//! - A list owns its items: deleting the list deletes every item in the same
//!   transaction.
//! - `name` is the only mutable field.

use super::todo_item::TodoItem;
use super::user::UserId;
use super::{check_required_text, normalize_required_text, ValidationError};
use chrono::NaiveDateTime;

pub type ListId = i64;

/// Stored list record together with its items (ordered by item id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: ListId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub items: Vec<TodoItem>,
}

/// Validated input for creating a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListDraft {
    pub user_id: UserId,
    pub name: String,
}

impl TodoListDraft {
    pub fn new(user_id: UserId, name: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id,
            name: normalize_required_text("name", name.as_ref())?,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required_text("name", &self.name)
    }
}

/// Partial update for a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListPatch {
    pub name: Option<String>,
}

impl TodoListPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.name.as_deref() {
            Some(name) => check_required_text("name", name),
            None => Ok(()),
        }
    }

    pub fn apply_to(&self, list: &mut TodoList) {
        if let Some(name) = &self.name {
            list.name = name.clone();
        }
    }
}
