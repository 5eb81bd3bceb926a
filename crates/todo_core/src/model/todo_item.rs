//! To-do item entity.
//!
//! # Invariants
//! - `list_id` references an existing list at creation time, on every
//!   creation path.
//! - `description` and `deadline` are optional and may be cleared by a patch;
//!   `name` may be replaced but never cleared.

use super::todo_list::ListId;
use super::{check_required_text, normalize_required_text, ValidationError};
use chrono::NaiveDateTime;

pub type ItemId = i64;

/// Stored item record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: ItemId,
    pub list_id: ListId,
    pub name: String,
    pub description: Option<String>,
    /// UTC.
    pub deadline: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Validated input for creating an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemDraft {
    pub list_id: ListId,
    pub name: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDateTime>,
}

impl TodoItemDraft {
    pub fn new(list_id: ListId, name: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            list_id,
            name: normalize_required_text("name", name.as_ref())?,
            description: None,
            deadline: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDateTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required_text("name", &self.name)
    }
}

/// Partial update for an item.
///
/// The outer `Option` is presence; for clearable fields the inner `Option`
/// is the new value (`Some(None)` clears it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoItemPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub deadline: Option<Option<NaiveDateTime>>,
}

impl TodoItemPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.name.as_deref() {
            Some(name) => check_required_text("name", name),
            None => Ok(()),
        }
    }

    pub fn apply_to(&self, item: &mut TodoItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(deadline) = self.deadline {
            item.deadline = deadline;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TodoItem, TodoItemPatch};
    use chrono::DateTime;

    fn item() -> TodoItem {
        let created_at = DateTime::from_timestamp_millis(1_700_000_000_000)
            .unwrap()
            .naive_utc();
        TodoItem {
            id: 1,
            list_id: 1,
            name: "Milk".to_string(),
            description: Some("2 litres".to_string()),
            deadline: Some(created_at),
            created_at,
        }
    }

    #[test]
    fn explicit_none_clears_optional_fields() {
        let mut item = item();
        TodoItemPatch {
            name: None,
            description: Some(None),
            deadline: Some(None),
        }
        .apply_to(&mut item);

        assert_eq!(item.name, "Milk");
        assert!(item.description.is_none());
        assert!(item.deadline.is_none());
    }

    #[test]
    fn absent_fields_are_left_untouched() {
        let mut item = item();
        TodoItemPatch {
            name: Some("Oat milk".to_string()),
            ..TodoItemPatch::default()
        }
        .apply_to(&mut item);

        assert_eq!(item.name, "Oat milk");
        assert_eq!(item.description.as_deref(), Some("2 litres"));
        assert!(item.deadline.is_some());
    }
}
