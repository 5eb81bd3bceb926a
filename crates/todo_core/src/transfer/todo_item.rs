use super::{present, required_update};
use crate::model::todo_item::{ItemId, TodoItem, TodoItemDraft, TodoItemPatch};
use crate::model::todo_list::ListId;
use crate::model::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body of `POST /todo-items/`; names the target list explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoItem {
    pub list_id: ListId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDateTime>,
}

impl CreateTodoItem {
    pub fn into_draft(self) -> Result<TodoItemDraft, ValidationError> {
        NewTodoItem {
            name: self.name,
            description: self.description,
            deadline: self.deadline,
        }
        .into_draft(self.list_id)
    }
}

/// Body of `POST /todo-lists/{list_id}/items/`; the list comes from the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodoItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDateTime>,
}

impl NewTodoItem {
    pub fn into_draft(self, list_id: ListId) -> Result<TodoItemDraft, ValidationError> {
        let mut draft = TodoItemDraft::new(list_id, self.name)?;
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        if let Some(deadline) = self.deadline {
            draft = draft.with_deadline(deadline);
        }
        Ok(draft)
    }
}

/// Body of item `PUT` requests on both surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoItem {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub deadline: Option<Option<NaiveDateTime>>,
}

impl UpdateTodoItem {
    pub fn into_patch(self) -> Result<TodoItemPatch, ValidationError> {
        Ok(TodoItemPatch {
            name: required_update("name", self.name)?,
            description: self.description,
            deadline: self.deadline,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItemResponse {
    pub id: ItemId,
    pub list_id: ListId,
    pub name: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<TodoItem> for TodoItemResponse {
    fn from(value: TodoItem) -> Self {
        Self {
            id: value.id,
            list_id: value.list_id,
            name: value.name,
            description: value.description,
            deadline: value.deadline,
            created_at: value.created_at,
        }
    }
}
