use super::todo_item::TodoItemResponse;
use super::{present, required_update};
use crate::model::todo_list::{ListId, TodoList, TodoListDraft, TodoListPatch};
use crate::model::user::UserId;
use crate::model::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body of `POST /todo-lists/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoList {
    pub user_id: UserId,
    pub name: String,
}

impl CreateTodoList {
    pub fn into_draft(self) -> Result<TodoListDraft, ValidationError> {
        TodoListDraft::new(self.user_id, self.name)
    }
}

/// Body of `PUT /todo-lists/{id}`. Only `name` is mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoList {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
}

impl UpdateTodoList {
    pub fn into_patch(self) -> Result<TodoListPatch, ValidationError> {
        Ok(TodoListPatch {
            name: required_update("name", self.name)?,
        })
    }
}

/// Query string of `GET /todo-lists/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ListsByUser {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub id: ListId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub todo_items: Vec<TodoItemResponse>,
}

impl From<TodoList> for TodoListResponse {
    fn from(value: TodoList) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            name: value.name,
            created_at: value.created_at,
            todo_items: value.items.into_iter().map(TodoItemResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UpdateTodoList;

    #[test]
    fn fields_the_list_does_not_store_are_rejected() {
        for body in [
            r#"{"name":"x","description":"d"}"#,
            r#"{"deadline":"2023-12-31T23:59:59"}"#,
            r#"{"id":3}"#,
        ] {
            let result: Result<UpdateTodoList, _> = serde_json::from_str(body);
            assert!(result.is_err(), "{body} should be rejected");
        }
    }

    #[test]
    fn empty_body_is_a_no_op_patch() {
        let update: UpdateTodoList = serde_json::from_str("{}").unwrap();
        assert!(update.into_patch().unwrap().name.is_none());
    }
}
