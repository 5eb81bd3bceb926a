//! Flat `/todo-items` surface: items addressed by id alone.

use crate::error::ApiError;
use crate::session::{items, AppState};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use todo_core::transfer::search::ItemSearchParams;
use todo_core::transfer::todo_item::{CreateTodoItem, TodoItemResponse, UpdateTodoItem};
use todo_core::transfer::MessageResponse;
use todo_core::{ItemId, ItemKey, SearchQuery};

/// `POST /todo-items/`
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<CreateTodoItem>, JsonRejection>,
) -> Result<Json<TodoItemResponse>, ApiError> {
    let Json(body) = body?;
    let draft = body.into_draft()?;
    let item = state
        .with_session(move |conn| items(conn)?.create_item(&draft))
        .await?;
    Ok(Json(item.into()))
}

/// `GET /todo-items/{item_id}`
pub async fn get_item(
    State(state): State<AppState>,
    item_id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<TodoItemResponse>, ApiError> {
    let Path(item_id) = item_id?;
    let item = state
        .with_session(move |conn| items(conn)?.get_item(ItemKey::by_id(item_id)))
        .await?;
    Ok(Json(item.into()))
}

/// `GET /todo-items/`
pub async fn all_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodoItemResponse>>, ApiError> {
    let found = state
        .with_session(|conn| items(conn)?.all_items())
        .await?;
    Ok(Json(found.into_iter().map(TodoItemResponse::from).collect()))
}

/// `PUT /todo-items/{item_id}`
pub async fn update_item(
    State(state): State<AppState>,
    item_id: Result<Path<ItemId>, PathRejection>,
    body: Result<Json<UpdateTodoItem>, JsonRejection>,
) -> Result<Json<TodoItemResponse>, ApiError> {
    let Path(item_id) = item_id?;
    let Json(body) = body?;
    let patch = body.into_patch()?;
    let item = state
        .with_session(move |conn| items(conn)?.update_item(ItemKey::by_id(item_id), &patch))
        .await?;
    Ok(Json(item.into()))
}

/// `DELETE /todo-items/{item_id}`
pub async fn delete_item(
    State(state): State<AppState>,
    item_id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(item_id) = item_id?;
    state
        .with_session(move |conn| items(conn)?.delete_item(ItemKey::by_id(item_id)))
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "ToDoItem with ID {item_id} successfully deleted"
    ))))
}

/// `GET /todo-items/search-items/?query_params=`: name or description match.
pub async fn search_items(
    State(state): State<AppState>,
    params: Result<Query<ItemSearchParams>, QueryRejection>,
) -> Result<Json<Vec<TodoItemResponse>>, ApiError> {
    let Query(params) = params?;
    let query = SearchQuery::new(params.query_params)?;
    let found = state
        .with_session(move |conn| items(conn)?.search_items(&query))
        .await?;
    Ok(Json(found.into_iter().map(TodoItemResponse::from).collect()))
}
