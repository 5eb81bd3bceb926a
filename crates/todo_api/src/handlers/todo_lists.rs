//! `/todo-lists` surface, including the list-scoped item routes and the
//! cross-entity search.

use crate::error::ApiError;
use crate::session::{items, lists, AppState};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use todo_core::transfer::search::{SearchParams, SearchResult};
use todo_core::transfer::todo_item::{NewTodoItem, TodoItemResponse, UpdateTodoItem};
use todo_core::transfer::todo_list::{
    CreateTodoList, ListsByUser, TodoListResponse, UpdateTodoList,
};
use todo_core::transfer::MessageResponse;
use todo_core::{search_todos, ItemId, ItemKey, ListId, SearchQuery};

/// `POST /todo-lists/`
pub async fn create_list(
    State(state): State<AppState>,
    body: Result<Json<CreateTodoList>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoListResponse>), ApiError> {
    let Json(body) = body?;
    let draft = body.into_draft()?;
    let list = state
        .with_session(move |conn| lists(conn)?.create_list(&draft))
        .await?;
    Ok((StatusCode::CREATED, Json(list.into())))
}

/// `GET /todo-lists/?user_id=`
pub async fn lists_for_user(
    State(state): State<AppState>,
    params: Result<Query<ListsByUser>, QueryRejection>,
) -> Result<Json<Vec<TodoListResponse>>, ApiError> {
    let Query(params) = params?;
    let found = state
        .with_session(move |conn| lists(conn)?.lists_for_user(params.user_id))
        .await?;
    Ok(Json(found.into_iter().map(TodoListResponse::from).collect()))
}

/// `GET /todo-lists/{list_id}`
pub async fn get_list(
    State(state): State<AppState>,
    list_id: Result<Path<ListId>, PathRejection>,
) -> Result<Json<TodoListResponse>, ApiError> {
    let Path(list_id) = list_id?;
    let list = state
        .with_session(move |conn| lists(conn)?.get_list(list_id))
        .await?;
    Ok(Json(list.into()))
}

/// `PUT /todo-lists/{list_id}`
pub async fn update_list(
    State(state): State<AppState>,
    list_id: Result<Path<ListId>, PathRejection>,
    body: Result<Json<UpdateTodoList>, JsonRejection>,
) -> Result<Json<TodoListResponse>, ApiError> {
    let Path(list_id) = list_id?;
    let Json(body) = body?;
    let patch = body.into_patch()?;
    let list = state
        .with_session(move |conn| lists(conn)?.update_list(list_id, &patch))
        .await?;
    Ok(Json(list.into()))
}

/// `DELETE /todo-lists/{list_id}`; removes the list's items too.
pub async fn delete_list(
    State(state): State<AppState>,
    list_id: Result<Path<ListId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(list_id) = list_id?;
    state
        .with_session(move |conn| lists(conn)?.delete_list(list_id))
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Successfully deleted to-do list with id {list_id}"
    ))))
}

/// `POST /todo-lists/{list_id}/items/`
pub async fn create_list_item(
    State(state): State<AppState>,
    list_id: Result<Path<ListId>, PathRejection>,
    body: Result<Json<NewTodoItem>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoItemResponse>), ApiError> {
    let Path(list_id) = list_id?;
    let Json(body) = body?;
    let draft = body.into_draft(list_id)?;
    let item = state
        .with_session(move |conn| items(conn)?.create_item(&draft))
        .await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// `GET /todo-lists/{list_id}/items/`
pub async fn list_items(
    State(state): State<AppState>,
    list_id: Result<Path<ListId>, PathRejection>,
) -> Result<Json<Vec<TodoItemResponse>>, ApiError> {
    let Path(list_id) = list_id?;
    let found = state
        .with_session(move |conn| items(conn)?.items_in_list(list_id))
        .await?;
    Ok(Json(found.into_iter().map(TodoItemResponse::from).collect()))
}

/// `GET /todo-lists/{list_id}/items/{item_id}`
pub async fn get_list_item(
    State(state): State<AppState>,
    ids: Result<Path<(ListId, ItemId)>, PathRejection>,
) -> Result<Json<TodoItemResponse>, ApiError> {
    let Path((list_id, item_id)) = ids?;
    let item = state
        .with_session(move |conn| items(conn)?.get_item(ItemKey::in_list(list_id, item_id)))
        .await?;
    Ok(Json(item.into()))
}

/// `PUT /todo-lists/{list_id}/items/{item_id}`
pub async fn update_list_item(
    State(state): State<AppState>,
    ids: Result<Path<(ListId, ItemId)>, PathRejection>,
    body: Result<Json<UpdateTodoItem>, JsonRejection>,
) -> Result<Json<TodoItemResponse>, ApiError> {
    let Path((list_id, item_id)) = ids?;
    let Json(body) = body?;
    let patch = body.into_patch()?;
    let item = state
        .with_session(move |conn| {
            items(conn)?.update_item(ItemKey::in_list(list_id, item_id), &patch)
        })
        .await?;
    Ok(Json(item.into()))
}

/// `DELETE /todo-lists/{list_id}/items/{item_id}`
pub async fn delete_list_item(
    State(state): State<AppState>,
    ids: Result<Path<(ListId, ItemId)>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path((list_id, item_id)) = ids?;
    state
        .with_session(move |conn| items(conn)?.delete_item(ItemKey::in_list(list_id, item_id)))
        .await?;
    Ok(Json(MessageResponse::new("To-do item deleted successfully")))
}

/// `GET /todo-lists/search?query=`: lists and items whose name matches.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let Query(params) = params?;
    let query = SearchQuery::new(params.query)?;
    let hits = state
        .with_session(move |conn| search_todos(conn, &query))
        .await?;
    Ok(Json(hits.into_iter().map(SearchResult::from).collect()))
}
