use crate::error::ApiError;
use crate::session::{users, AppState};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use todo_core::transfer::user::{CreateUser, UpdateUser, UserFilter, UserResponse};
use todo_core::transfer::MessageResponse;
use todo_core::UserId;

/// `POST /users/`
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUser>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(body) = body?;
    let draft = body.into_draft()?;
    let user = state
        .with_session(move |conn| users(conn)?.create_user(&draft))
        .await?;
    Ok(Json(user.into()))
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Path(id) = id?;
    let user = state
        .with_session(move |conn| users(conn)?.get_user(id))
        .await?;
    Ok(Json(user.into()))
}

/// `GET /` and `GET /users/`, optionally filtered by `?username=`.
pub async fn list_users(
    State(state): State<AppState>,
    filter: Result<Query<UserFilter>, QueryRejection>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let Query(filter) = filter?;
    let found = state
        .with_session(move |conn| users(conn)?.list_users(filter.username.as_deref()))
        .await?;
    Ok(Json(found.into_iter().map(UserResponse::from).collect()))
}

/// `PUT /users/{id}`
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
    body: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let patch = body.into_patch()?;
    let user = state
        .with_session(move |conn| users(conn)?.update_user(id, &patch))
        .await?;
    Ok(Json(user.into()))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state
        .with_session(move |conn| users(conn)?.delete_user(id))
        .await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
